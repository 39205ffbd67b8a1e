use crate::errors::AppResult;
use crate::models::{WatchEvent, WatchId, WatchOptions};
use log::{debug, info};
use std::collections::HashSet;
use tokio::sync::mpsc;

/// Where a position source delivers fixes and errors.
pub type EventSink = mpsc::UnboundedSender<WatchEvent>;
pub type EventStream = mpsc::UnboundedReceiver<WatchEvent>;

/// Platform side of continuous location updates.
pub trait PositionSource {
    /// Start delivering events into `sink` until [`PositionSource::clear_watch`]
    /// is called with the returned id. Errors sent through the sink are
    /// transient and do not end the subscription.
    fn watch_position(&self, sink: EventSink, options: WatchOptions) -> AppResult<WatchId>;
    fn clear_watch(&self, id: WatchId);
}

/// Cancel token for one active watch. Deliberately not `Clone`.
#[derive(Debug, PartialEq, Eq)]
pub struct WatchHandle {
    id: WatchId,
}

impl WatchHandle {
    pub fn id(&self) -> WatchId {
        self.id
    }
}

pub struct LocationWatcher<S> {
    source: S,
    active: HashSet<WatchId>,
}

impl<S: PositionSource> LocationWatcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            active: HashSet::new(),
        }
    }

    pub fn start(&mut self, options: WatchOptions) -> AppResult<(WatchHandle, EventStream)> {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.source.watch_position(tx, options)?;
        self.active.insert(id);
        info!(
            "Watching position {} (high accuracy: {})",
            id, options.high_accuracy
        );
        Ok((WatchHandle { id }, rx))
    }

    /// Clear the watch behind `handle`. Unknown or already stopped handles
    /// are ignored; returns whether anything was actually cleared.
    pub fn stop(&mut self, handle: &WatchHandle) -> bool {
        if self.active.remove(&handle.id) {
            self.source.clear_watch(handle.id);
            info!("Stopped watch {}", handle.id);
            true
        } else {
            debug!("Watch {} is not active, nothing to stop", handle.id);
            false
        }
    }

    pub fn is_active(&self, handle: &WatchHandle) -> bool {
        self.active.contains(&handle.id)
    }
}
