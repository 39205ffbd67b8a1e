//! Session controller: recover the last fix, check the permission, then
//! watch and persist until torn down.

use crate::core::gate::{PermissionBackend, PermissionGate};
use crate::core::watcher::{EventStream, LocationWatcher, PositionSource, WatchHandle};
use crate::db::store::LocationStore;
use crate::models::{Coordinates, DisplayState, WatchEvent, WatchOptions};
use log::{debug, error, info, warn};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Recovering,
    AwaitingPermission,
    Watching,
    /// Permission not granted or the watch could not be set up. Terminal.
    Inert,
    TornDown,
}

pub struct LocationSession<B, S> {
    store: Option<LocationStore>,
    gate: PermissionGate<B>,
    watcher: LocationWatcher<S>,
    state: SessionState,
    handle: Option<WatchHandle>,
    events: Option<EventStream>,
    display: watch::Sender<DisplayState>,
}

impl<B: PermissionBackend, S: PositionSource> LocationSession<B, S> {
    pub fn new(store: LocationStore, gate: PermissionGate<B>, watcher: LocationWatcher<S>) -> Self {
        Self::build(Some(store), gate, watcher)
    }

    /// Session without a working store: fixes are displayed but not kept.
    pub fn degraded(gate: PermissionGate<B>, watcher: LocationWatcher<S>) -> Self {
        warn!("Location log unavailable, tracking without persistence");
        Self::build(None, gate, watcher)
    }

    fn build(
        store: Option<LocationStore>,
        gate: PermissionGate<B>,
        watcher: LocationWatcher<S>,
    ) -> Self {
        let initial = DisplayState {
            durable: store.is_some(),
            ..DisplayState::default()
        };
        let (display, _) = watch::channel(initial);

        Self {
            store,
            gate,
            watcher,
            state: SessionState::Idle,
            handle: None,
            events: None,
            display,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Receiver for the rendering layer.
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.display.subscribe()
    }

    pub fn display(&self) -> DisplayState {
        self.display.borrow().clone()
    }

    pub fn store(&self) -> Option<&LocationStore> {
        self.store.as_ref()
    }

    /// Drive the session from `Idle` to `Watching` or `Inert`.
    /// Does nothing once the session has left `Idle`.
    pub async fn start(&mut self) -> SessionState {
        if self.state != SessionState::Idle {
            return self.state;
        }

        self.state = SessionState::Recovering;
        self.recover();

        self.state = SessionState::AwaitingPermission;
        let permission = self.gate.check().await;
        if !permission.is_granted() {
            info!("Location permission is {permission}, not tracking");
            self.state = SessionState::Inert;
            return self.state;
        }

        match self.watcher.start(WatchOptions::default()) {
            Ok((handle, events)) => {
                self.handle = Some(handle);
                self.events = Some(events);
                self.state = SessionState::Watching;
            }
            Err(e) => {
                error!("Could not start watching position: {e}");
                self.state = SessionState::Inert;
            }
        }

        self.state
    }

    /// Show the last stored fix, if any, before permission is known.
    fn recover(&mut self) {
        let Some(store) = &self.store else {
            return;
        };

        match store.most_recent() {
            Ok(Some(sample)) => {
                debug!("Recovered last known location #{}", sample.id);
                self.show(sample.coordinates());
            }
            Ok(None) => debug!("No last known location"),
            Err(e) => warn!("Could not read last known location: {e}"),
        }
    }

    fn show(&self, location: Coordinates) {
        self.display.send_modify(|d| {
            d.location = Some(location);
            d.loading = false;
        });
    }

    /// Apply one watch delivery: fixes are displayed first and then
    /// appended; a failed append is logged and counted, nothing else.
    /// Deliveries outside `Watching` are dropped.
    pub fn handle_event(&mut self, event: WatchEvent) {
        if self.state != SessionState::Watching {
            debug!("Ignoring watch delivery while {:?}", self.state);
            return;
        }

        match event {
            WatchEvent::Fix(c) => {
                self.show(c);

                let Some(store) = self.store.as_mut() else {
                    return;
                };
                if let Err(e) = store.append(c.latitude, c.longitude) {
                    error!("Failed to persist fix ({}, {}): {e}", c.latitude, c.longitude);
                    self.display.send_modify(|d| d.persist_failures += 1);
                }
            }
            WatchEvent::Error { code, message } => {
                warn!("Location watch error {code}: {message}");
            }
        }
    }

    /// Run until the watch ends or `shutdown` fires, then tear down.
    /// A shutdown while waiting on the permission abandons the wait.
    pub async fn run(&mut self, shutdown: CancellationToken) -> SessionState {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                self.teardown();
                return self.state;
            }
            _ = self.start() => {}
        }

        if self.state == SessionState::Watching {
            loop {
                tokio::select! {
                    biased;
                    _ = shutdown.cancelled() => break,
                    event = next_event(&mut self.events) => match event {
                        Some(event) => self.handle_event(event),
                        None => {
                            info!("Position source closed the watch");
                            break;
                        }
                    },
                }
            }
        }

        self.teardown();
        self.state
    }

    /// Stop the active watch, if any. Safe to call any number of times and
    /// from any state; the watch is stopped at most once.
    pub fn teardown(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.watcher.stop(&handle);
        }
        self.events = None;

        if self.state != SessionState::Inert {
            self.state = SessionState::TornDown;
        }
    }
}

async fn next_event(events: &mut Option<EventStream>) -> Option<WatchEvent> {
    match events {
        Some(rx) => rx.recv().await,
        None => None,
    }
}
