//! Position source that replays `latitude,longitude` lines from a file or stdin.

use crate::core::watcher::{EventSink, PositionSource};
use crate::errors::{AppError, AppResult};
use crate::models::{Coordinates, WatchErrorCode, WatchEvent, WatchId, WatchOptions};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub enum FeedInput {
    /// Only ends at EOF; see [`FeedPositionSource`].
    Stdin,
    File(PathBuf),
}

/// Each watch runs on its own reader thread. Clearing a watch stops
/// delivery at once, but a stdin feed keeps its thread blocked in `read`
/// until stdin reaches EOF.
pub struct FeedPositionSource {
    input: FeedInput,
    next_id: AtomicU64,
    watches: Arc<Mutex<HashMap<WatchId, CancellationToken>>>,
}

impl FeedPositionSource {
    pub fn new(input: FeedInput) -> Self {
        Self {
            input,
            next_id: AtomicU64::new(1),
            watches: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn open(&self) -> AppResult<Box<dyn Read + Send>> {
        match &self.input {
            FeedInput::Stdin => Ok(Box::new(io::stdin())),
            FeedInput::File(path) => {
                let file = File::open(path).map_err(|e| AppError::Watch {
                    code: WatchErrorCode::PositionUnavailable,
                    message: format!("cannot open feed {}: {}", path.display(), e),
                })?;
                Ok(Box::new(file))
            }
        }
    }
}

impl PositionSource for FeedPositionSource {
    fn watch_position(&self, sink: EventSink, options: WatchOptions) -> AppResult<WatchId> {
        let reader = self.open()?;
        let id = WatchId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let token = CancellationToken::new();

        self.watches
            .lock()
            .map_err(|_| AppError::Other("feed watch table poisoned".into()))?
            .insert(id, token.clone());

        if !options.high_accuracy {
            debug!("Feed source ignores the accuracy hint");
        }

        let watches = Arc::clone(&self.watches);
        thread::spawn(move || {
            pump(reader, &sink, &token);
            if let Ok(mut w) = watches.lock() {
                w.remove(&id);
            }
        });

        Ok(id)
    }

    fn clear_watch(&self, id: WatchId) {
        let token = self.watches.lock().ok().and_then(|mut w| w.remove(&id));
        if let Some(token) = token {
            token.cancel();
        }
    }
}

/// Forward every record until the input ends, the watch is cleared or
/// nobody listens anymore.
fn pump(reader: Box<dyn Read + Send>, sink: &EventSink, token: &CancellationToken) {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    for record in rdr.records() {
        if token.is_cancelled() {
            break;
        }

        let event = match record {
            Ok(rec) if is_header(&rec) => continue,
            Ok(rec) => match parse_record(&rec) {
                Ok(c) => WatchEvent::Fix(c),
                Err(message) => WatchEvent::Error {
                    code: WatchErrorCode::PositionUnavailable,
                    message,
                },
            },
            Err(e) => {
                warn!("Unreadable feed record: {e}");
                WatchEvent::Error {
                    code: WatchErrorCode::Internal,
                    message: e.to_string(),
                }
            }
        };

        if sink.send(event).is_err() {
            break;
        }
    }
}

fn is_header(rec: &StringRecord) -> bool {
    rec.get(0)
        .is_some_and(|f| f.eq_ignore_ascii_case("latitude") || f.eq_ignore_ascii_case("lat"))
}

fn parse_record(rec: &StringRecord) -> Result<Coordinates, String> {
    let (Some(lat), Some(lon)) = (rec.get(0), rec.get(1)) else {
        return Err(format!("expected 'latitude,longitude', got {:?}", rec));
    };

    let latitude: f64 = lat
        .parse()
        .map_err(|_| format!("invalid latitude '{lat}'"))?;
    let longitude: f64 = lon
        .parse()
        .map_err(|_| format!("invalid longitude '{lon}'"))?;

    Coordinates::checked(latitude, longitude).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn parses_plain_pair() {
        let c = parse_record(&rec(&["37.0", "-122.0"])).unwrap();
        assert_eq!(c, Coordinates::new(37.0, -122.0));
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        assert!(parse_record(&rec(&["91.0", "0.0"])).is_err());
        assert!(parse_record(&rec(&["abc", "0.0"])).is_err());
        assert!(parse_record(&rec(&["1.0"])).is_err());
    }

    #[test]
    fn header_row_is_recognised() {
        assert!(is_header(&rec(&["latitude", "longitude"])));
        assert!(!is_header(&rec(&["1.0", "2.0"])));
    }

    #[tokio::test]
    async fn file_feed_delivers_fixes_then_closes() {
        let mut path = std::env::temp_dir();
        path.push("rgeologger_feed_unit.csv");
        std::fs::write(&path, "latitude,longitude\n1.0,2.0\nnope,3\n4.0,5.0\n").unwrap();

        let source = FeedPositionSource::new(FeedInput::File(path.clone()));
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        source.watch_position(tx, WatchOptions::default()).unwrap();

        let mut events = Vec::new();
        while let Some(ev) = rx.recv().await {
            events.push(ev);
        }

        assert_eq!(events.len(), 3);
        assert_eq!(events[0], WatchEvent::Fix(Coordinates::new(1.0, 2.0)));
        assert!(matches!(
            events[1],
            WatchEvent::Error {
                code: WatchErrorCode::PositionUnavailable,
                ..
            }
        ));
        assert_eq!(events[2], WatchEvent::Fix(Coordinates::new(4.0, 5.0)));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn cleared_watch_delivers_nothing_more() {
        let token = CancellationToken::new();
        token.cancel();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        pump(Box::new(io::Cursor::new("1.0,2.0\n3.0,4.0\n")), &tx, &token);
        drop(tx);

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn missing_feed_file_fails_to_start() {
        let source = FeedPositionSource::new(FeedInput::File(PathBuf::from(
            "/nonexistent/rgeologger/feed.csv",
        )));
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        assert!(source.watch_position(tx, WatchOptions::default()).is_err());
    }
}
