use rgeologger::core::{LocationWatcher, PermissionGate};
use rgeologger::models::{Coordinates, PermissionId, PermissionState, WatchEvent, WatchOptions};

mod common;
use common::{BrokenPermissions, MockSource, StaticPermissions};

#[tokio::test]
async fn test_gate_passes_backend_answers_through() {
    for state in [
        PermissionState::Granted,
        PermissionState::Denied,
        PermissionState::Undetermined,
    ] {
        let gate = PermissionGate::new(StaticPermissions::new(state));
        assert_eq!(gate.check().await, state);
        assert_eq!(gate.request().await, state);
    }
}

#[tokio::test]
async fn test_gate_fails_safe_to_denied() {
    let gate = PermissionGate::with_id(BrokenPermissions, PermissionId::LocationWhenInUse);
    assert_eq!(gate.check().await, PermissionState::Denied);
    assert_eq!(gate.request().await, PermissionState::Denied);
}

#[test]
fn test_gate_uses_platform_permission_id() {
    let gate = PermissionGate::new(StaticPermissions::new(PermissionState::Granted));
    assert_eq!(gate.permission_id(), PermissionId::for_os(std::env::consts::OS));
}

#[tokio::test]
async fn test_watcher_delivers_and_stops_idempotently() {
    let source = MockSource::default();
    let mut watcher = LocationWatcher::new(source.clone());

    let (handle, mut events) = watcher.start(WatchOptions::default()).unwrap();
    assert!(watcher.is_active(&handle));

    source.emit(WatchEvent::Fix(Coordinates::new(1.5, 2.5)));
    assert_eq!(
        events.recv().await,
        Some(WatchEvent::Fix(Coordinates::new(1.5, 2.5)))
    );

    assert!(watcher.stop(&handle));
    assert!(!watcher.stop(&handle));
    assert!(!watcher.is_active(&handle));
    assert_eq!(source.cleared(), vec![handle.id()]);

    // The source dropped its sink, so the stream ends
    assert_eq!(events.recv().await, None);
}

#[test]
fn test_watcher_start_failure_is_reported() {
    let mut watcher = LocationWatcher::new(MockSource::failing());
    assert!(watcher.start(WatchOptions::default()).is_err());
}
