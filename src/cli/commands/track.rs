use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{LocationSession, LocationWatcher, PermissionGate, SessionState};
use crate::db::log::{Operation, ttlog};
use crate::db::store::LocationStore;
use crate::errors::AppResult;
use crate::models::DisplayState;
use crate::platform::{FeedInput, FeedPositionSource, StoredPermissions};
use crate::ui::messages::{info, location, success, warning};
use log::warn;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Track { feed } = cmd {
        let input = match feed {
            Some(path) => FeedInput::File(path.clone()),
            None => FeedInput::Stdin,
        };

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        rt.block_on(track(cfg, input));
    }

    Ok(())
}

async fn track(cfg: &Config, input: FeedInput) {
    let gate = PermissionGate::new(StoredPermissions::from_config_dir());
    let watcher = LocationWatcher::new(FeedPositionSource::new(input));

    let mut session = match LocationStore::open(&cfg.database) {
        Ok(store) => {
            log_session(&store, Operation::SessionStart, "Tracking session started");
            LocationSession::new(store, gate, watcher)
        }
        Err(e) => {
            warning(format!("Location log unavailable ({e}), fixes will not be kept"));
            LocationSession::degraded(gate, watcher)
        }
    };

    let shutdown = CancellationToken::new();
    let on_ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let renderer = tokio::spawn(render(session.subscribe(), cfg.coordinate_precision));

    let state = session.run(shutdown).await;
    let display = session.display();

    if let Some(store) = session.store() {
        log_session(store, Operation::SessionStop, "Tracking session ended");
    }
    // Closing the display channel ends the renderer
    drop(session);
    renderer.await.ok();

    if state == SessionState::Inert {
        if permission_granted().await {
            warning("Position source unavailable, nothing was tracked.");
        } else {
            warning("Location permission not granted; run `rgeologger permission --request`.");
        }
    }
    if display.persist_failures > 0 {
        warning(format!(
            "{} fix(es) could not be saved to the location log.",
            display.persist_failures
        ));
    }
    match display.location {
        Some(c) => location("Last known location", &c, cfg.coordinate_precision),
        None => info("No location available."),
    }
    success("Tracking session ended.");
}

async fn permission_granted() -> bool {
    PermissionGate::new(StoredPermissions::from_config_dir())
        .check()
        .await
        .is_granted()
}

/// Stand-in for the map view: prints every displayed position.
async fn render(mut rx: watch::Receiver<DisplayState>, precision: usize) {
    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        if let (false, Some(c)) = (state.loading, state.location) {
            location("You are here", &c, precision);
        }
    }
}

fn log_session(store: &LocationStore, op: Operation, message: &str) {
    if let Err(e) = ttlog(store.conn(), op, "track", message) {
        warn!("Failed to write internal log: {e}");
    }
}
