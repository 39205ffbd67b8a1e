use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::gate::PermissionGate;
use crate::db::log::{Operation, ttlog};
use crate::db::store::LocationStore;
use crate::errors::AppResult;
use crate::models::PermissionState;
use crate::platform::StoredPermissions;
use crate::ui::messages::{info, success, warning};
use log::warn;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Permission {
        status,
        request,
        grant,
        revoke,
    } = cmd
    {
        let gate = PermissionGate::new(StoredPermissions::from_config_dir());

        let changed = if *grant {
            gate.backend().set(PermissionState::Granted)?;
            Some(PermissionState::Granted)
        } else if *revoke {
            gate.backend().set(PermissionState::Denied)?;
            Some(PermissionState::Denied)
        } else if *request {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            Some(rt.block_on(gate.request()))
        } else {
            None
        };

        if let Some(state) = changed {
            report(state);
            record(cfg, state);
        }

        if *status || changed.is_none() {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let state = rt.block_on(gate.check());
            info(format!(
                "Location permission ({}): {}",
                gate.permission_id(),
                state
            ));
        }
    }

    Ok(())
}

fn report(state: PermissionState) {
    match state {
        PermissionState::Granted => success("Location access granted."),
        PermissionState::Denied => warning("Location access denied."),
        PermissionState::Undetermined => info("Location access not decided yet."),
    }
}

/// Keep a trace of permission changes in the internal log, if the DB is reachable.
fn record(cfg: &Config, state: PermissionState) {
    if let Ok(store) = LocationStore::open(&cfg.database)
        && let Err(e) = ttlog(
            store.conn(),
            Operation::Permission,
            state.as_str(),
            &format!("Location permission set to {state}"),
        )
    {
        warn!("Failed to write internal log: {e}");
    }
}
