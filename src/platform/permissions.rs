use crate::config::Config;
use crate::core::gate::PermissionBackend;
use crate::errors::{AppError, AppResult};
use crate::models::{PermissionId, PermissionState};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Permission answers kept in the config file, read fresh on every call.
pub struct StoredPermissions {
    path: PathBuf,
}

impl StoredPermissions {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Backend for the standard config file location.
    pub fn from_config_dir() -> Self {
        Self::new(Config::config_file())
    }

    fn load(&self) -> AppResult<Config> {
        Config::load_from(&self.path).map_err(|e| {
            AppError::Permission(format!("cannot read {}: {}", self.path.display(), e))
        })
    }

    /// Record an answer without prompting.
    pub fn set(&self, state: PermissionState) -> AppResult<()> {
        let mut cfg = self.load()?;
        cfg.location_permission = state;
        cfg.save_to(&self.path)
    }
}

impl PermissionBackend for StoredPermissions {
    async fn check_status(&self, _id: PermissionId) -> AppResult<PermissionState> {
        Ok(self.load()?.location_permission)
    }

    async fn request_status(&self, id: PermissionId) -> AppResult<PermissionState> {
        let current = self.load()?.location_permission;
        if current != PermissionState::Undetermined {
            return Ok(current);
        }

        let answer = tokio::task::spawn_blocking(move || prompt(id))
            .await
            .map_err(|e| AppError::Permission(e.to_string()))??;

        self.set(answer)?;
        Ok(answer)
    }
}

/// Ask on the terminal. Anything but an explicit yes is a denial.
fn prompt(id: PermissionId) -> AppResult<PermissionState> {
    let mut stderr = io::stderr();
    write!(
        stderr,
        "📍 Allow rgeologger to access your location ({id})? [y/N] "
    )?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    Ok(match line.trim().to_lowercase().as_str() {
        "y" | "yes" => PermissionState::Granted,
        _ => PermissionState::Denied,
    })
}
