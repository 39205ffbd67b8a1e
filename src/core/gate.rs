use crate::errors::AppResult;
use crate::models::{PermissionId, PermissionState};
use log::{debug, error};

/// Platform side of the location permission.
pub trait PermissionBackend {
    /// Current status, never prompts.
    fn check_status(&self, id: PermissionId) -> impl Future<Output = AppResult<PermissionState>>;
    /// May prompt the user and resolves once they answer.
    fn request_status(
        &self,
        id: PermissionId,
    ) -> impl Future<Output = AppResult<PermissionState>>;
}

/// Reduces backend answers to a [`PermissionState`]. Plumbing errors are
/// logged and read as `Denied`: tracking only starts on a confirmed grant.
pub struct PermissionGate<B> {
    backend: B,
    id: PermissionId,
}

impl<B: PermissionBackend> PermissionGate<B> {
    /// Gate for the permission identifier of the running OS.
    pub fn new(backend: B) -> Self {
        Self::with_id(backend, PermissionId::current())
    }

    pub fn with_id(backend: B, id: PermissionId) -> Self {
        Self { backend, id }
    }

    pub fn permission_id(&self) -> PermissionId {
        self.id
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn check(&self) -> PermissionState {
        match self.backend.check_status(self.id).await {
            Ok(state) => {
                debug!("Permission {} is {}", self.id, state);
                state
            }
            Err(e) => {
                error!("Checking {} failed, treating as denied: {}", self.id, e);
                PermissionState::Denied
            }
        }
    }

    pub async fn request(&self) -> PermissionState {
        match self.backend.request_status(self.id).await {
            Ok(state) => {
                debug!("Permission {} answered {}", self.id, state);
                state
            }
            Err(e) => {
                error!("Requesting {} failed, treating as denied: {}", self.id, e);
                PermissionState::Denied
            }
        }
    }
}
