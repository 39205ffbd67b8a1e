use super::sample::Coordinates;
use serde::Serialize;

/// What the rendering layer gets to see. `location` is centred on when
/// `loading` is false; a placeholder is shown otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayState {
    pub location: Option<Coordinates>,
    pub loading: bool,
    /// False once the session runs without a working store.
    pub durable: bool,
    /// Number of fixes that could not be written to the log.
    pub persist_failures: u64,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            location: None,
            loading: true,
            durable: true,
            persist_failures: 0,
        }
    }
}
