// Application state module
// Immutable configuration plus the fixture tables served by both servers

use super::types::Config;
use crate::fixtures::Fixtures;

/// Application state
///
/// Built once at startup and shared read-only between connections.
pub struct AppState {
    pub config: Config,
    pub fixtures: Fixtures,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            fixtures: Fixtures::load(),
        }
    }

    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}
