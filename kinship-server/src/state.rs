//! Application state management

use kinship::core::KinshipManager;

use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Debug)]
pub struct AppState {
    /// Kinship manager; every handler runs its operation through it
    pub manager: KinshipManager,

    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(manager: KinshipManager, config: ServerConfig) -> Self {
        Self { manager, config }
    }
}
