//! Application state for the web layer.

use std::sync::Arc;

use crate::command::AirCommand;

/// Shared application state.
///
/// Contains the registered command handlers.
#[derive(Clone)]
pub struct AppState {
    /// Handler for `air <city>`
    pub air: Arc<AirCommand>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(air: AirCommand) -> Self {
        Self { air: Arc::new(air) }
    }
}
