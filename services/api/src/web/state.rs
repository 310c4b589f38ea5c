//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use linkfolio_core::ProfileStore;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all
/// handlers. Components receive the store through here rather than reaching
/// for any ambient global.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
}
