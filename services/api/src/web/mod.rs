pub mod auth;
pub mod onboarding;
pub mod rest;
pub mod state;

// Re-export the handlers so the binary that builds the router can reach them
// without digging through submodules.
pub use auth::login_handler;
pub use onboarding::onboarding_handler;
pub use rest::{get_profile_handler, record_event_handler};
