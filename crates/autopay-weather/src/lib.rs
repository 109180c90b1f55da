pub mod app_state;
pub mod config;
pub mod handlers;
pub mod paywall;
pub mod router;
