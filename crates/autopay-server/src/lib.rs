pub mod app_state;
pub mod config;
pub mod downstream;
pub mod handlers;
pub mod provider;
pub mod router;
