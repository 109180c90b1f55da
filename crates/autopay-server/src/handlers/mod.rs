mod health;
mod mcp;

pub use health::{health, root};
pub use mcp::{mcp_request, SERVER_NAME};
