pub mod jsonrpc;
pub mod tools;

pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCall};
pub use tools::{ToolDefinition, ToolRegistry, ToolResult};
