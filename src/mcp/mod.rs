//! MCP server implementation.
//!
//! Exposes the habit store through Model Context Protocol tools so
//! tool-calling agents can create habits, log completions, and request
//! derived views.
//!
//! ## Transports
//!
//! - **Stdio** (default): newline-delimited JSON-RPC, no authentication
//!   (trusted local process).
//! - **HTTP** (`http` feature): single `/mcp` endpoint behind static
//!   bearer token authentication.
//!
//! ## Usage
//!
//! ```bash
//! habitrack serve
//! ```
//!
//! ### Client configuration
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "habitrack": {
//!       "command": "habitrack",
//!       "args": ["serve"]
//!     }
//!   }
//! }
//! ```

pub mod auth;
mod server;
mod tools;

pub use auth::BearerAuthenticator;
pub use server::{McpServer, Transport};
pub use tools::{ToolContent, ToolDefinition, ToolRegistry, ToolResult};
