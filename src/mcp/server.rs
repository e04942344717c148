//! MCP server setup and lifecycle.
//!
//! Implements a JSON-RPC based MCP server over stdio or HTTP transport.
//!
//! ## Transport Authentication
//!
//! - **Stdio**: No authentication required (trusted local process).
//! - **HTTP**: Static bearer token required. Needs the `http` feature and
//!   the `HABITRACK_TOKEN` environment variable.

use crate::mcp::ToolRegistry;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{BufRead, BufReader, Write};
use tracing::info_span;

#[cfg(feature = "http")]
use crate::mcp::auth::BearerAuthenticator;

/// Maximum request body size (1MB). A tool call carries a habit name and a
/// few short strings; anything near this size is hostile or broken.
const MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024;

/// MCP protocol version.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name.
const SERVER_NAME: &str = "habitrack";

/// Transport type for the MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// Standard input/output (default for desktop agent clients).
    #[default]
    Stdio,
    /// HTTP transport.
    Http,
}

/// MCP server for habitrack.
pub struct McpServer {
    /// Tool registry bound to the shared store.
    tools: ToolRegistry,
    /// Transport type.
    transport: Transport,
    /// HTTP port (if using HTTP transport).
    port: u16,
    /// Bearer authenticator for HTTP transport.
    #[cfg(feature = "http")]
    authenticator: Option<BearerAuthenticator>,
}

impl McpServer {
    /// Creates a new MCP server over the given tool registry.
    #[must_use]
    pub fn new(tools: ToolRegistry) -> Self {
        Self {
            tools,
            transport: Transport::Stdio,
            port: 3000,
            #[cfg(feature = "http")]
            authenticator: None,
        }
    }

    /// Sets the transport type.
    #[must_use]
    pub const fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    /// Sets the HTTP port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the bearer authenticator for HTTP transport.
    #[cfg(feature = "http")]
    #[must_use]
    pub fn with_authenticator(mut self, authenticator: BearerAuthenticator) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Initializes bearer authentication from the `HABITRACK_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or the token is too short.
    #[cfg(feature = "http")]
    pub fn with_auth_from_env(self) -> Result<Self> {
        let authenticator = BearerAuthenticator::from_env()?;
        Ok(self.with_authenticator(authenticator))
    }

    /// Starts the MCP server.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to start.
    pub fn start(&mut self) -> Result<()> {
        match self.transport {
            Transport::Stdio => self.run_stdio(),
            Transport::Http => self.run_http(),
        }
    }

    /// Runs the server over stdio.
    fn run_stdio(&mut self) -> Result<()> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        let reader = BufReader::new(stdin.lock());

        for line in reader.lines() {
            let line = line.map_err(|e| Error::OperationFailed {
                operation: "read_stdin".to_string(),
                cause: e.to_string(),
            })?;

            if line.is_empty() {
                continue;
            }

            let response = handle_request(&self.tools, "stdio", &line);

            writeln!(stdout, "{response}").map_err(|e| Error::OperationFailed {
                operation: "write_stdout".to_string(),
                cause: e.to_string(),
            })?;

            stdout.flush().map_err(|e| Error::OperationFailed {
                operation: "flush_stdout".to_string(),
                cause: e.to_string(),
            })?;
        }

        Ok(())
    }

    /// Runs the server over HTTP with bearer token authentication.
    #[cfg(feature = "http")]
    fn run_http(&mut self) -> Result<()> {
        use axum::http::header;
        use axum::{Router, routing::post};
        use http_transport::{McpHttpState, handle_http_request};
        use std::sync::Arc;
        use tower_http::set_header::SetResponseHeaderLayer;
        use tower_http::trace::TraceLayer;

        let authenticator = self.authenticator.clone().ok_or_else(|| {
            Error::InvalidInput(
                "bearer authenticator not configured; set HABITRACK_TOKEN or call with_authenticator()"
                    .to_string(),
            )
        })?;

        let state = Arc::new(McpHttpState {
            tools: ToolRegistry::new(self.tools.store_handle()),
            authenticator,
        });

        // Security headers per OWASP recommendations.
        let app = Router::new()
            .route("/mcp", post(handle_http_request))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                header::HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_FRAME_OPTIONS,
                header::HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::CACHE_CONTROL,
                header::HeaderValue::from_static("no-store"),
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let rt = tokio::runtime::Runtime::new().map_err(|e| Error::OperationFailed {
            operation: "create_runtime".to_string(),
            cause: e.to_string(),
        })?;

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.port));
        tracing::info!(port = self.port, "starting MCP HTTP server with bearer auth");

        rt.block_on(async {
            let listener =
                tokio::net::TcpListener::bind(addr)
                    .await
                    .map_err(|e| Error::OperationFailed {
                        operation: "bind".to_string(),
                        cause: e.to_string(),
                    })?;

            axum::serve(listener, app)
                .await
                .map_err(|e| Error::OperationFailed {
                    operation: "serve".to_string(),
                    cause: e.to_string(),
                })
        })
    }

    /// Runs the server over HTTP (feature not enabled).
    #[cfg(not(feature = "http"))]
    fn run_http(&self) -> Result<()> {
        Err(Error::InvalidInput(
            "HTTP transport requires the 'http' feature".to_string(),
        ))
    }
}

/// Handles one JSON-RPC request string, returning the response string.
fn handle_request(tools: &ToolRegistry, transport: &'static str, request: &str) -> String {
    if request.len() > MAX_REQUEST_BODY_SIZE {
        tracing::warn!(
            request_size = request.len(),
            max_size = MAX_REQUEST_BODY_SIZE,
            "request exceeds maximum size limit"
        );
        return format_error(
            None,
            -32600,
            &format!(
                "Request too large: {} bytes (max: {} bytes)",
                request.len(),
                MAX_REQUEST_BODY_SIZE
            ),
        );
    }

    let span = info_span!(
        "mcp.request",
        transport,
        rpc.method = tracing::field::Empty,
        status = tracing::field::Empty
    );
    let _guard = span.enter();

    let parsed: std::result::Result<JsonRpcRequest, _> = serde_json::from_str(request);
    match parsed {
        Ok(req) => {
            span.record("rpc.method", req.method.as_str());
            tracing::debug!(method = %req.method, "processing MCP request");

            let result = dispatch_method(tools, &req.method, req.params);
            span.record("status", if result.is_ok() { "success" } else { "error" });
            format_response(req.id, result)
        },
        Err(e) => {
            span.record("status", "parse_error");
            format_error(None, -32700, &format!("Parse error: {e}"))
        },
    }
}

/// Dispatches a method call.
fn dispatch_method(tools: &ToolRegistry, method: &str, params: Option<Value>) -> DispatchResult {
    match method {
        "initialize" => handle_initialize(),
        "tools/list" => handle_list_tools(tools),
        "tools/call" => handle_call_tool(tools, params),
        "ping" => Ok(serde_json::json!({})),
        name => Err((-32601, format!("Method not found: {name}"))),
    }
}

/// Handles the initialize method.
fn handle_initialize() -> DispatchResult {
    Ok(serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    }))
}

/// Handles tools/list.
fn handle_list_tools(tools: &ToolRegistry) -> DispatchResult {
    let tools: Vec<Value> = tools
        .list_tools()
        .iter()
        .map(|t| {
            serde_json::json!({
                "name": t.name,
                "description": t.description,
                "inputSchema": t.input_schema
            })
        })
        .collect();

    Ok(serde_json::json!({ "tools": tools }))
}

/// Handles tools/call.
///
/// Tool failures never become JSON-RPC errors: they come back as an
/// `isError` result so the calling agent can read the message.
fn handle_call_tool(tools: &ToolRegistry, params: Option<Value>) -> DispatchResult {
    let params = params.ok_or((-32602, "Missing params".to_string()))?;

    let name = params
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or((-32602, "Missing tool name".to_string()))?;
    let span = info_span!("mcp.tool.call", tool.name = name);
    let _guard = span.enter();

    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or(serde_json::json!({}));

    match tools.execute(name, arguments) {
        Ok(result) => Ok(serde_json::json!({
            "content": result.content,
            "isError": result.is_error
        })),
        Err(e) => Ok(serde_json::json!({
            "content": [{ "type": "text", "text": e.to_string() }],
            "isError": true
        })),
    }
}

/// Formats a successful response.
fn format_response(id: Option<Value>, result: DispatchResult) -> String {
    match result {
        Ok(value) => {
            let response = JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id,
                result: Some(value),
                error: None,
            };
            serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
        },
        Err((code, message)) => format_error(id, code, &message),
    }
}

/// Formats an error response.
fn format_error(id: Option<Value>, code: i32, message: &str) -> String {
    let response = JsonRpcResponse {
        jsonrpc: "2.0".to_string(),
        id,
        result: None,
        error: Some(JsonRpcError {
            code,
            message: message.to_string(),
            data: None,
        }),
    };
    serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
}

/// Result type for method dispatch.
type DispatchResult = std::result::Result<Value, (i32, String)>;

/// JSON-RPC request.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    /// JSON-RPC version (required by protocol but not used in code).
    #[serde(rename = "jsonrpc")]
    _jsonrpc: String,
    id: Option<Value>,
    method: String,
    params: Option<Value>,
}

/// JSON-RPC response.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error.
#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

// HTTP transport implementation
#[cfg(feature = "http")]
mod http_transport {
    use super::{MAX_REQUEST_BODY_SIZE, ToolRegistry, handle_request};
    use crate::mcp::auth::BearerAuthenticator;
    use axum::{
        extract::State,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
    };
    use std::sync::Arc;

    /// Shared state for HTTP transport.
    pub struct McpHttpState {
        /// Tool registry bound to the shared store.
        pub tools: ToolRegistry,
        /// Bearer token validator.
        pub authenticator: BearerAuthenticator,
    }

    fn rpc_error(code: i32, message: &str) -> serde_json::Value {
        serde_json::json!({
            "jsonrpc": "2.0",
            "error": { "code": code, "message": message }
        })
    }

    /// HTTP request handler with bearer token authentication.
    pub async fn handle_http_request(
        State(state): State<Arc<McpHttpState>>,
        headers: HeaderMap,
        body: String,
    ) -> impl IntoResponse {
        if body.len() > MAX_REQUEST_BODY_SIZE {
            tracing::warn!(
                body_size = body.len(),
                max_size = MAX_REQUEST_BODY_SIZE,
                "request body exceeds maximum size limit"
            );
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                rpc_error(-32600, "Request body too large").to_string(),
            );
        }

        let Some(auth_header) = headers
            .get("authorization")
            .and_then(|h| h.to_str().ok())
        else {
            return (
                StatusCode::UNAUTHORIZED,
                rpc_error(-32600, "Missing Authorization header").to_string(),
            );
        };

        if let Err(e) = state.authenticator.validate_header(auth_header) {
            tracing::warn!(error = %e, "rejected MCP HTTP request");
            return (
                StatusCode::UNAUTHORIZED,
                rpc_error(-32600, "Invalid bearer token").to_string(),
            );
        }

        let response = handle_request(&state.tools, "http", &body);
        (StatusCode::OK, response)
    }
}
