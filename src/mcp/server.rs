//! MCP request dispatch on top of the tool gateway.

use serde_json::{json, Value};

use super::protocol::{
    text_content, ErrorCode, JsonRpcError, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION,
    PROTOCOL_VERSION,
};
use crate::interfaces::ToolGateway;

/// Answers `initialize`, `ping`, `tools/list` and `tools/call`.
pub struct McpServer {
    gateway: ToolGateway,
    name: String,
    version: String,
}

impl McpServer {
    pub fn new(gateway: ToolGateway) -> Self {
        Self {
            gateway,
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn gateway(&self) -> &ToolGateway {
        &self.gateway
    }

    /// Handle one raw protocol line. Returns `None` when nothing must be
    /// written back (notifications).
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Unparseable request line: {}", e);
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::new(ErrorCode::ParseError, format!("Parse error: {}", e)),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle(request).await,
            Err(e) => Some(JsonRpcResponse::failure(
                id,
                JsonRpcError::new(ErrorCode::InvalidRequest, format!("Invalid request: {}", e)),
            )),
        }
    }

    /// Dispatch a parsed request.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if let Some(version) = request.jsonrpc.as_deref() {
            if version != JSONRPC_VERSION {
                return request.id.map(|id| {
                    JsonRpcResponse::failure(
                        id,
                        JsonRpcError::new(
                            ErrorCode::InvalidRequest,
                            format!("Unsupported jsonrpc version: {}", version),
                        ),
                    )
                });
            }
        }

        if request.method.starts_with("notifications/") {
            log::debug!("Notification: {}", request.method);
            return None;
        }

        let outcome = match request.method.as_str() {
            "initialize" => Ok(self.initialize()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.list_tools()),
            "tools/call" => self.call_tool(request.params.unwrap_or(Value::Null)).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        let id = request.id?;
        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn initialize(&self) -> Value {
        log::info!("Client initialized session");
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": { "listChanged": false } },
            "serverInfo": { "name": self.name, "version": self.version },
        })
    }

    fn list_tools(&self) -> Value {
        let tools: Vec<Value> = self.gateway.tools().map(|t| t.descriptor()).collect();
        json!({ "tools": tools })
    }

    async fn call_tool(&self, params: Value) -> Result<Value, JsonRpcError> {
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| JsonRpcError::invalid_params("tools/call requires a string 'name'"))?;
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        match self.gateway.invoke(name, arguments).await {
            Ok(text) => Ok(text_content(text)),
            Err(error) => {
                log::debug!("{} failed: {} ({})", name, error, error.kind());
                Err(JsonRpcError::from(&error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::CredentialStore;
    use crate::interfaces::response::ContentKind;
    use crate::interfaces::testing::RecordingTransport;
    use std::sync::Arc;

    fn server(transport: RecordingTransport) -> (McpServer, Arc<RecordingTransport>) {
        let transport = Arc::new(transport);
        let gateway = ToolGateway::new(transport.clone(), Arc::new(CredentialStore::new()));
        (McpServer::new(gateway), transport)
    }

    async fn call(server: &McpServer, line: &str) -> JsonRpcResponse {
        server.handle_line(line).await.unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let (server, _) = server(RecordingTransport::new());
        let response = call(
            &server,
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05"}}"#,
        )
        .await;
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "lichess-mcp");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_initialized_notification_has_no_response() {
        let (server, _) = server(RecordingTransport::new());
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_tools_list_contains_catalogue() {
        let (server, _) = server(RecordingTransport::new());
        let response = call(&server, r#"{"jsonrpc":"2.0","id":"a","method":"tools/list"}"#).await;
        let tools = response.result.unwrap()["tools"].as_array().cloned().unwrap();
        assert_eq!(tools.len(), server.gateway().tools().count());
        let profile = tools.iter().find(|t| t["name"] == "get_user_profile").unwrap();
        assert_eq!(profile["inputSchema"]["required"], json!(["username"]));
    }

    #[tokio::test]
    async fn test_tools_call_returns_text_content() {
        let (server, transport) = server(
            RecordingTransport::new().respond(200, ContentKind::Pgn, "1. d4 d5 *"),
        );
        let response = call(
            &server,
            r#"{"jsonrpc":"2.0","id":7,"method":"tools/call","params":{"name":"export_game","arguments":{"game_id":"abcdefgh"}}}"#,
        )
        .await;
        assert_eq!(response.id, json!(7));
        assert_eq!(
            response.result.unwrap(),
            json!({"content": [{"type": "text", "text": "1. d4 d5 *"}]})
        );
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_tool_validation_error_is_invalid_params() {
        let (server, transport) = server(RecordingTransport::new());
        let response = call(
            &server,
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"get_user_profile","arguments":{}}}"#,
        )
        .await;
        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert_eq!(error.data, Some(json!({"kind": "ValidationError"})));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_credential_is_internal_error() {
        let (server, _) = server(RecordingTransport::new());
        let response = call(
            &server,
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"get_my_profile"}}"#,
        )
        .await;
        let error = response.error.unwrap();
        assert_eq!(error.code, -32603);
        assert_eq!(error.data, Some(json!({"kind": "MissingCredential"})));
    }

    #[tokio::test]
    async fn test_parse_error_and_unknown_method() {
        let (server, _) = server(RecordingTransport::new());
        let response = call(&server, "{not json").await;
        assert_eq!(response.id, Value::Null);
        assert_eq!(response.error.unwrap().code, -32700);

        let response = call(&server, r#"{"jsonrpc":"2.0","id":4,"method":"resources/list"}"#).await;
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_call_without_name() {
        let (server, _) = server(RecordingTransport::new());
        let response = call(
            &server,
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{}}"#,
        )
        .await;
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_null_id_gets_a_response() {
        let (server, _) = server(RecordingTransport::new());
        let response = call(&server, r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#).await;
        assert_eq!(response.id, Value::Null);
        assert_eq!(response.result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_ping() {
        let (server, _) = server(RecordingTransport::new());
        let response = call(&server, r#"{"jsonrpc":"2.0","id":6,"method":"ping"}"#).await;
        assert_eq!(response.result, Some(json!({})));
    }
}
