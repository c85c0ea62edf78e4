//! Line-delimited stdio transport.
//!
//! One JSON-RPC message per line in each direction. Requests are handled
//! strictly one after another; stdout carries nothing but responses.
//! Lines are read as raw bytes, so invalid UTF-8 is answered with a parse
//! error instead of ending the session.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::mcp::server::McpServer;

/// Serve `server` over the process's stdin and stdout until stdin closes.
pub async fn run_stdio(server: &McpServer) -> std::io::Result<()> {
    log::info!("Serving MCP over stdio");
    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();
    serve(server, reader, writer).await?;
    log::info!("stdin closed, shutting down");
    Ok(())
}

/// Serve `server` over an arbitrary line reader and writer.
pub async fn serve<R, W>(server: &McpServer, mut reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if line.trim().is_empty() {
            continue;
        }
        let Some(response) = server.handle_line(&line).await else {
            continue;
        };
        let mut payload = serde_json::to_string(&response)?;
        payload.push('\n');
        writer.write_all(payload.as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::CredentialStore;
    use crate::interfaces::testing::RecordingTransport;
    use crate::interfaces::ToolGateway;
    use crate::mcp::protocol::JsonRpcResponse;
    use std::sync::Arc;

    fn server() -> McpServer {
        let gateway = ToolGateway::new(
            Arc::new(RecordingTransport::new().respond_json(200, r#"{"id":"thibault"}"#)),
            Arc::new(CredentialStore::new()),
        );
        McpServer::new(gateway)
    }

    #[tokio::test]
    async fn test_session_round_trip() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"get_user_profile","arguments":{"username":"thibault"}}}"#,
            "\n",
        );
        let mut output = Vec::new();
        serve(&server(), input.as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let responses: Vec<JsonRpcResponse> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0].id, serde_json::json!(1));
        assert_eq!(responses[1].id, serde_json::json!(2));
        let content = &responses[2].result.as_ref().unwrap()["content"][0];
        assert_eq!(content["type"], "text");
        assert!(content["text"].as_str().unwrap().contains("thibault"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_stop_the_loop() {
        let input: &[u8] = b"\xff\xfe\n{\"jsonrpc\":\"2.0\",\"id\":4,\"method\":\"ping\"}\n";
        let mut output = Vec::new();
        serve(&server(), input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("-32700"));
        assert!(lines[1].contains("\"id\":4"));
        assert!(lines[1].contains("\"result\":{}"));
    }

    #[tokio::test]
    async fn test_garbage_line_does_not_stop_the_loop() {
        let input = "garbage\n{\"jsonrpc\":\"2.0\",\"id\":9,\"method\":\"ping\"}\n";
        let mut output = Vec::new();
        serve(&server(), input.as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("-32700"));
        assert!(lines[1].contains("\"id\":9"));
    }
}
