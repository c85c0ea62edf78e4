//! Response normalization.
//!
//! The decoding strategy is chosen from the declared media type only, never
//! from the shape of the payload:
//!
//! | Content-Type               | Result                          |
//! |----------------------------|---------------------------------|
//! | `application/x-chess-pgn`  | `Text`, verbatim                |
//! | `application/x-ndjson`     | `RecordStream`, one per line    |
//! | `text/plain`               | `Text`, verbatim                |
//! | anything else              | `Json`, whole body              |

use serde_json::Value;

use super::error::ToolError;

/// Media kind declared by a response's `Content-Type` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Json,
    Ndjson,
    Pgn,
    PlainText,
    /// Missing or unrecognised header; decoded as JSON.
    Other,
}

impl ContentKind {
    /// Classify a raw `Content-Type` header value (parameters ignored).
    pub fn from_header(header: Option<&str>) -> Self {
        let Some(raw) = header else {
            return ContentKind::Other;
        };
        let mime = raw
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match mime.as_str() {
            "application/json" => ContentKind::Json,
            "application/x-ndjson" | "application/ndjson" => ContentKind::Ndjson,
            "application/x-chess-pgn" | "application/vnd.chess-pgn" => ContentKind::Pgn,
            "text/plain" => ContentKind::PlainText,
            _ => ContentKind::Other,
        }
    }
}

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedResult {
    Text(String),
    Json(Value),
    RecordStream(Vec<Value>),
}

impl NormalizedResult {
    /// Collapse into the single text payload handed back to the caller.
    ///
    /// JSON documents and record streams are pretty-printed; text is
    /// returned untouched.
    pub fn render(&self) -> String {
        match self {
            NormalizedResult::Text(text) => text.clone(),
            NormalizedResult::Json(value) => pretty(value),
            NormalizedResult::RecordStream(records) => {
                serde_json::to_string_pretty(records).unwrap_or_else(|_| format!("{:?}", records))
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, NormalizedResult::Text(text) if text.is_empty())
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Decode `body` according to `kind`.
///
/// A successful but empty body yields `Text("")`, except for NDJSON where it
/// is an empty record stream.
pub fn normalize(kind: ContentKind, body: &[u8]) -> Result<NormalizedResult, ToolError> {
    let text = std::str::from_utf8(body)
        .map_err(|e| ToolError::parse(format!("response body is not valid UTF-8: {}", e)))?;

    if text.trim().is_empty() && kind != ContentKind::Ndjson {
        return Ok(NormalizedResult::Text(String::new()));
    }

    match kind {
        ContentKind::Pgn | ContentKind::PlainText => Ok(NormalizedResult::Text(text.to_string())),
        ContentKind::Ndjson => parse_ndjson(text).map(NormalizedResult::RecordStream),
        ContentKind::Json | ContentKind::Other => serde_json::from_str(text)
            .map(NormalizedResult::Json)
            .map_err(|e| ToolError::parse(format!("invalid JSON response: {}", e))),
    }
}

/// Parse newline-delimited JSON. Blank lines are skipped; a malformed line
/// fails the whole decode.
pub fn parse_ndjson(text: &str) -> Result<Vec<Value>, ToolError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|e| {
                ToolError::parse(format!("invalid NDJSON record on line {}: {}", index + 1, e))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_content_kind_from_header() {
        assert_eq!(
            ContentKind::from_header(Some("application/json; charset=utf-8")),
            ContentKind::Json
        );
        assert_eq!(
            ContentKind::from_header(Some("application/x-ndjson")),
            ContentKind::Ndjson
        );
        assert_eq!(
            ContentKind::from_header(Some("Application/X-Chess-PGN")),
            ContentKind::Pgn
        );
        assert_eq!(
            ContentKind::from_header(Some("text/plain; charset=utf-8")),
            ContentKind::PlainText
        );
        assert_eq!(ContentKind::from_header(Some("text/html")), ContentKind::Other);
        assert_eq!(ContentKind::from_header(None), ContentKind::Other);
    }

    #[test]
    fn test_ndjson_skips_blank_lines_and_keeps_order() {
        let result = normalize(ContentKind::Ndjson, b"{\"a\":1}\n\n{\"a\":2}\n").unwrap();
        assert_eq!(
            result,
            NormalizedResult::RecordStream(vec![json!({"a": 1}), json!({"a": 2})])
        );
    }

    #[test]
    fn test_ndjson_malformed_line_is_parse_error() {
        let err = normalize(ContentKind::Ndjson, b"{\"a\":1}\n{oops\n{\"a\":3}\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseError);
        assert!(err.message.contains("line 2"));
    }

    #[test]
    fn test_pgn_passthrough_is_verbatim() {
        let result = normalize(ContentKind::Pgn, b"1. e4 e5 *").unwrap();
        assert_eq!(result, NormalizedResult::Text("1. e4 e5 *".to_string()));
        assert_eq!(result.render(), "1. e4 e5 *");
    }

    #[test]
    fn test_pgn_that_looks_like_json_stays_text() {
        let result = normalize(ContentKind::Pgn, b"{\"not\":\"decoded\"}").unwrap();
        assert_eq!(result, NormalizedResult::Text("{\"not\":\"decoded\"}".to_string()));
    }

    #[test]
    fn test_json_and_unknown_kind_parse_whole_body() {
        let body = b"{\"id\":\"magnus\",\"count\":{\"all\":3}}";
        let json = normalize(ContentKind::Json, body).unwrap();
        let other = normalize(ContentKind::Other, body).unwrap();
        assert_eq!(json, other);
        assert_eq!(json, NormalizedResult::Json(json!({"id": "magnus", "count": {"all": 3}})));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = normalize(ContentKind::Json, b"<html>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseError);
    }

    #[test]
    fn test_empty_body_is_empty_text() {
        let result = normalize(ContentKind::Json, b"  \n").unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_ndjson_is_empty_stream() {
        let result = normalize(ContentKind::Ndjson, b"").unwrap();
        assert_eq!(result, NormalizedResult::RecordStream(vec![]));
        assert!(!result.is_empty());
        assert_eq!(result.render(), "[]");

        let result = normalize(ContentKind::Ndjson, b"\n\n").unwrap();
        assert_eq!(result, NormalizedResult::RecordStream(vec![]));
    }

    #[test]
    fn test_render_pretty_prints_json() {
        let rendered = NormalizedResult::Json(json!({"ok": true})).render();
        assert_eq!(rendered, "{\n  \"ok\": true\n}");

        let rendered = NormalizedResult::RecordStream(vec![json!(1), json!(2)]).render();
        assert_eq!(rendered, "[\n  1,\n  2\n]");
    }
}
