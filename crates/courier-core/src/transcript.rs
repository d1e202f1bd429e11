//! Transcript line vocabulary.
//!
//! The durable conversation log is line-oriented JSON: each non-blank line
//! is an independently parseable object tagged by `kind`. Message lines
//! nest the conversation message under `message`, keeping line-level
//! metadata (ids, timestamps, anything a platform adds) alongside it.
//!
//! The helpers here work on untyped [`Value`]s because the log rewriter
//! must preserve unknown keys byte-for-byte; only the fields it understands
//! are ever touched.

use serde_json::Value;

use crate::content::ToolResultMessageContent;

/// Line kind for the session header entry.
pub const KIND_SESSION: &str = "session";

/// Line kind for conversation message entries.
pub const KIND_MESSAGE: &str = "message";

/// Role marker for tool result messages.
pub const ROLE_TOOL_RESULT: &str = "toolResult";

/// Returns the `kind` marker of a transcript line, if present.
#[must_use]
pub fn line_kind(line: &Value) -> Option<&str> {
    line.get("kind").and_then(Value::as_str)
}

/// Returns the nested message object of a message line.
#[must_use]
pub fn message_body(line: &Value) -> Option<&Value> {
    if line_kind(line) != Some(KIND_MESSAGE) {
        return None;
    }
    line.get("message")
}

/// Returns the nested message object of a message line, mutably.
pub fn message_body_mut(line: &mut Value) -> Option<&mut Value> {
    if line_kind(line) != Some(KIND_MESSAGE) {
        return None;
    }
    line.get_mut("message")
}

/// Normalize a tool result call id. Handles both `toolCallId` and
/// `tool_use_id` spellings.
#[must_use]
pub fn normalize_tool_result_id(message: &Value) -> Option<&str> {
    message
        .get("toolCallId")
        .or_else(|| message.get("tool_use_id"))
        .and_then(Value::as_str)
}

/// Returns `true` if a transcript line is a tool result message.
#[must_use]
pub fn is_tool_result_line(line: &Value) -> bool {
    message_body(line)
        .and_then(|m| m.get("role"))
        .and_then(Value::as_str)
        == Some(ROLE_TOOL_RESULT)
}

/// Returns the call id of a tool result line, if it is one.
#[must_use]
pub fn tool_result_call_id(line: &Value) -> Option<&str> {
    if !is_tool_result_line(line) {
        return None;
    }
    message_body(line).and_then(normalize_tool_result_id)
}

/// Build a tool result message line.
///
/// Used by transcript writers and test fixtures; the rewriter itself never
/// constructs whole lines.
#[must_use]
pub fn tool_result_line(
    tool_call_id: &str,
    content: &ToolResultMessageContent,
    details: Option<Value>,
) -> Value {
    let mut message = serde_json::json!({
        "role": ROLE_TOOL_RESULT,
        "toolCallId": tool_call_id,
        "content": content,
    });
    if let Some(details) = details {
        message["details"] = details;
    }
    serde_json::json!({"kind": KIND_MESSAGE, "message": message})
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn line_kind_reads_marker() {
        assert_eq!(line_kind(&json!({"kind": "session"})), Some("session"));
        assert_eq!(line_kind(&json!({"kind": "message"})), Some("message"));
        assert_eq!(line_kind(&json!({"other": 1})), None);
    }

    #[test]
    fn message_body_requires_message_kind() {
        let line = json!({"kind": "session", "message": {"role": "user"}});
        assert!(message_body(&line).is_none());
        let line = json!({"kind": "message", "message": {"role": "user"}});
        assert_eq!(message_body(&line).unwrap()["role"], "user");
    }

    #[test]
    fn normalize_id_prefers_camel_case() {
        let m = json!({"toolCallId": "tc-1", "tool_use_id": "tc-2"});
        assert_eq!(normalize_tool_result_id(&m), Some("tc-1"));
    }

    #[test]
    fn normalize_id_accepts_snake_case() {
        let m = json!({"tool_use_id": "tc-2"});
        assert_eq!(normalize_tool_result_id(&m), Some("tc-2"));
    }

    #[test]
    fn tool_result_detection() {
        let line = tool_result_line(
            "tc-1",
            &ToolResultMessageContent::text("output"),
            None,
        );
        assert!(is_tool_result_line(&line));
        assert_eq!(tool_result_call_id(&line), Some("tc-1"));
    }

    #[test]
    fn user_message_is_not_tool_result() {
        let line = json!({"kind": "message", "message": {"role": "user", "content": "hi"}});
        assert!(!is_tool_result_line(&line));
        assert!(tool_result_call_id(&line).is_none());
    }

    #[test]
    fn tool_result_line_carries_details() {
        let line = tool_result_line(
            "tc-9",
            &ToolResultMessageContent::text("ok"),
            Some(json!({"exitCode": 0})),
        );
        assert_eq!(line["message"]["details"]["exitCode"], 0);
        assert_eq!(line["message"]["content"], "ok");
    }
}
