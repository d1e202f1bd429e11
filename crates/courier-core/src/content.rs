//! Content block types.
//!
//! The primitive building blocks that appear inside tool result messages.
//! The wire shape is `{"type": "text", "text": ...}` style tagged objects,
//! shared with the transcript format on disk.

use serde::{Deserialize, Serialize};

/// Text content block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "text")]
pub struct TextContent {
    /// The text content.
    pub text: String,
}

impl TextContent {
    /// Create a new text content block.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Content that can appear in tool result messages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolResultContent {
    /// Text content.
    #[serde(rename = "text")]
    Text {
        /// The text.
        text: String,
    },
    /// Image content.
    #[serde(rename = "image")]
    Image {
        /// Base64-encoded image data.
        data: String,
        /// MIME type.
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
}

impl ToolResultContent {
    /// Create a text tool result content block.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create an image tool result content block.
    #[must_use]
    pub fn image(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::Image {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Returns the text if this is a text block, `None` otherwise.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Image { .. } => None,
        }
    }
}

/// Content of a tool result message: either a plain string or structured blocks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolResultMessageContent {
    /// Simple text.
    Text(String),
    /// Structured content blocks.
    Blocks(Vec<ToolResultContent>),
}

impl ToolResultMessageContent {
    /// Create plain-string content.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// Extract text from tool result content blocks.
#[must_use]
pub fn extract_text_from_tool_result_content(content: &[ToolResultContent]) -> String {
    content
        .iter()
        .filter_map(ToolResultContent::as_text)
        .collect::<Vec<_>>()
        .join("\n")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_content_serde_roundtrip() {
        let tc = TextContent::new("hello");
        let json = serde_json::to_value(&tc).unwrap();
        assert_eq!(json, json!({"type": "text", "text": "hello"}));
        let back: TextContent = serde_json::from_value(json).unwrap();
        assert_eq!(back, tc);
    }

    #[test]
    fn tool_result_content_text() {
        let trc = ToolResultContent::text("output");
        let json = serde_json::to_value(&trc).unwrap();
        assert_eq!(json, json!({"type": "text", "text": "output"}));
    }

    #[test]
    fn tool_result_content_image_serde() {
        let trc = ToolResultContent::image("imgdata", "image/png");
        let json = serde_json::to_value(&trc).unwrap();
        assert_eq!(
            json,
            json!({"type": "image", "data": "imgdata", "mimeType": "image/png"})
        );
        let back: ToolResultContent = serde_json::from_value(json).unwrap();
        assert_eq!(trc, back);
    }

    #[test]
    fn message_content_string_form_is_untagged() {
        let c = ToolResultMessageContent::text("done");
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json, json!("done"));
    }

    #[test]
    fn message_content_block_form_roundtrip() {
        let c = ToolResultMessageContent::Blocks(vec![
            ToolResultContent::text("line1"),
            ToolResultContent::image("d", "image/png"),
        ]);
        let json = serde_json::to_value(&c).unwrap();
        let back: ToolResultMessageContent = serde_json::from_value(json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn extract_text_skips_images() {
        let content = vec![
            ToolResultContent::text("line1"),
            ToolResultContent::image("d", "image/png"),
            ToolResultContent::text("line2"),
        ];
        assert_eq!(
            extract_text_from_tool_result_content(&content),
            "line1\nline2"
        );
    }

    #[test]
    fn extract_text_empty() {
        assert_eq!(extract_text_from_tool_result_content(&[]), "");
    }
}
