//! Token estimation for transcript content.
//!
//! Estimates are character-based approximations, good enough for budget
//! decisions; the serving backend reports exact counts after the fact.

use serde_json::Value;

use crate::constants::{CHARS_PER_TOKEN, MIN_IMAGE_TOKENS};

/// Estimate tokens for a plain text string.
#[must_use]
pub fn estimate_text_tokens(text: &str) -> u64 {
    (text.len() as u64).div_ceil(u64::from(CHARS_PER_TOKEN))
}

/// Estimate tokens for a tool result `content` value, either a plain
/// string or a list of content blocks.
#[must_use]
pub fn estimate_content_tokens(content: &Value) -> u64 {
    match content {
        Value::String(text) => estimate_text_tokens(text),
        Value::Array(blocks) => blocks.iter().map(estimate_block_tokens).sum(),
        _ => 0,
    }
}

/// Estimate tokens for one content block.
fn estimate_block_tokens(block: &Value) -> u64 {
    match block.get("type").and_then(Value::as_str) {
        Some("text") => {
            estimate_text_tokens(block.get("text").and_then(Value::as_str).unwrap_or(""))
        }
        Some("image") => {
            let data_tokens = estimate_text_tokens(
                block.get("data").and_then(Value::as_str).unwrap_or(""),
            );
            data_tokens.max(u64::from(MIN_IMAGE_TOKENS))
        }
        // Unknown block kinds are sized by their serialized form.
        _ => estimate_text_tokens(&block.to_string()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
