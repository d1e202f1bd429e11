//! Crash-safe session log rewriting.
//!
//! Replaces the content of compacted tool results in the durable JSONL
//! conversation log with a placeholder, leaving every other byte of the
//! file untouched. The rewrite is all-or-nothing: content is fully
//! buffered, written to a sibling temp file, and swapped in with a single
//! rename. A concurrent reader sees either the old file or the new one,
//! never a partial state.
//!
//! Nothing here returns `Result`. Failure is reported as
//! `persisted: false` plus a message through the caller-supplied warning
//! sink; the conversation must keep flowing whether or not the rewrite
//! landed.

use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use courier_core::content::TextContent;
use courier_core::transcript;

/// Report of one persistence attempt.
///
/// `updated` counts rewritten entries and is zero unless the rename
/// landed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PersistOutcome {
    /// Whether the rewritten log replaced the original.
    pub persisted: bool,
    /// Number of entries whose content was replaced.
    pub updated: usize,
}

/// Rewrite the tool results named by `tool_call_ids` to the placeholder.
///
/// Blank lines, lines that fail to parse, entries of other kinds, and
/// entries already holding the placeholder pass through byte-identical.
/// If nothing needs rewriting the file is not touched at all.
pub fn persist_compaction(
    path: &Path,
    tool_call_ids: &BTreeSet<String>,
    placeholder: &str,
    warn: &mut dyn FnMut(String),
) -> PersistOutcome {
    if tool_call_ids.is_empty() {
        return PersistOutcome::default();
    }

    let original = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            warn(format!(
                "failed to read session log {}: {err}",
                path.display()
            ));
            return PersistOutcome::default();
        }
    };

    let mut rewritten = String::with_capacity(original.len());
    let mut updated = 0usize;
    for segment in original.split_inclusive('\n') {
        let (line, terminator) = split_terminator(segment);
        match rewrite_line(line, tool_call_ids, placeholder) {
            Some(new_line) => {
                updated += 1;
                rewritten.push_str(&new_line);
            }
            None => rewritten.push_str(line),
        }
        rewritten.push_str(terminator);
    }

    if updated == 0 {
        return PersistOutcome::default();
    }

    match write_atomic(path, &rewritten) {
        Ok(()) => {
            debug!(?path, updated, "persisted tool result compaction");
            PersistOutcome {
                persisted: true,
                updated,
            }
        }
        Err(err) => {
            warn(format!(
                "failed to rewrite session log {}: {err}",
                path.display()
            ));
            PersistOutcome::default()
        }
    }
}

/// Split a `split_inclusive` segment into line content and terminator.
fn split_terminator(segment: &str) -> (&str, &str) {
    if let Some(line) = segment.strip_suffix("\r\n") {
        (line, "\r\n")
    } else if let Some(line) = segment.strip_suffix('\n') {
        (line, "\n")
    } else {
        (segment, "")
    }
}

/// Rewrite one line if it is a targeted, not-yet-compacted tool result.
///
/// Returns the replacement line, or `None` to pass the original through.
fn rewrite_line(
    line: &str,
    tool_call_ids: &BTreeSet<String>,
    placeholder: &str,
) -> Option<String> {
    if line.trim().is_empty() {
        return None;
    }
    let mut value: Value = serde_json::from_str(line).ok()?;
    let is_target = transcript::tool_result_call_id(&value)
        .is_some_and(|id| tool_call_ids.contains(id));
    if !is_target {
        return None;
    }
    let message = transcript::message_body_mut(&mut value)?;
    compact_message(message, placeholder).then(|| value.to_string())
}

/// Replace a tool result message's content with the placeholder.
///
/// A string stays a string; any other shape becomes a single-element list
/// holding the placeholder as a text block. The auxiliary `details` field
/// is dropped. Returns `false` without mutating when the content already
/// holds the placeholder in either shape.
fn compact_message(message: &mut Value, placeholder: &str) -> bool {
    let Some(obj) = message.as_object_mut() else {
        return false;
    };
    if is_placeholder_content(obj.get("content"), placeholder) {
        return false;
    }
    let replacement = match obj.get("content") {
        Some(Value::String(_)) => Value::String(placeholder.to_owned()),
        _ => {
            let block = serde_json::to_value(TextContent::new(placeholder))
                .unwrap_or_else(|_| Value::String(placeholder.to_owned()));
            Value::Array(vec![block])
        }
    };
    let _ = obj.insert("content".to_owned(), replacement);
    let _ = obj.remove("details");
    true
}

/// Already-compacted detection, for both content shapes.
fn is_placeholder_content(content: Option<&Value>, placeholder: &str) -> bool {
    match content {
        Some(Value::String(text)) => text == placeholder,
        Some(Value::Array(items)) => {
            items.len() == 1
                && items[0].get("type").and_then(Value::as_str) == Some("text")
                && items[0].get("text").and_then(Value::as_str) == Some(placeholder)
        }
        _ => false,
    }
}

/// Write content to a sibling temp file and atomically rename it over the
/// original, preserving the original's permission bits when obtainable.
///
/// On any failure the temp file is cleaned up on drop and the original is
/// left untouched; the rename is the only mutation other readers can
/// observe.
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".session-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    if let Ok(meta) = fs::metadata(path) {
        let _ = fs::set_permissions(tmp.path(), meta.permissions());
    }
    let _ = tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
