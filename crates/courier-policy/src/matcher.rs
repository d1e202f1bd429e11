//! Context matching.
//!
//! A [`MatchRule`] matches a [`TurnContext`] iff every field present in the
//! rule matches; absent rule fields impose no constraint. Comparison is
//! case-insensitive after trimming, with `*` as the wildcard token.
//!
//! Identity-sensitive fields are stricter than vacuous: an absent context
//! value never satisfies a concrete requirement, and for `group` /
//! `groupChannel` the wildcard only matches a *present* value. `sender` is
//! the deliberate exception: its wildcard means "any sender, known or
//! not" and matches even when no identity attribute is populated.

use courier_core::{ChatType, TurnContext};
use courier_settings::{MatchRule, OneOrMany};

/// The wildcard token accepted by every string-valued rule field.
pub const WILDCARD: &str = "*";

/// Evaluate a match rule against a turn context.
#[must_use]
pub fn matches(rule: &MatchRule, ctx: &TurnContext) -> bool {
    if let Some(pred) = &rule.chat_type {
        if !scalar_matches(pred, ctx.chat_type.map(ChatType::as_str)) {
            return false;
        }
    }
    if let Some(pred) = &rule.channel {
        if !scalar_matches(pred, ctx.channel.as_deref()) {
            return false;
        }
    }
    if let Some(pred) = &rule.sender {
        if !sender_matches(pred, ctx) {
            return false;
        }
    }
    if let Some(pred) = &rule.group {
        if !identity_matches(pred, ctx.group_id.as_deref()) {
            return false;
        }
    }
    if let Some(pred) = &rule.group_channel {
        if !identity_matches(pred, ctx.group_channel.as_deref()) {
            return false;
        }
    }
    if let Some(pred) = rule.sender_is_owner {
        if ctx.sender_is_owner != Some(pred) {
            return false;
        }
    }
    if let Some(pred) = rule.is_subagent {
        if ctx.is_subagent != Some(pred) {
            return false;
        }
    }
    true
}

/// Trim and lower-case for comparison.
fn norm(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Scalar-or-list field: the context value must equal some entry, or some
/// entry is the wildcard. An absent context value fails.
fn scalar_matches(pred: &OneOrMany, value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };
    let value = norm(value);
    pred.iter().any(|entry| {
        let entry = norm(entry);
        entry == WILDCARD || entry == value
    })
}

/// Identity-list field: same comparison, but an absent or blank context
/// value never matches, not even against the wildcard.
fn identity_matches(pred: &[String], value: Option<&str>) -> bool {
    let value = norm(value.unwrap_or(""));
    if value.is_empty() {
        return false;
    }
    pred.iter().any(|entry| {
        let entry = norm(entry);
        entry == WILDCARD || entry == value
    })
}

/// Sender field: OR across the three identity attributes. The wildcard
/// matches even when none of them are populated.
fn sender_matches(pred: &[String], ctx: &TurnContext) -> bool {
    let ids = [
        ctx.sender_id.as_deref(),
        ctx.sender_e164.as_deref(),
        ctx.sender_username.as_deref(),
    ];
    pred.iter().any(|entry| {
        let entry = norm(entry);
        if entry == WILDCARD {
            return true;
        }
        ids.iter().any(|id| match id {
            Some(id) => {
                let id = norm(id);
                !id.is_empty() && id == entry
            }
            None => false,
        })
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
