//! Policy resolution engine.
//!
//! Composes the layered settings walk, the context matcher, and field-set
//! resolution into the two public operations. Both are pure functions over
//! their inputs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use courier_core::fields::{PER_CHANNEL_FIELDS, PER_TURN_FIELDS};
use courier_core::TurnContext;
use courier_settings::hierarchy::resolve_layered;
use courier_settings::{CourierSettings, GuardMode};

use crate::fieldset::resolve_field_set;
use crate::matcher;

/// Resolved prompt-stability policy: the fields allowed to leave the
/// stable region, per universe.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StabilityPolicy {
    /// Enabled per-turn fields.
    pub per_turn: BTreeSet<String>,
    /// Enabled per-channel fields.
    pub per_channel: BTreeSet<String>,
}

/// Resolved tool-result guard configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedToolGuard {
    /// Guard operating mode.
    pub mode: GuardMode,
    /// Post-compaction usage target, when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compaction_target: Option<f64>,
}

/// Resolve the stability policy for one turn.
///
/// The nearest hierarchy level with a stability block wins the block
/// whole. If the block carries overrides and a context was supplied, the
/// first override whose rule matches replaces *both* base selectors;
/// there is no field-level merge across overrides. No block anywhere
/// means the feature is off and both sets are empty.
#[must_use]
pub fn resolve_stability_policy(
    settings: Option<&CourierSettings>,
    agent_id: Option<&str>,
    model_key: &str,
    ctx: Option<&TurnContext>,
) -> StabilityPolicy {
    let Some(block) = resolve_layered(
        settings,
        agent_id,
        model_key,
        |m| m.stability.as_ref(),
        |l| l.stability.as_ref(),
    ) else {
        return StabilityPolicy::default();
    };

    let mut per_turn = block.per_turn_fields.as_ref();
    let mut per_channel = block.per_channel_fields.as_ref();
    if let Some(ctx) = ctx {
        if let Some(ov) = block.overrides.iter().find(|ov| matcher::matches(&ov.when, ctx)) {
            per_turn = ov.per_turn_fields.as_ref();
            per_channel = ov.per_channel_fields.as_ref();
        }
    }

    StabilityPolicy {
        per_turn: resolve_field_set(per_turn, PER_TURN_FIELDS),
        per_channel: resolve_field_set(per_channel, PER_CHANNEL_FIELDS),
    }
}

/// Resolve the tool-result guard for a model.
///
/// `mode` and `compaction_target` resolve as two independent passes over
/// the same candidate ordering, so each can come from a different
/// hierarchy level. Missing configuration degrades to
/// [`GuardMode::Default`] with no target.
#[must_use]
pub fn resolve_tool_guard(
    settings: Option<&CourierSettings>,
    agent_id: Option<&str>,
    model_key: &str,
) -> ResolvedToolGuard {
    let mode = resolve_layered(
        settings,
        agent_id,
        model_key,
        |m| m.tool_guard.as_ref().and_then(|g| g.mode.as_ref()),
        |l| l.tool_guard.as_ref().and_then(|g| g.mode.as_ref()),
    )
    .copied()
    .unwrap_or_default();

    let compaction_target = resolve_layered(
        settings,
        agent_id,
        model_key,
        |m| m.tool_guard.as_ref().and_then(|g| g.compaction_target.as_ref()),
        |l| l.tool_guard.as_ref().and_then(|g| g.compaction_target.as_ref()),
    )
    .copied();

    ResolvedToolGuard {
        mode,
        compaction_target,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
