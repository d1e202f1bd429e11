//! Compaction planning.
//!
//! Triggered when estimated context usage crosses
//! [`COMPACTION_TRIGGER_RATIO`] of the model's context window. The planner
//! walks eligible tool results oldest to newest, accumulating estimated
//! freed tokens, and stops as soon as projected usage falls at or below
//! the target ratio. Oldest-first ordering maximizes the chance that
//! identical prompt prefixes survive across turns.
//!
//! Callers pre-filter candidates to exclude already-compacted results.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::COMPACTION_TRIGGER_RATIO;

/// One eligible tool result, oldest entries first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactionCandidate {
    /// Tool call id identifying the result in the transcript.
    pub tool_call_id: String,
    /// Estimated tokens freed by compacting this result.
    pub estimated_tokens: u64,
}

/// Decision output of the planner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactionPlan {
    /// Tool call ids to compact, oldest first.
    pub tool_call_ids: Vec<String>,
    /// Whether the projected usage reached the target. `false` when all
    /// candidates were exhausted first; partial compaction is a valid
    /// degraded outcome, not an error.
    pub reached_target: bool,
}

impl CompactionPlan {
    /// Returns `true` if the plan compacts nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tool_call_ids.is_empty()
    }
}

/// Returns `true` when usage is at or above the trigger ratio.
#[must_use]
pub fn should_compact(current_tokens: u64, context_window: u64) -> bool {
    if context_window == 0 {
        return false;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = current_tokens as f64 / context_window as f64;
    ratio >= COMPACTION_TRIGGER_RATIO
}

/// Pick which candidates to compact to get back under budget.
///
/// `target_ratio` defaults to the trigger ratio itself: free just enough
/// to get back under budget.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn plan_compaction(
    candidates: &[CompactionCandidate],
    current_tokens: u64,
    context_window: u64,
    target_ratio: Option<f64>,
) -> CompactionPlan {
    if context_window == 0 {
        return CompactionPlan::default();
    }
    let target = target_ratio.unwrap_or(COMPACTION_TRIGGER_RATIO);
    let budget = target * context_window as f64;

    if current_tokens as f64 <= budget {
        return CompactionPlan {
            tool_call_ids: Vec::new(),
            reached_target: true,
        };
    }

    let mut freed: u64 = 0;
    let mut tool_call_ids = Vec::new();
    let mut reached_target = false;
    for candidate in candidates {
        tool_call_ids.push(candidate.tool_call_id.clone());
        freed += candidate.estimated_tokens;
        if current_tokens.saturating_sub(freed) as f64 <= budget {
            reached_target = true;
            break;
        }
    }

    debug!(
        victims = tool_call_ids.len(),
        freed, reached_target, "planned tool result compaction"
    );
    CompactionPlan {
        tool_call_ids,
        reached_target,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
