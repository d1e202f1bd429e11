//! Tool-result guard enforcement.
//!
//! Composes the resolved guard configuration with the planner and the
//! rewriter. The guard mode decides durability: `disabled` leaves the
//! context alone, `default` plans in memory only, `persistent` also
//! rewrites the session log so the compacted shape survives restarts and
//! stays byte-identical across turns.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use courier_policy::ResolvedToolGuard;
use courier_settings::GuardMode;

use crate::constants::TOOL_RESULT_PLACEHOLDER;
use crate::planner::{plan_compaction, should_compact, CompactionCandidate, CompactionPlan};
use crate::rewriter::{persist_compaction, PersistOutcome};

/// Current context usage, as estimated or reported by the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextUsage {
    /// Tokens currently in context.
    pub current_tokens: u64,
    /// The model's context window.
    pub context_window: u64,
}

/// What the guard did this turn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GuardOutcome {
    /// The compaction plan (empty when nothing was needed).
    pub plan: CompactionPlan,
    /// The persistence report (default when nothing was written).
    pub persist: PersistOutcome,
}

/// Enforce the tool-result guard for one turn.
///
/// Does nothing unless usage has crossed the trigger ratio. The plan's
/// victims are applied to the in-memory context by the caller; the log is
/// only rewritten in `persistent` mode with a log path supplied.
pub fn enforce_tool_result_guard(
    guard: &ResolvedToolGuard,
    usage: ContextUsage,
    candidates: &[CompactionCandidate],
    log_path: Option<&Path>,
    warn: &mut dyn FnMut(String),
) -> GuardOutcome {
    if guard.mode == GuardMode::Disabled {
        return GuardOutcome::default();
    }
    if !should_compact(usage.current_tokens, usage.context_window) {
        return GuardOutcome::default();
    }

    let plan = plan_compaction(
        candidates,
        usage.current_tokens,
        usage.context_window,
        guard.compaction_target,
    );

    let persist = match (guard.mode, log_path) {
        (GuardMode::Persistent, Some(path)) if !plan.is_empty() => {
            let ids: BTreeSet<String> = plan.tool_call_ids.iter().cloned().collect();
            persist_compaction(path, &ids, TOOL_RESULT_PLACEHOLDER, warn)
        }
        (GuardMode::Persistent, None) if !plan.is_empty() => {
            warn("persistent tool guard has no session log path; compaction kept in memory only".to_owned());
            PersistOutcome::default()
        }
        _ => PersistOutcome::default(),
    };

    GuardOutcome { plan, persist }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
