//! # courier-context
//!
//! Context-budget enforcement for the Courier agent.
//!
//! - **Token estimator**: chars-per-token sizing of transcript content
//! - **Planner**: picks which trailing-old tool results to compact once
//!   usage crosses the trigger ratio
//! - **Rewriter**: crash-safe rewrite of the durable session log,
//!   replacing compacted tool result content with a placeholder
//! - **Guard**: composes the resolved guard mode with planner and rewriter
//!
//! Oldest results are compacted first so that identical prompt prefixes
//! survive across turns. A rewritten entry is detected on later runs and
//! never rewritten twice, so repeated compaction converges instead of
//! oscillating between prompt shapes.

#![deny(unsafe_code)]

pub mod constants;
pub mod guard;
pub mod planner;
pub mod rewriter;
pub mod token_estimator;

pub use guard::{enforce_tool_result_guard, ContextUsage, GuardOutcome};
pub use planner::{plan_compaction, should_compact, CompactionCandidate, CompactionPlan};
pub use rewriter::{persist_compaction, PersistOutcome};
