//! # courier-policy
//!
//! Pure policy resolution for the Courier prompt cache.
//!
//! - **Field sets**: normalize a configured selector into a concrete set of
//!   enabled field names
//! - **Matcher**: evaluate a conjunctive match rule against a turn context
//! - **Engine**: the two public operations, stability policy resolution
//!   and tool-result guard resolution
//!
//! Everything here is a pure, synchronous computation over immutable
//! inputs; there is no I/O and no shared state.

#![deny(unsafe_code)]

pub mod engine;
pub mod fieldset;
pub mod matcher;

pub use engine::{
    resolve_stability_policy, resolve_tool_guard, ResolvedToolGuard, StabilityPolicy,
};
pub use fieldset::resolve_field_set;
pub use matcher::matches;
