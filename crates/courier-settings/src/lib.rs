//! # courier-settings
//!
//! Configuration for the Courier prompt-cache policy engine.
//!
//! - **Types**: stability policy blocks, tool-result guard blocks, and the
//!   four-level agent/model hierarchy they hang off of
//! - **Hierarchy**: the ordered-candidate resolution primitive with
//!   exact-then-`provider/*` model lookup
//! - **Loader**: JSON settings file with deep merge over compiled defaults,
//!   environment overrides, and load-time validation

#![deny(unsafe_code)]

pub mod errors;
pub mod hierarchy;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use types::{
    CourierSettings, FieldSelector, GuardMode, MatchRule, ModelLayer, OneOrMany,
    PromptLayer, StabilityOverride, StabilitySettings, ToolGuardSettings,
};
