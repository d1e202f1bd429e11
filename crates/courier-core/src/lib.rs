//! # courier-core
//!
//! Foundation types shared by the Courier policy and context crates.
//!
//! - **Content blocks**: text and image units that appear inside tool results
//! - **Turn context**: the per-turn runtime snapshot policy predicates match on
//! - **Field universes**: the fixed sets of relocatable prompt-metadata fields
//! - **Transcript vocabulary**: line-kind markers and type guards for the
//!   durable JSONL conversation log

#![deny(unsafe_code)]

pub mod content;
pub mod context;
pub mod fields;
pub mod transcript;

pub use content::{TextContent, ToolResultContent, ToolResultMessageContent};
pub use context::{ChatType, TurnContext};
