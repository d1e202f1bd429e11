//! Context subsystem constants.

// =============================================================================
// Token Estimation
// =============================================================================

/// Approximate characters per token.
pub const CHARS_PER_TOKEN: u32 = 4;

/// Minimum token estimate for any image block.
pub const MIN_IMAGE_TOKENS: u32 = 85;

// =============================================================================
// Compaction
// =============================================================================

/// Context usage ratio that triggers tool-result compaction.
pub const COMPACTION_TRIGGER_RATIO: f64 = 0.75;

/// Placeholder text substituted for compacted tool result content.
pub const TOOL_RESULT_PLACEHOLDER: &str =
    "[tool result content pruned to conserve context]";
