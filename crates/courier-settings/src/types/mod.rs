//! Settings type definitions.
//!
//! The settings document is camelCase JSON. Policy blocks hang off four
//! hierarchy levels: agent+model, agent, global+model, global. The global
//! level is the `prompt` layer; agents get their own layer under `agents`;
//! both carry a `models` map keyed by exact model key or `provider/*`.

mod guard;
mod stability;

pub use guard::{GuardMode, ToolGuardSettings};
pub use stability::{
    FieldSelector, MatchRule, OneOrMany, StabilityOverride, StabilitySettings,
};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::Result;

/// Policy blocks for one model key within a layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelLayer {
    /// Stability policy for this model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability: Option<StabilitySettings>,
    /// Tool-result guard for this model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_guard: Option<ToolGuardSettings>,
}

/// Policy blocks at the global or agent level.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptLayer {
    /// Stability policy at this level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability: Option<StabilitySettings>,
    /// Tool-result guard at this level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_guard: Option<ToolGuardSettings>,
    /// Per-model overrides, keyed by exact model key or `provider/*`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub models: BTreeMap<String, ModelLayer>,
}

/// Top-level settings document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourierSettings {
    /// Settings schema version.
    pub version: u32,
    /// Global defaults layer.
    pub prompt: PromptLayer,
    /// Per-agent layers.
    pub agents: BTreeMap<String, PromptLayer>,
}

impl Default for CourierSettings {
    fn default() -> Self {
        Self {
            version: 1,
            prompt: PromptLayer::default(),
            agents: BTreeMap::new(),
        }
    }
}

impl CourierSettings {
    /// Validate value ranges and diagnose unknown field names.
    ///
    /// Out-of-range values are errors; field names outside their universe
    /// only warn, since they are inert at resolution time.
    pub fn validate(&self) -> Result<()> {
        let mut layers: Vec<(&str, &PromptLayer)> = vec![("prompt", &self.prompt)];
        layers.extend(self.agents.iter().map(|(id, l)| (id.as_str(), l)));

        for (scope, layer) in layers {
            validate_blocks(scope, layer.stability.as_ref(), layer.tool_guard.as_ref())?;
            for (model, entry) in &layer.models {
                validate_blocks(model, entry.stability.as_ref(), entry.tool_guard.as_ref())?;
            }
        }
        Ok(())
    }
}

fn validate_blocks(
    scope: &str,
    stability: Option<&StabilitySettings>,
    guard: Option<&ToolGuardSettings>,
) -> Result<()> {
    if let Some(stability) = stability {
        let unknown = stability.unknown_field_names();
        if !unknown.is_empty() {
            warn!(scope, fields = ?unknown, "unknown field names in stability selector");
        }
    }
    if let Some(guard) = guard {
        guard.validate()?;
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
