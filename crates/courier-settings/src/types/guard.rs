//! Tool-result guard settings.
//!
//! The guard decides whether compacted tool results are rewritten into the
//! durable session log (`persistent`), kept in memory only (`default`), or
//! left alone entirely (`disabled`), and how aggressively compaction frees
//! space.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Guard operating mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardMode {
    /// Compaction stays in memory; the log is never rewritten.
    #[default]
    Default,
    /// The guard is off; no compaction at all.
    Disabled,
    /// Compaction is rewritten into the session log.
    Persistent,
}

/// Tool-result guard block at one hierarchy level.
///
/// `mode` and `compaction_target` resolve independently across the
/// hierarchy: the first level that defines each one wins for that one
/// field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolGuardSettings {
    /// Guard operating mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<GuardMode>,
    /// Post-compaction usage target as a ratio of the context window,
    /// strictly between 0 and 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compaction_target: Option<f64>,
}

impl ToolGuardSettings {
    /// Validate value ranges.
    pub fn validate(&self) -> Result<()> {
        if let Some(target) = self.compaction_target {
            if !(target > 0.0 && target < 1.0) {
                return Err(SettingsError::InvalidValue(format!(
                    "compactionTarget must be strictly between 0 and 1, got {target}"
                )));
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(GuardMode::Persistent).unwrap(),
            json!("persistent")
        );
        assert_eq!(
            serde_json::from_value::<GuardMode>(json!("disabled")).unwrap(),
            GuardMode::Disabled
        );
    }

    #[test]
    fn mode_default_is_default() {
        assert_eq!(GuardMode::default(), GuardMode::Default);
    }

    #[test]
    fn guard_partial_json() {
        let g: ToolGuardSettings =
            serde_json::from_value(json!({"compactionTarget": 0.5})).unwrap();
        assert!(g.mode.is_none());
        assert_eq!(g.compaction_target, Some(0.5));
    }

    #[test]
    fn validate_accepts_open_interval() {
        for target in [0.01, 0.5, 0.99] {
            let g = ToolGuardSettings {
                compaction_target: Some(target),
                ..ToolGuardSettings::default()
            };
            assert!(g.validate().is_ok(), "failed for {target}");
        }
    }

    #[test]
    fn validate_rejects_bounds_and_outside() {
        for target in [0.0, 1.0, -0.2, 1.5] {
            let g = ToolGuardSettings {
                compaction_target: Some(target),
                ..ToolGuardSettings::default()
            };
            assert!(g.validate().is_err(), "accepted {target}");
        }
    }

    #[test]
    fn validate_accepts_absent_target() {
        assert!(ToolGuardSettings::default().validate().is_ok());
    }
}
