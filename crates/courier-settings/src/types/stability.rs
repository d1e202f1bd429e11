//! Prompt-stability policy settings.
//!
//! A stability block controls which dynamic metadata fields may move out of
//! the stable prompt region: a base selector per field universe, plus an
//! ordered list of conditional overrides keyed by a match rule.

use serde::{Deserialize, Serialize};

/// A configured selector over a field universe.
///
/// `true` enables the whole universe, `false` disables the feature, and an
/// explicit list enables exactly the named fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSelector {
    /// Whole universe on or off.
    Enabled(bool),
    /// Explicit subset of field names.
    Fields(Vec<String>),
}

/// One value or a list of values.
///
/// Predicate fields accept either a scalar (`"group"`) or a list
/// (`["group", "channel"]`); both deserialize into this.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    /// A single value.
    One(String),
    /// A list of values.
    Many(Vec<String>),
}

impl OneOrMany {
    /// Iterate the contained values.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        match self {
            Self::One(v) => std::slice::from_ref(v).iter().map(String::as_str),
            Self::Many(vs) => vs.as_slice().iter().map(String::as_str),
        }
    }
}

/// Conjunctive match condition over a turn context.
///
/// Absent fields impose no constraint. Present fields must all match for
/// the rule to match.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchRule {
    /// Chat type(s) to match (`direct`, `group`, `channel`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_type: Option<OneOrMany>,
    /// Channel name(s) to match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<OneOrMany>,
    /// Sender identities, matched against platform id, E.164, and username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<Vec<String>>,
    /// Group ids to match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Vec<String>>,
    /// Group channel bindings to match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_channel: Option<Vec<String>>,
    /// Whether the sender must (not) be the owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_is_owner: Option<bool>,
    /// Whether the turn must (not) run inside a subagent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_subagent: Option<bool>,
}

/// A conditional replacement of the base selectors.
///
/// The first override whose `when` rule matches wins; its selectors replace
/// both base selectors entirely (no field-level merge).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StabilityOverride {
    /// Match condition.
    pub when: MatchRule,
    /// Replacement per-turn selector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_turn_fields: Option<FieldSelector>,
    /// Replacement per-channel selector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_channel_fields: Option<FieldSelector>,
}

/// Stability policy block at one hierarchy level.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StabilitySettings {
    /// Base per-turn field selector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_turn_fields: Option<FieldSelector>,
    /// Base per-channel field selector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_channel_fields: Option<FieldSelector>,
    /// Conditional overrides, evaluated in authored order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<StabilityOverride>,
}

impl StabilitySettings {
    /// Collect explicitly listed field names not present in their universe.
    ///
    /// Unknown names are inert at resolution time; this exists so the
    /// loader can diagnose them when settings load.
    #[must_use]
    pub fn unknown_field_names(&self) -> Vec<String> {
        let mut unknown = Vec::new();
        let mut check = |selector: Option<&FieldSelector>, universe: &[&str]| {
            if let Some(FieldSelector::Fields(names)) = selector {
                for name in names {
                    if !courier_core::fields::is_known_field(universe, name) {
                        unknown.push(name.clone());
                    }
                }
            }
        };
        check(
            self.per_turn_fields.as_ref(),
            courier_core::fields::PER_TURN_FIELDS,
        );
        check(
            self.per_channel_fields.as_ref(),
            courier_core::fields::PER_CHANNEL_FIELDS,
        );
        for ov in &self.overrides {
            check(
                ov.per_turn_fields.as_ref(),
                courier_core::fields::PER_TURN_FIELDS,
            );
            check(
                ov.per_channel_fields.as_ref(),
                courier_core::fields::PER_CHANNEL_FIELDS,
            );
        }
        unknown
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
