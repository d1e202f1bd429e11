//! Layered settings resolution.
//!
//! Every resolvable policy field follows the same specificity walk:
//! agent+model → agent → global+model → global, first defined value wins.
//! The walk is expressed once, parameterized by accessors, so callers
//! resolve each field independently without duplicating the chain.
//!
//! Model-keyed lookups try the exact key first, then fall back to the
//! `provider/*` wildcard when the key has exactly one `/` separator. The
//! exact entry always outranks the wildcard at the same level.

use std::collections::BTreeMap;

use crate::types::{CourierSettings, ModelLayer, PromptLayer};

/// Look up a model entry by exact key, then by `provider/*` wildcard.
#[must_use]
pub fn model_entry<'a>(
    models: &'a BTreeMap<String, ModelLayer>,
    model_key: &str,
) -> Option<&'a ModelLayer> {
    if let Some(entry) = models.get(model_key) {
        return Some(entry);
    }
    let (provider, rest) = model_key.split_once('/')?;
    if rest.contains('/') {
        return None;
    }
    models.get(&format!("{provider}/*"))
}

/// Resolve one field through the four-level hierarchy.
///
/// `from_model` reads the field from a model-keyed entry; `from_layer`
/// reads it from a global or agent layer. Absent settings, an absent
/// agents map, or an unknown agent id simply skip the affected levels.
pub fn resolve_layered<'a, T: ?Sized>(
    settings: Option<&'a CourierSettings>,
    agent_id: Option<&str>,
    model_key: &str,
    from_model: impl Fn(&'a ModelLayer) -> Option<&'a T>,
    from_layer: impl Fn(&'a PromptLayer) -> Option<&'a T>,
) -> Option<&'a T> {
    let settings = settings?;
    let agent = agent_id.and_then(|id| settings.agents.get(id));
    let candidates = [
        agent
            .and_then(|a| model_entry(&a.models, model_key))
            .and_then(&from_model),
        agent.and_then(|a| from_layer(a)),
        model_entry(&settings.prompt.models, model_key).and_then(&from_model),
        from_layer(&settings.prompt),
    ];
    candidates.into_iter().flatten().next()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GuardMode, StabilitySettings};
    use serde_json::json;

    fn settings(value: serde_json::Value) -> CourierSettings {
        serde_json::from_value(value).unwrap()
    }

    fn stability(
        s: Option<&CourierSettings>,
        agent: Option<&str>,
        model: &str,
    ) -> Option<&'static str> {
        // Identify which level won by a marker field name.
        resolve_layered(
            s,
            agent,
            model,
            |m| m.stability.as_ref(),
            |l| l.stability.as_ref(),
        )
        .map(marker)
    }

    fn marker(s: &StabilitySettings) -> &'static str {
        match s.per_turn_fields {
            Some(crate::types::FieldSelector::Fields(ref names)) => match names[0].as_str() {
                "agent-model" => "agent-model",
                "agent" => "agent",
                "global-model" => "global-model",
                _ => "global",
            },
            _ => "global",
        }
    }

    fn four_levels() -> CourierSettings {
        settings(json!({
            "prompt": {
                "stability": {"perTurnFields": ["global"]},
                "models": {
                    "ollama/small": {"stability": {"perTurnFields": ["global-model"]}}
                }
            },
            "agents": {
                "support": {
                    "stability": {"perTurnFields": ["agent"]},
                    "models": {
                        "ollama/small": {"stability": {"perTurnFields": ["agent-model"]}}
                    }
                }
            }
        }))
    }

    #[test]
    fn most_specific_level_wins() {
        let s = four_levels();
        assert_eq!(
            stability(Some(&s), Some("support"), "ollama/small"),
            Some("agent-model")
        );
    }

    #[test]
    fn falls_through_in_documented_order() {
        let mut s = four_levels();
        let _ = s
            .agents
            .get_mut("support")
            .unwrap()
            .models
            .remove("ollama/small");
        assert_eq!(
            stability(Some(&s), Some("support"), "ollama/small"),
            Some("agent")
        );

        s.agents.get_mut("support").unwrap().stability = None;
        assert_eq!(
            stability(Some(&s), Some("support"), "ollama/small"),
            Some("global-model")
        );

        let _ = s.prompt.models.remove("ollama/small");
        assert_eq!(
            stability(Some(&s), Some("support"), "ollama/small"),
            Some("global")
        );
    }

    #[test]
    fn unknown_agent_skips_agent_levels() {
        let s = four_levels();
        assert_eq!(
            stability(Some(&s), Some("nobody"), "ollama/small"),
            Some("global-model")
        );
    }

    #[test]
    fn no_agent_id_skips_agent_levels() {
        let s = four_levels();
        assert_eq!(
            stability(Some(&s), None, "ollama/small"),
            Some("global-model")
        );
    }

    #[test]
    fn absent_settings_resolves_to_none() {
        assert_eq!(stability(None, Some("support"), "ollama/small"), None);
    }

    #[test]
    fn exact_key_outranks_wildcard_at_same_level() {
        let s = settings(json!({
            "prompt": {
                "models": {
                    "ollama/*": {"toolGuard": {"mode": "persistent"}},
                    "ollama/special": {"toolGuard": {"mode": "disabled"}}
                }
            }
        }));
        let mode = |key: &str| {
            resolve_layered(
                Some(&s),
                None,
                key,
                |m| m.tool_guard.as_ref().and_then(|g| g.mode.as_ref()),
                |l| l.tool_guard.as_ref().and_then(|g| g.mode.as_ref()),
            )
            .copied()
        };
        assert_eq!(mode("ollama/small"), Some(GuardMode::Persistent));
        assert_eq!(mode("ollama/special"), Some(GuardMode::Disabled));
        assert_eq!(mode("openai/gpt-4"), None);
    }

    #[test]
    fn wildcard_requires_exactly_one_separator() {
        let models: BTreeMap<String, ModelLayer> = serde_json::from_value(json!({
            "ollama/*": {}
        }))
        .unwrap();
        assert!(model_entry(&models, "ollama/small").is_some());
        assert!(model_entry(&models, "ollama").is_none());
        assert!(model_entry(&models, "ollama/deep/variant").is_none());
    }

    #[test]
    fn guard_fields_resolve_independently() {
        let s = settings(json!({
            "prompt": {
                "toolGuard": {"mode": "default"},
                "models": {
                    "ollama/*": {"toolGuard": {"compactionTarget": 0.5}}
                }
            }
        }));
        let mode = resolve_layered(
            Some(&s),
            None,
            "ollama/small",
            |m| m.tool_guard.as_ref().and_then(|g| g.mode.as_ref()),
            |l| l.tool_guard.as_ref().and_then(|g| g.mode.as_ref()),
        );
        let target = resolve_layered(
            Some(&s),
            None,
            "ollama/small",
            |m| m.tool_guard.as_ref().and_then(|g| g.compaction_target.as_ref()),
            |l| l.tool_guard.as_ref().and_then(|g| g.compaction_target.as_ref()),
        );
        // Mode comes from the global layer, target from the model wildcard.
        assert_eq!(mode.copied(), Some(GuardMode::Default));
        assert_eq!(target.copied(), Some(0.5));
    }
}
