//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`CourierSettings::default()`]
//! 2. If `~/.courier/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//! 4. Validate value ranges and diagnose unknown field names
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::{CourierSettings, GuardMode, ToolGuardSettings};

/// Resolve the path to the settings file (`~/.courier/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".courier").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<CourierSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON or an out-of-range value, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<CourierSettings> {
    let defaults = serde_json::to_value(CourierSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: CourierSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    settings.validate()?;
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// Overrides land on the global `prompt` layer. Invalid values are
/// silently ignored (fall back to file/default).
pub fn apply_env_overrides(settings: &mut CourierSettings) {
    if let Some(mode) = read_env_guard_mode("COURIER_TOOL_GUARD_MODE") {
        settings
            .prompt
            .tool_guard
            .get_or_insert_with(ToolGuardSettings::default)
            .mode = Some(mode);
    }
    if let Some(target) = read_env_ratio("COURIER_COMPACTION_TARGET") {
        settings
            .prompt
            .tool_guard
            .get_or_insert_with(ToolGuardSettings::default)
            .compaction_target = Some(target);
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a ratio strictly between 0 and 1.
pub fn parse_ratio(val: &str) -> Option<f64> {
    let n: f64 = val.parse().ok()?;
    (n > 0.0 && n < 1.0).then_some(n)
}

/// Parse a string as a guard mode (`default` / `disabled` / `persistent`).
pub fn parse_guard_mode(val: &str) -> Option<GuardMode> {
    serde_json::from_value(Value::String(val.to_lowercase())).ok()
}

// ── Env var readers (thin wrappers) ─────────────────────────────────────────

fn read_env_ratio(name: &str) -> Option<f64> {
    let val = std::env::var(name).ok()?;
    let result = parse_ratio(&val);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid ratio env var, ignoring");
    }
    result
}

fn read_env_guard_mode(name: &str) -> Option<GuardMode> {
    let val = std::env::var(name).ok()?;
    let result = parse_guard_mode(&val);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid guard mode env var, ignoring");
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
