//! Field-set resolution.
//!
//! Turns a configured [`FieldSelector`] into the concrete set of enabled
//! field names for one universe. This is a pure value transform, not a
//! validator: names outside the universe are carried through silently and
//! simply never correspond to a real field downstream.

use std::collections::BTreeSet;

use courier_settings::FieldSelector;

/// Resolve a selector against a field universe.
///
/// `Enabled(true)` yields the whole universe, `Enabled(false)` or an
/// absent selector yields the empty set, and an explicit list yields the
/// listed names with duplicates collapsed.
#[must_use]
pub fn resolve_field_set(
    selector: Option<&FieldSelector>,
    universe: &[&str],
) -> BTreeSet<String> {
    match selector {
        Some(FieldSelector::Enabled(true)) => {
            universe.iter().map(ToString::to_string).collect()
        }
        Some(FieldSelector::Enabled(false)) | None => BTreeSet::new(),
        Some(FieldSelector::Fields(names)) => names.iter().cloned().collect(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
