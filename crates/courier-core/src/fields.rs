//! Relocatable prompt-metadata field universes.
//!
//! Each universe is the fixed, versioned set of field names one feature may
//! move between the stable and volatile prompt regions. Selectors in
//! settings refer to these names; names outside a universe are inert at
//! resolution time and diagnosed when settings load.

/// Fields that change on every turn (eligible to leave the stable region).
pub const PER_TURN_FIELDS: &[&str] = &["sender", "reply", "thread"];

/// Fields that are stable per channel binding.
pub const PER_CHANNEL_FIELDS: &[&str] = &["channel", "reactions", "buttons"];

/// Returns `true` if `name` belongs to the given universe.
#[must_use]
pub fn is_known_field(universe: &[&str], name: &str) -> bool {
    universe.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn universes_are_disjoint() {
        for name in PER_TURN_FIELDS {
            assert!(!PER_CHANNEL_FIELDS.contains(name));
        }
    }

    #[test]
    fn known_field_lookup() {
        assert!(is_known_field(PER_TURN_FIELDS, "sender"));
        assert!(is_known_field(PER_CHANNEL_FIELDS, "reactions"));
        assert!(!is_known_field(PER_TURN_FIELDS, "reactions"));
        assert!(!is_known_field(PER_CHANNEL_FIELDS, "bogus"));
    }
}
