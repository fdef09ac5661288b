//! Viewport breakpoints.
//!
//! A responsive property can hold a different value for each of the three
//! viewport breakpoints. In a values tree every breakpoint is a sibling key
//! of the base properties (`whenNarrow`, `whenRegular`, `whenWide`) holding a
//! map with the same nested shape as the base values.
//!
//! `whenWide` is optional: it is never created implicitly during
//! normalization, and style maps never let it inherit the base value.

use std::fmt;

/// One of the three viewport breakpoints, in their fixed resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Breakpoint {
    /// Narrow viewports (`whenNarrow`).
    Narrow,
    /// Regular viewports (`whenRegular`).
    Regular,
    /// Wide viewports (`whenWide`). Optional.
    Wide,
}

impl Breakpoint {
    /// All breakpoints in resolution order: narrow, regular, wide.
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Narrow, Breakpoint::Regular, Breakpoint::Wide];

    /// Breakpoints that must resolve to a value once any variant default exists.
    pub const REQUIRED: [Breakpoint; 2] = [Breakpoint::Narrow, Breakpoint::Regular];

    /// Key of this breakpoint in values trees, definitions and style maps.
    pub fn key(self) -> &'static str {
        match self {
            Breakpoint::Narrow => "whenNarrow",
            Breakpoint::Regular => "whenRegular",
            Breakpoint::Wide => "whenWide",
        }
    }

    /// Modifier appended to class names derived for this breakpoint.
    pub fn style_modifier(self) -> &'static str {
        match self {
            Breakpoint::Narrow => "whenNarrow",
            Breakpoint::Regular => "whenRegular",
            Breakpoint::Wide => "whenWide",
        }
    }

    /// Returns `true` for breakpoints that are never created or inherited implicitly.
    pub fn is_optional(self) -> bool {
        matches!(self, Breakpoint::Wide)
    }

    /// Looks up a breakpoint by its key.
    pub fn from_key(key: &str) -> Option<Breakpoint> {
        Breakpoint::ALL.into_iter().find(|bp| bp.key() == key)
    }

    /// Returns `true` if `key` names a breakpoint.
    pub fn is_breakpoint_key(key: &str) -> bool {
        Breakpoint::from_key(key).is_some()
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for bp in Breakpoint::ALL {
            assert_eq!(Breakpoint::from_key(bp.key()), Some(bp));
        }
        assert_eq!(Breakpoint::from_key("whenTiny"), None);
    }

    #[test]
    fn test_only_wide_is_optional() {
        assert!(!Breakpoint::Narrow.is_optional());
        assert!(!Breakpoint::Regular.is_optional());
        assert!(Breakpoint::Wide.is_optional());
        assert!(!Breakpoint::REQUIRED.contains(&Breakpoint::Wide));
    }

    #[test]
    fn test_resolution_order() {
        let mut sorted = vec![Breakpoint::Wide, Breakpoint::Narrow, Breakpoint::Regular];
        sorted.sort();
        assert_eq!(sorted, Breakpoint::ALL.to_vec());
    }
}
