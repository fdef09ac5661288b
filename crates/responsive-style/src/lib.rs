//! Style-class maps for responsive component properties.
//!
//! Turns normalized property values (see `responsive-props`) into CSS class
//! names. A [`StyleClassMap`] maps each property value to a class; breakpoint
//! sub-maps hold the classes applied for a single breakpoint and are derived
//! by suffixing classes with the breakpoint modifier.
//!
//! # Example
//!
//! ```rust
//! use responsive_props::{Breakpoint, Values};
//! use responsive_style::{apply_values_to_style_map, declare_style_class_map, ClassEntry, StyleClassMap};
//!
//! let map = declare_style_class_map(
//!     StyleClassMap::new(),
//!     StyleClassMap::new()
//!         .with("gap", ClassEntry::classes([("none", "Stack--gap-none"), ("normal", "Stack--gap-normal")]))
//!         .with("show_dividers", "Stack--showDividers"),
//!     StyleClassMap::new(),
//! );
//!
//! let values = Values::new()
//!     .with("show_dividers", true)
//!     .with_breakpoint(Breakpoint::Narrow, Values::new().with("gap", "none"))
//!     .with_breakpoint(Breakpoint::Regular, Values::new().with("gap", "normal"));
//!
//! let applied = apply_values_to_style_map(&map, &values);
//! assert_eq!(
//!     applied.class_list(),
//!     "Stack--gap-none-whenNarrow Stack--gap-normal-whenRegular \
//!      Stack--showDividers-whenNarrow Stack--showDividers-whenRegular"
//! );
//! ```

mod apply;
mod class_map;
mod error;

pub use apply::{
    apply_values_to_style_map, get_style_from_value, merge_class_styles, AppliedClass,
    AppliedStyles,
};
pub use class_map::{declare_style_class_map, ClassEntry, ClassMap, StyleClassMap};
pub use error::StyleMapError;
