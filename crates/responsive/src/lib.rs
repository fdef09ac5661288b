//! # Responsive - Component Properties Across Breakpoints
//!
//! Responsive lets UI components declare their configuration properties once
//! and accept values that vary across three viewport breakpoints: narrow,
//! regular and wide. It provides:
//!
//! - Property schemas with allowed values, types, defaults and deprecations
//! - Validation of caller supplied values with descriptive errors
//! - Normalization that fills defaults and spreads values across breakpoints
//! - Style-class maps resolving normalized values into CSS class names
//!
//! ## Crates
//!
//! | Crate | Purpose |
//! |-------|---------|
//! | [`responsive_props`] | schemas, validation, normalization |
//! | [`responsive_style`] | style-class maps and class resolution |
//! | `responsive` | component definitions tying both together |
//!
//! ## Quick Start
//!
//! ```rust
//! use responsive::{Breakpoint, ComponentDefinition, Values};
//!
//! let stack = ComponentDefinition::from_yaml(
//!     "Stack",
//!     r#"
//! direction: !prop
//!   allowed_values: [block, inline]
//!   default: block
//!   responsive: transitional
//! "#,
//!     r#"
//! direction:
//!   block: Stack--dir-block
//!   inline: Stack--dir-inline
//! whenNarrow:
//!   direction:
//!     block: Stack--dir-block-whenNarrow
//!     inline: Stack--dir-inline-whenNarrow
//! whenRegular:
//!   direction:
//!     block: Stack--dir-block-whenRegular
//!     inline: Stack--dir-inline-whenRegular
//! "#,
//! )
//! .unwrap()
//! .with_base_class("Stack");
//!
//! assert_eq!(
//!     stack.class_list(Values::new()),
//!     "Stack Stack--dir-block Stack--dir-block-whenNarrow Stack--dir-block-whenRegular"
//! );
//!
//! let values = Values::new()
//!     .with("direction", "inline")
//!     .with_breakpoint(Breakpoint::Narrow, Values::new().with("direction", "block"));
//! assert_eq!(
//!     stack.class_list(values),
//!     "Stack Stack--dir-block-whenNarrow Stack--dir-inline-whenRegular"
//! );
//! ```
//!
//! ## Failure Model
//!
//! Only definitions fail loudly: invalid schemas are rejected when built.
//! [`ComponentDefinition::class_list`] never fails, falling back to defaults
//! for invalid values; use [`ComponentDefinition::try_class_list`] to reject
//! them instead.

mod component;
mod error;
pub mod prelude;

pub use component::ComponentDefinition;
pub use error::ComponentError;

// Re-export the member crates
pub use responsive_props;
pub use responsive_style;

// Property exports
pub use responsive_props::{
    normalize, prop, validate, Breakpoint, DefinitionError, NormalizeOptions, PropertyDefinition,
    PropertyParams, RawSchema, Responsive, Schema, Value, ValueError, Values, VariantParams,
};

// Style exports
pub use responsive_style::{
    apply_values_to_style_map, declare_style_class_map, AppliedClass, AppliedStyles, ClassEntry,
    StyleClassMap, StyleMapError,
};
