//! Responsive component properties.
//!
//! Declarative schemas for component configuration properties that can vary
//! across three viewport breakpoints (narrow, regular, wide). A schema
//! declares, per property, the accepted values or type, defaults, responsive
//! behavior and deprecations. Values trees supplied by callers are then:
//!
//! - **validated**: fail-fast checks with descriptive errors
//! - **normalized**: defaults filled in and values propagated across
//!   breakpoints, never failing
//!
//! # Quick Start
//!
//! ```rust
//! use responsive_props::{normalize, validate, Breakpoint, NormalizeOptions, Schema, Value, Values};
//!
//! let schema = Schema::from_yaml(r#"
//! direction: !prop
//!   allowed_values: [block, inline]
//!   default: block
//!   responsive: transitional
//! "#).unwrap();
//!
//! // A single base value stays a single base value
//! let values = normalize(&schema, Values::new(), NormalizeOptions::default());
//! assert_eq!(values.get("direction"), Some(&Value::from("block")));
//!
//! // A breakpoint override spreads the property across breakpoints
//! let input = Values::new()
//!     .with("direction", "inline")
//!     .with_breakpoint(Breakpoint::Narrow, Values::new().with("direction", "block"));
//! validate(&schema, &input).unwrap();
//!
//! let values = normalize(&schema, input, NormalizeOptions::default());
//! assert!(values.get("direction").is_none());
//! assert_eq!(values.breakpoint_value(Breakpoint::Narrow, "direction"), Some(&Value::from("block")));
//! assert_eq!(values.breakpoint_value(Breakpoint::Regular, "direction"), Some(&Value::from("inline")));
//! ```
//!
//! # Responsive Modes
//!
//! | Mode | Base value | Breakpoint values |
//! |------|------------|-------------------|
//! | `no` | yes | never |
//! | `transitional` | until any override is given | once any override is given |
//! | `yes` | never | always |
//!
//! # Deprecations
//!
//! Deprecated values remain valid. Using them emits a `log::warn!`, which can
//! be silenced with [`set_deprecation_mode`] or the
//! `RESPONSIVE_SILENCE_DEPRECATIONS` environment variable.

mod breakpoint;
mod definition;
mod deprecation;
mod deprecation_mode;
mod error;
mod normalize;
mod parser;
mod schema;
mod validate;
mod value;

pub use breakpoint::Breakpoint;
pub use definition::{
    PropertyDefinition, PropertyParams, Responsive, ResponsiveVariantDefinition, VariantParams,
};
pub use deprecation::{DeprecationParams, PropertyDeprecation};
pub use deprecation_mode::{
    deprecation_mode, deprecations_silenced, set_deprecation_mode, DeprecationMode,
    SILENCE_DEPRECATIONS_ENV,
};
pub use error::{DefinitionError, Expected, ValueError, ValuesParseError};
pub use normalize::{normalize, normalize_in_place, NormalizeOptions};
pub use parser::{parse_property_params, parse_schema, PROP_TAG};
pub use schema::{build_definitions, prop, RawNode, RawSchema, Schema, SchemaNode};
pub use validate::validate;
pub use value::{MapKey, Value, ValueKind, ValueType, Values};
