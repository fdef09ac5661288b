//! Prelude for convenient imports.
//!
//! Re-exports the types needed to declare a component and resolve its
//! classes:
//!
//! ```rust
//! use responsive::prelude::*;
//!
//! let schema = Schema::build(&RawSchema::new().with(
//!     "gap",
//!     prop(PropertyParams::new().allowed_values(["none", "normal"]).default("normal")),
//! ))
//! .unwrap();
//!
//! let stack = ComponentDefinition::new("Stack", schema).with_style_class_map(
//!     StyleClassMap::new().with("gap", ClassEntry::classes([("none", "gap-0"), ("normal", "gap-4")])),
//! );
//!
//! assert_eq!(stack.class_list(Values::new()), "gap-4");
//! ```

// Declaring properties
pub use responsive_props::{prop, PropertyParams, RawSchema, Responsive, Schema, VariantParams};

// Values
pub use responsive_props::{Breakpoint, NormalizeOptions, Value, Values};

// Classes
pub use responsive_style::{declare_style_class_map, ClassEntry, StyleClassMap};

// Components
pub use crate::{ComponentDefinition, ComponentError};
