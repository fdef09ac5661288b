//! Values normalization.
//!
//! Normalization fills defaults and propagates values across breakpoints so
//! that the values tree has a complete, predictable shape:
//!
//! - Non-responsive properties (and transitional properties without
//!   breakpoint overrides) hold a single base value, filled with the default
//!   when missing.
//! - Fully responsive properties (and transitional properties with at least
//!   one breakpoint override) are spread: the base key is removed and every
//!   breakpoint receives its explicit value, the base value, or its default,
//!   in that order of preference. `whenWide` is only written when the caller
//!   supplied a wide value or the wide variant declares a default.
//! - Namespaces are normalized recursively; breakpoint maps always live at
//!   the outermost level of the tree.
//!
//! Normalization never fails. Invalid values are either replaced by the
//! default ([`NormalizeOptions::fallback_to_default`]) or kept as they are,
//! to be reported by [`validate`](crate::validate).

use crate::breakpoint::Breakpoint;
use crate::definition::{PropertyDefinition, Responsive};
use crate::schema::{Schema, SchemaNode};
use crate::value::{Value, Values};

/// Options controlling normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Replace invalid values with the applicable default.
    pub fallback_to_default: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            fallback_to_default: true,
        }
    }
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether invalid values fall back to defaults.
    pub fn fallback_to_default(mut self, fallback: bool) -> Self {
        self.fallback_to_default = fallback;
        self
    }
}

/// Normalizes `values` against `schema`, returning the normalized tree.
///
/// ```rust
/// use responsive_props::{normalize, Breakpoint, NormalizeOptions, Schema, Value, Values};
///
/// let schema = Schema::from_yaml(r#"
/// gap: !prop
///   allowed_values: [none, normal]
///   responsive: yes
///   whenNarrow: { default: none }
///   whenRegular: { default: normal }
/// "#).unwrap();
///
/// let values = normalize(&schema, Values::new(), NormalizeOptions::default());
///
/// assert!(values.get("gap").is_none());
/// assert_eq!(values.breakpoint_value(Breakpoint::Narrow, "gap"), Some(&Value::from("none")));
/// assert_eq!(values.breakpoint_value(Breakpoint::Regular, "gap"), Some(&Value::from("normal")));
/// assert!(values.breakpoint(Breakpoint::Wide).is_none());
/// ```
pub fn normalize(schema: &Schema, mut values: Values, options: NormalizeOptions) -> Values {
    normalize_in_place(schema, &mut values, options);
    values
}

/// Normalizes `values` against `schema` in place.
pub fn normalize_in_place(schema: &Schema, values: &mut Values, options: NormalizeOptions) {
    for (name, node) in schema.iter() {
        match node {
            SchemaNode::Namespace(nested) => normalize_namespace(nested, name, values, options),
            SchemaNode::Property(def) => normalize_property(def, name, values, options),
        }
    }
    values.prune_empty_breakpoints();
}

fn normalize_namespace(schema: &Schema, key: &str, values: &mut Values, options: NormalizeOptions) {
    // the namespace stays in its slot while normalized
    let mut scoped = std::mem::take(values.map_mut(key));

    // pull breakpoint-scoped namespace values down into the namespace
    for bp in Breakpoint::ALL {
        let nested = values
            .get_mut(bp.key())
            .and_then(Value::as_map_mut)
            .and_then(|bp_values| bp_values.take_map(key));
        if let Some(nested) = nested {
            let target = scoped.breakpoint_mut(bp);
            for (k, v) in &nested {
                target.insert(k.clone(), v.clone());
            }
        }
    }

    normalize_in_place(schema, &mut scoped, options);

    // and push them back up
    for bp in Breakpoint::ALL {
        if let Some(nested) = scoped.take_map(bp.key()) {
            if !nested.is_empty() {
                values.breakpoint_mut(bp).insert(key, nested);
            }
        }
    }

    if scoped.is_empty() {
        values.remove(key);
    } else {
        *values.map_mut(key) = scoped;
    }
}

fn normalize_property(def: &PropertyDefinition, key: &str, values: &mut Values, options: NormalizeOptions) {
    let spread = match def.responsive() {
        Responsive::No => false,
        Responsive::Yes => true,
        Responsive::Transitional => {
            values.has_breakpoint_values(key)
                || (values.get(key).is_none() && !def.defined_default(None))
        }
    };

    if spread {
        spread_property(def, key, values, options);
    } else {
        normalize_single(def, key, values, options);
    }
}

fn normalize_single(def: &PropertyDefinition, key: &str, values: &mut Values, options: NormalizeOptions) {
    let replace = match values.get(key) {
        None => true,
        Some(value) => options.fallback_to_default && !def.valid_value(value, None),
    };
    if !replace {
        return;
    }

    if let Some(default) = def.default_value(None) {
        if let Some(invalid) = values.get(key) {
            log::debug!(
                "'{}': invalid value '{}' replaced by default '{}'",
                def.name(),
                invalid,
                default
            );
        }
        values.insert(key, default.clone());
    }
}

fn spread_property(def: &PropertyDefinition, key: &str, values: &mut Values, options: NormalizeOptions) {
    let base = values.remove(key);

    for bp in Breakpoint::ALL {
        let explicit = values.breakpoint_value(bp, key).cloned();
        if bp.is_optional() && explicit.is_none() && !def.variant_defines_default(bp) {
            continue;
        }

        let mut candidate = explicit.or_else(|| base.clone());
        let invalid = candidate
            .as_ref()
            .is_some_and(|value| !def.valid_value(value, Some(bp)));

        if candidate.is_none() || (invalid && options.fallback_to_default) {
            if let Some(default) = def.default_value(Some(bp)) {
                if let Some(invalid) = &candidate {
                    log::debug!(
                        "'{}': invalid value '{}' for {} replaced by default '{}'",
                        def.name(),
                        invalid,
                        bp,
                        default
                    );
                }
                candidate = Some(default.clone());
            }
        }

        if let Some(value) = candidate {
            values.breakpoint_mut(bp).insert(key, value);
        }
    }
}
