//! Values validation.
//!
//! Walks a schema and a values tree in lock-step and reports the first
//! violation. Validation does not touch the values; it is meant to run on
//! the caller's input, before or instead of normalization.

use crate::breakpoint::Breakpoint;
use crate::definition::{PropertyDefinition, Responsive};
use crate::error::ValueError;
use crate::schema::{Schema, SchemaNode};
use crate::value::Values;

/// Validates `values` against `schema`.
///
/// Deprecated values are accepted and reported through `log::warn!`.
///
/// # Errors
///
/// Returns the first [`ValueError`] found, in schema declaration order.
///
/// ```rust
/// use responsive_props::{validate, Schema, ValueError, Values};
///
/// let schema = Schema::from_yaml("gap: !prop\n  allowed_values: [none, normal]").unwrap();
///
/// assert!(validate(&schema, &Values::new().with("gap", "normal")).is_ok());
/// assert!(matches!(
///     validate(&schema, &Values::new()),
///     Err(ValueError::Required { .. })
/// ));
/// ```
pub fn validate(schema: &Schema, values: &Values) -> Result<(), ValueError> {
    for (name, node) in schema.iter() {
        match node {
            SchemaNode::Namespace(nested) => validate(nested, &scoped_values(values, name))?,
            SchemaNode::Property(def) => validate_property(def, name, values)?,
        }
    }
    Ok(())
}

/// Values of namespace `key`, with the breakpoint-scoped values of the same
/// namespace merged in as breakpoint siblings.
fn scoped_values(values: &Values, key: &str) -> Values {
    let mut scoped = values.map(key).cloned().unwrap_or_default();
    for bp in Breakpoint::ALL {
        if let Some(nested) = values.breakpoint(bp).and_then(|v| v.map(key)) {
            let target = scoped.breakpoint_mut(bp);
            for (k, v) in nested {
                target.insert(k.clone(), v.clone());
            }
        }
    }
    scoped
}

fn validate_property(def: &PropertyDefinition, key: &str, values: &Values) -> Result<(), ValueError> {
    let base = values.get(key);

    if let Some(value) = base {
        if def.deprecated_value(value) {
            def.deprecation_warn(value);
            return Ok(());
        }
    }

    if def.required() && base.is_none() {
        let missing = match def.responsive() {
            Responsive::No => true,
            Responsive::Transitional => !values.has_breakpoint_values(key),
            Responsive::Yes => Breakpoint::REQUIRED
                .into_iter()
                .any(|bp| values.breakpoint_value(bp, key).is_none()),
        };
        if missing {
            return Err(ValueError::Required {
                property: def.name().to_string(),
            });
        }
    }

    if let Some(value) = base {
        def.validate_value(value, None)?;
    }

    if def.is_responsive() {
        for bp in Breakpoint::ALL {
            let Some(value) = values.breakpoint_value(bp, key) else {
                continue;
            };
            if def.deprecated_value(value) {
                def.deprecation_warn(value);
                continue;
            }
            def.validate_value(value, Some(bp))?;
        }
    }

    Ok(())
}
