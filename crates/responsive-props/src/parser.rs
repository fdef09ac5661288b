//! YAML schema parsing.
//!
//! Parses a YAML schema document into a [`RawSchema`], which is then built
//! into a validated [`Schema`](crate::Schema). Parsing only checks the shape
//! of the document (closed parameter sets, value shapes); the semantic rules
//! are enforced when the definitions are built.
//!
//! # Format
//!
//! Properties are marked with the `!prop` tag. Untagged mappings are
//! namespaces and nest their own properties.
//!
//! ```yaml
//! direction: !prop
//!   allowed_values: [block, inline]
//!   default: block
//!   responsive: transitional
//!
//! layout:
//!   gap: !prop
//!     allowed_values: [none, normal, spacious]
//!     responsive: yes
//!     whenNarrow:
//!       allowed_values: [tight]
//!       default: tight
//!     whenRegular:
//!       default: normal
//!
//! label: !prop
//!   type: string
//!   deprecation:
//!     deprecated_type: integer
//!     warn_message: Use a string label instead.
//!
//! # A tag without parameters declares an unconstrained, required property
//! id: !prop
//! ```

use serde_yaml::{Mapping, Value as Yaml};

use crate::breakpoint::Breakpoint;
use crate::definition::{PropertyParams, Responsive, VariantParams};
use crate::deprecation::DeprecationParams;
use crate::error::DefinitionError;
use crate::schema::{qualify, RawNode, RawSchema};
use crate::value::{Value, ValueType};

/// Tag marking a property definition in YAML schemas.
pub const PROP_TAG: &str = "prop";

/// Parameters a breakpoint variant inherits and cannot redeclare.
const VARIANT_FORBIDDEN: &[&str] = &["type", "responsive", "deprecation"];

/// Parses a YAML schema document.
pub fn parse_schema(yaml: &str) -> Result<RawSchema, DefinitionError> {
    let document: Yaml = serde_yaml::from_str(yaml).map_err(|e| DefinitionError::Parse {
        message: e.to_string(),
    })?;

    match document {
        Yaml::Mapping(map) => parse_namespace(&map, None),
        Yaml::Null => Ok(RawSchema::new()),
        other => Err(DefinitionError::Parse {
            message: format!("Expected a mapping at the top level, got {}", yaml_kind(&other)),
        }),
    }
}

fn parse_namespace(map: &Mapping, namespace: Option<&str>) -> Result<RawSchema, DefinitionError> {
    let mut schema = RawSchema::new();

    for (key, value) in map {
        let name = key.as_str().ok_or_else(|| DefinitionError::Parse {
            message: format!(
                "Schema keys must be strings, got {} in '{}'",
                yaml_kind(key),
                namespace.unwrap_or("<root>")
            ),
        })?;
        let path = qualify(namespace, name);

        let node = match value {
            Yaml::Tagged(tagged) if tagged.tag == PROP_TAG => {
                RawNode::Prop(parse_property_params(&path, &tagged.value)?)
            }
            Yaml::Tagged(tagged) => {
                return Err(DefinitionError::Parse {
                    message: format!("Unknown tag '{}' on '{}'", tagged.tag, path),
                })
            }
            Yaml::Mapping(nested) => RawNode::Namespace(parse_namespace(nested, Some(&path))?),
            other => {
                return Err(DefinitionError::Parse {
                    message: format!(
                        "'{}' must be a !prop definition or a nested namespace, got {}",
                        path,
                        yaml_kind(other)
                    ),
                })
            }
        };

        schema.insert(name, node);
    }

    Ok(schema)
}

/// Parses the parameters of a single property definition.
///
/// `value` is the content of a `!prop` node: a mapping of parameters, or
/// null for a property without parameters.
pub fn parse_property_params(property: &str, value: &Yaml) -> Result<PropertyParams, DefinitionError> {
    let map = match value {
        Yaml::Mapping(map) => map,
        Yaml::Null => return Ok(PropertyParams::new()),
        other => {
            return Err(DefinitionError::Parse {
                message: format!(
                    "Definition of '{}' must be a mapping, got {}",
                    property,
                    yaml_kind(other)
                ),
            })
        }
    };

    let mut params = PropertyParams::new();

    for (key, value) in map {
        let parameter = parameter_name(property, key)?;
        match parameter {
            "allowed_values" => {
                params.allowed_values = Some(parse_list(property, parameter, value)?);
            }
            "type" => params.value_type = Some(parse_type(property, parameter, value)?),
            "default" => params.default = parse_value(property, parameter, value)?,
            "responsive" => params.responsive = parse_responsive(property, value)?,
            "deprecation" => params.deprecation = Some(parse_deprecation(property, value)?),
            other => match Breakpoint::from_key(other) {
                Some(breakpoint) => {
                    let variant = parse_variant(property, breakpoint, value)?;
                    params.variants.insert(breakpoint, variant);
                }
                None => {
                    return Err(DefinitionError::UnknownParameter {
                        property: property.to_string(),
                        parameter: other.to_string(),
                    })
                }
            },
        }
    }

    Ok(params)
}

fn parse_variant(
    property: &str,
    breakpoint: Breakpoint,
    value: &Yaml,
) -> Result<VariantParams, DefinitionError> {
    let map = match value {
        Yaml::Mapping(map) => map,
        Yaml::Null => return Ok(VariantParams::new()),
        _ => {
            return Err(DefinitionError::InvalidParameter {
                property: property.to_string(),
                parameter: breakpoint.key().to_string(),
                message: "must be a mapping".to_string(),
            })
        }
    };

    let mut params = VariantParams::new();

    for (key, value) in map {
        let parameter = parameter_name(property, key)?;
        match parameter {
            "allowed_values" => {
                params.allowed_values = Some(parse_list(property, parameter, value)?);
            }
            "default" => params.default = parse_value(property, parameter, value)?,
            other if VARIANT_FORBIDDEN.contains(&other) || Breakpoint::is_breakpoint_key(other) => {
                return Err(DefinitionError::ForbiddenVariantParameter {
                    property: property.to_string(),
                    breakpoint,
                    parameter: other.to_string(),
                })
            }
            other => {
                return Err(DefinitionError::UnknownParameter {
                    property: property.to_string(),
                    parameter: format!("{}.{}", breakpoint.key(), other),
                })
            }
        }
    }

    Ok(params)
}

fn parse_deprecation(property: &str, value: &Yaml) -> Result<DeprecationParams, DefinitionError> {
    let map = match value {
        Yaml::Mapping(map) => map,
        // `deprecation: ~` deprecates the whole property
        Yaml::Null => return Ok(DeprecationParams::new()),
        _ => {
            return Err(DefinitionError::InvalidParameter {
                property: property.to_string(),
                parameter: "deprecation".to_string(),
                message: "must be a mapping".to_string(),
            })
        }
    };

    let mut params = DeprecationParams::new();

    for (key, value) in map {
        let parameter = parameter_name(property, key)?;
        match parameter {
            "deprecated_values" => {
                params.deprecated_values = Some(parse_list(property, parameter, value)?);
            }
            "deprecated_type" => {
                params.deprecated_type = Some(parse_type(property, parameter, value)?);
            }
            "warn_message" => {
                params.warn_message = value
                    .as_str()
                    .ok_or_else(|| DefinitionError::InvalidParameter {
                        property: property.to_string(),
                        parameter: parameter.to_string(),
                        message: "must be a string".to_string(),
                    })?
                    .to_string();
            }
            other => {
                return Err(DefinitionError::UnknownParameter {
                    property: property.to_string(),
                    parameter: format!("deprecation.{}", other),
                })
            }
        }
    }

    Ok(params)
}

fn parameter_name<'a>(property: &str, key: &'a Yaml) -> Result<&'a str, DefinitionError> {
    key.as_str().ok_or_else(|| DefinitionError::Parse {
        message: format!(
            "Parameter names of '{}' must be strings, got {}",
            property,
            yaml_kind(key)
        ),
    })
}

fn parse_responsive(property: &str, value: &Yaml) -> Result<Responsive, DefinitionError> {
    value
        .as_str()
        .and_then(Responsive::from_name)
        .ok_or_else(|| DefinitionError::InvalidResponsiveMode {
            property: property.to_string(),
            value: yaml_scalar(value),
        })
}

fn parse_type(property: &str, parameter: &str, value: &Yaml) -> Result<ValueType, DefinitionError> {
    value
        .as_str()
        .and_then(ValueType::from_name)
        .ok_or_else(|| DefinitionError::InvalidParameter {
            property: property.to_string(),
            parameter: parameter.to_string(),
            message: format!(
                "must be one of [string, integer, float, number, boolean, map], got '{}'",
                yaml_scalar(value)
            ),
        })
}

fn parse_list(property: &str, parameter: &str, value: &Yaml) -> Result<Vec<Value>, DefinitionError> {
    let Yaml::Sequence(items) = value else {
        return Err(DefinitionError::InvalidParameter {
            property: property.to_string(),
            parameter: parameter.to_string(),
            message: "must be a list".to_string(),
        });
    };

    items
        .iter()
        .map(|item| {
            parse_value(property, parameter, item)?.ok_or_else(|| DefinitionError::InvalidParameter {
                property: property.to_string(),
                parameter: parameter.to_string(),
                message: "can't contain null".to_string(),
            })
        })
        .collect()
}

/// Converts a YAML node into a property value. Null means "not set".
fn parse_value(property: &str, parameter: &str, value: &Yaml) -> Result<Option<Value>, DefinitionError> {
    if value.is_null() {
        return Ok(None);
    }
    serde_yaml::from_value(value.clone())
        .map(Some)
        .map_err(|e| DefinitionError::InvalidParameter {
            property: property.to_string(),
            parameter: parameter.to_string(),
            message: format!("holds an unsupported value: {}", e),
        })
}

fn yaml_scalar(value: &Yaml) -> String {
    match value {
        Yaml::String(s) => s.clone(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        other => yaml_kind(other).to_string(),
    }
}

fn yaml_kind(value: &Yaml) -> &'static str {
    match value {
        Yaml::Null => "null",
        Yaml::Bool(_) => "boolean",
        Yaml::Number(_) => "number",
        Yaml::String(_) => "string",
        Yaml::Sequence(_) => "sequence",
        Yaml::Mapping(_) => "mapping",
        Yaml::Tagged(_) => "tagged value",
    }
}
