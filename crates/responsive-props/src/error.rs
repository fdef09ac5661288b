//! Error types for property definitions and property values.
//!
//! Definition errors are schema-author mistakes and surface while a schema is
//! being built. Value errors only come out of explicit validation; the
//! normalization path never fails on bad values.

use thiserror::Error;

use crate::breakpoint::Breakpoint;
use crate::value::{format_list, Value, ValueType};

/// Error raised when a property definition declaration is invalid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    /// A parameter outside the closed parameter set was given.
    #[error("Invalid property definition for '{property}'. Unknown parameter '{parameter}'.")]
    UnknownParameter { property: String, parameter: String },

    /// A parameter has the wrong shape (e.g. a list where a type name was expected).
    #[error("Invalid property definition for '{property}'. Parameter '{parameter}' {message}.")]
    InvalidParameter {
        property: String,
        parameter: String,
        message: String,
    },

    /// Both `type` and `allowed_values` were declared.
    #[error("Invalid property definition for '{property}'. Definition cannot contain both 'type' and 'allowed_values'.")]
    TypeAndAllowedValues { property: String },

    /// `responsive` is not one of the accepted modes.
    #[error("Invalid property definition for '{property}'. Invalid 'responsive' value '{value}'. Allowed values for 'responsive' are: [no, transitional, yes].")]
    InvalidResponsiveMode { property: String, value: String },

    /// A non-responsive property declared breakpoint variants.
    #[error("Invalid property definition for '{property}'. Properties not responsive can't have responsive variants, but '{breakpoint}' found. Change 'responsive' to 'transitional' or 'yes'.")]
    VariantOnNonResponsive {
        property: String,
        breakpoint: Breakpoint,
    },

    /// A variant repeats values already allowed by the base definition.
    #[error("Invalid property definition for '{property}'. Responsive variant '{breakpoint}' repeats allowed values of the property definition: {}.", format_list(.values))]
    DuplicateVariantValues {
        property: String,
        breakpoint: Breakpoint,
        values: Vec<Value>,
    },

    /// A variant declared `allowed_values` on a type based definition.
    #[error("Invalid property definition for '{property}'. Responsive variant '{breakpoint}' can't use 'allowed_values' when the definition is 'type' based.")]
    VariantValuesWithType {
        property: String,
        breakpoint: Breakpoint,
    },

    /// A variant declared a parameter that only the base definition may carry.
    #[error("Invalid property definition for '{property}'. Responsive variant '{breakpoint}' cannot declare '{parameter}'. Variants only accept 'allowed_values' and 'default'.")]
    ForbiddenVariantParameter {
        property: String,
        breakpoint: Breakpoint,
        parameter: String,
    },

    /// A fully responsive property declared both an overall and a variant default.
    #[error("Invalid property definition for '{property}'. Fully responsive property can't have a 'default' and a '{breakpoint}' default simultaneously.")]
    ConflictingDefaults {
        property: String,
        breakpoint: Breakpoint,
    },

    /// A required breakpoint lacks a default while another variant declares one.
    #[error("Invalid property definition for '{property}'. Responsive variants have to declare a default for '{breakpoint}' when any variant declares a default.")]
    MissingVariantDefault {
        property: String,
        breakpoint: Breakpoint,
    },

    /// The deprecated type is the current type.
    #[error("Invalid property definition for '{property}'. Deprecated type '{value_type}' can't be the same as the property type.")]
    DeprecatedTypeInUse {
        property: String,
        value_type: ValueType,
    },

    /// Deprecated values are still allowed values.
    #[error("Invalid property definition for '{property}'. Deprecated values can't be part of the allowed values of the property: {}.", format_list(.values))]
    DeprecatedValuesAllowed { property: String, values: Vec<Value> },

    /// A default does not satisfy the applicable constraint.
    #[error("Invalid property definition for '{property}'. Default value '{value}' ({}) has to be {expected}.", .value.value_type())]
    InvalidDefault {
        property: String,
        value: Value,
        expected: Expected,
    },

    /// A schema entry uses a name reserved for breakpoint maps.
    #[error("Invalid property definition for '{property}'. Breakpoint keys can't be used as property or namespace names.")]
    ReservedName { property: String },

    /// A schema document could not be parsed.
    #[error("Failed to parse schema: {message}")]
    Parse { message: String },

    /// A schema file could not be read.
    #[error("Failed to load schema: {message}")]
    Load { message: String },
}

/// Error result of validating a property value against its definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    /// The value violates the property's type or allowed values.
    #[error("Invalid value for '{property}': provided '{value}' ({}). Value has to be {expected}.", .value.value_type())]
    InvalidValue {
        property: String,
        value: Value,
        expected: Expected,
    },

    /// A required property has no value.
    #[error("Invalid value for '{property}': property value is required.")]
    Required { property: String },
}

impl ValueError {
    /// Name of the property the error refers to.
    pub fn property(&self) -> &str {
        match self {
            ValueError::InvalidValue { property, .. } | ValueError::Required { property } => {
                property
            }
        }
    }
}

/// What a value was expected to be.
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    /// A value of the given type.
    Type(ValueType),
    /// One of the listed values.
    OneOf(Vec<Value>),
    /// One of the listed values, for a breakpoint.
    OneOfForBreakpoint {
        breakpoint: Breakpoint,
        values: Vec<Value>,
    },
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Type(ty) => write!(f, "of type {}", ty),
            Expected::OneOf(values) => write!(f, "one of {}", format_list(values)),
            Expected::OneOfForBreakpoint { breakpoint, values } => write!(
                f,
                "one of {} for responsive variant '{}'",
                format_list(values),
                breakpoint
            ),
        }
    }
}

/// Error parsing a values tree.
#[derive(Debug, Error)]
pub enum ValuesParseError {
    #[error("invalid YAML values: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON values: {0}")]
    Json(#[from] serde_json::Error),
}
