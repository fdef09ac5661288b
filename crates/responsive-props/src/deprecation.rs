//! Property deprecation.
//!
//! A deprecation marks either the whole property, a set of values, or a
//! legacy type as deprecated. Deprecated values are still accepted; using
//! them only produces a warning through the `log` facade (see
//! [`set_deprecation_mode`](crate::set_deprecation_mode) to silence it).

use crate::deprecation_mode::deprecations_silenced;
use crate::value::{format_list, Value, ValueType};

/// Declared deprecation parameters of a property.
///
/// With neither deprecated values nor a deprecated type, the whole property
/// is deprecated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeprecationParams {
    /// Values that are no longer allowed.
    pub deprecated_values: Option<Vec<Value>>,
    /// Legacy type that is still tolerated.
    pub deprecated_type: Option<ValueType>,
    /// Explanation appended to the generated warning.
    pub warn_message: String,
}

impl DeprecationParams {
    /// Deprecates the whole property.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deprecates the given values.
    pub fn values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.deprecated_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Deprecates a legacy type.
    pub fn deprecated_type(mut self, value_type: ValueType) -> Self {
        self.deprecated_type = Some(value_type);
        self
    }

    /// Sets the extra explanation appended to warnings.
    pub fn warn_message(mut self, message: impl Into<String>) -> Self {
        self.warn_message = message.into();
        self
    }
}

/// Deprecation attached to a [`PropertyDefinition`](crate::PropertyDefinition).
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDeprecation {
    property: String,
    current_type: Option<ValueType>,
    deprecated_values: Option<Vec<Value>>,
    deprecated_type: Option<ValueType>,
    whole_property: bool,
    warn_message: String,
}

impl PropertyDeprecation {
    pub(crate) fn new(
        property: &str,
        current_type: Option<ValueType>,
        params: &DeprecationParams,
    ) -> Self {
        Self {
            property: property.to_string(),
            current_type,
            deprecated_values: params.deprecated_values.clone(),
            deprecated_type: params.deprecated_type,
            whole_property: params.deprecated_values.is_none() && params.deprecated_type.is_none(),
            warn_message: params.warn_message.clone(),
        }
    }

    /// Values listed as deprecated.
    pub fn deprecated_values(&self) -> Option<&[Value]> {
        self.deprecated_values.as_deref()
    }

    /// Legacy type that is still accepted.
    pub fn deprecated_type(&self) -> Option<ValueType> {
        self.deprecated_type
    }

    /// Extra explanation appended to warnings.
    pub fn warn_message(&self) -> &str {
        &self.warn_message
    }

    /// Returns `true` when the whole property is deprecated.
    pub fn is_property_deprecated(&self) -> bool {
        self.whole_property
    }

    /// Returns `true` if `value` is deprecated. Every value of a deprecated
    /// property is deprecated.
    pub fn deprecated_value(&self, value: &Value) -> bool {
        self.whole_property || self.in_deprecated_values(value) || self.of_deprecated_type(value)
    }

    fn in_deprecated_values(&self, value: &Value) -> bool {
        self.deprecated_values
            .as_ref()
            .is_some_and(|values| values.contains(value))
    }

    fn of_deprecated_type(&self, value: &Value) -> bool {
        self.deprecated_type.is_some_and(|ty| ty.matches(value))
    }

    /// Builds the warning for `value`, or an empty string if it is not deprecated.
    pub fn deprecation_warn_message(&self, value: &Value) -> String {
        if !self.deprecated_value(value) {
            return String::new();
        }

        let msg = if self.whole_property {
            format!("Property '{}' is deprecated.", self.property)
        } else if self.in_deprecated_values(value) {
            let values = self.deprecated_values.as_deref().unwrap_or_default();
            format!(
                "{} {} deprecated for property '{}'. Value provided: {}",
                format_list(values),
                if values.len() > 1 { "are" } else { "is" },
                self.property,
                value
            )
        } else {
            let replacement = self
                .current_type
                .map(|ty| format!(" Use type {} instead.", ty))
                .unwrap_or_default();
            format!(
                "Type {} is deprecated for property '{}'.{} Value provided: {} ({})",
                value.value_type(),
                self.property,
                replacement,
                value,
                value.value_type()
            )
        };

        let mut msg = format!("DEPRECATION: {}", msg);
        if !self.warn_message.is_empty() {
            msg.push_str("\n             ");
            msg.push_str(&self.warn_message);
        }
        msg
    }

    /// Reports `value` if it is deprecated and reporting is enabled.
    ///
    /// Returns `true` when a warning was emitted.
    pub fn deprecation_warn(&self, value: &Value) -> bool {
        if !self.deprecated_value(value) {
            return false;
        }
        if deprecations_silenced() {
            return false;
        }
        log::warn!("{}", self.deprecation_warn_message(value));
        true
    }
}
