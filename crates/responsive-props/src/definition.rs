//! Property definitions.
//!
//! A [`PropertyDefinition`] describes one configurable property of a
//! component: which values it accepts (a finite set or a type), its default,
//! whether and how it varies across breakpoints, and what is deprecated.
//!
//! Definitions are validated when constructed. Construction either returns a
//! fully consistent definition or a [`DefinitionError`]; there is no
//! partially valid state.
//!
//! # Responsive Modes
//!
//! - [`Responsive::No`]: a single value, no breakpoint variants.
//! - [`Responsive::Transitional`]: either a single base value, or values
//!   spread across breakpoints once the caller supplies a breakpoint override.
//! - [`Responsive::Yes`]: values live exclusively in breakpoints.
//!
//! # Example
//!
//! ```rust
//! use responsive_props::{Breakpoint, PropertyDefinition, PropertyParams, Responsive, VariantParams};
//!
//! let gap = PropertyDefinition::new(
//!     "gap",
//!     PropertyParams::new()
//!         .allowed_values(["none", "normal", "spacious"])
//!         .responsive(Responsive::Yes)
//!         .when_narrow(VariantParams::new().allowed_values(["tight"]).default("tight"))
//!         .when_regular(VariantParams::new().default("normal")),
//! )
//! .unwrap();
//!
//! assert!(!gap.required());
//! assert_eq!(gap.default_value(Some(Breakpoint::Narrow)), Some(&"tight".into()));
//! assert!(gap.valid_value(&"tight".into(), Some(Breakpoint::Narrow)));
//! assert!(!gap.valid_value(&"tight".into(), Some(Breakpoint::Regular)));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::breakpoint::Breakpoint;
use crate::deprecation::{DeprecationParams, PropertyDeprecation};
use crate::error::{DefinitionError, Expected, ValueError};
use crate::value::{Value, ValueType};

/// How a property participates in responsive variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Responsive {
    /// Single value only.
    #[default]
    No,
    /// Single base value, or spread across breakpoints when overrides exist.
    Transitional,
    /// Values live exclusively in breakpoints.
    Yes,
}

impl Responsive {
    /// Name used in definitions and messages.
    pub fn name(self) -> &'static str {
        match self {
            Responsive::No => "no",
            Responsive::Transitional => "transitional",
            Responsive::Yes => "yes",
        }
    }

    /// Parses a mode from its name.
    pub fn from_name(name: &str) -> Option<Responsive> {
        match name {
            "no" => Some(Responsive::No),
            "transitional" => Some(Responsive::Transitional),
            "yes" => Some(Responsive::Yes),
            _ => None,
        }
    }
}

impl fmt::Display for Responsive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared parameters of a breakpoint variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantParams {
    /// Values only available at this breakpoint.
    pub allowed_values: Option<Vec<Value>>,
    /// Default at this breakpoint.
    pub default: Option<Value>,
}

impl VariantParams {
    /// Creates empty variant parameters.
    pub fn new() -> Self {
        <Self as Default>::default()
    }

    /// Sets the values this breakpoint accepts on top of the property's.
    pub fn allowed_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the default used at this breakpoint.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Declared parameters of a property, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyParams {
    /// Finite set of accepted values.
    pub allowed_values: Option<Vec<Value>>,
    /// Type constraint.
    pub value_type: Option<ValueType>,
    /// Base default.
    pub default: Option<Value>,
    /// Responsive mode.
    pub responsive: Responsive,
    /// Breakpoint variants.
    pub variants: BTreeMap<Breakpoint, VariantParams>,
    /// Deprecation.
    pub deprecation: Option<DeprecationParams>,
}

impl PropertyParams {
    /// Creates parameters for a non-responsive property with no constraints.
    pub fn new() -> Self {
        <Self as Default>::default()
    }

    /// Restricts the property to a finite set of values.
    pub fn allowed_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Restricts the property to a value type.
    ///
    /// Exclusive with [`allowed_values`](Self::allowed_values).
    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    /// Sets the base default.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets the responsive mode.
    pub fn responsive(mut self, responsive: Responsive) -> Self {
        self.responsive = responsive;
        self
    }

    /// Declares the variant of a breakpoint, replacing any earlier one.
    pub fn variant(mut self, breakpoint: Breakpoint, params: VariantParams) -> Self {
        self.variants.insert(breakpoint, params);
        self
    }

    /// Shorthand for `variant(Breakpoint::Narrow, ..)`.
    pub fn when_narrow(self, params: VariantParams) -> Self {
        self.variant(Breakpoint::Narrow, params)
    }

    pub fn when_regular(self, params: VariantParams) -> Self {
        self.variant(Breakpoint::Regular, params)
    }

    pub fn when_wide(self, params: VariantParams) -> Self {
        self.variant(Breakpoint::Wide, params)
    }

    /// Marks the property, some of its values or a legacy type as deprecated.
    pub fn deprecation(mut self, deprecation: DeprecationParams) -> Self {
        self.deprecation = Some(deprecation);
        self
    }
}

/// Definition of a property scoped to one breakpoint.
///
/// Only contributes allowed values and a default; type, responsiveness and
/// deprecation are inherited from the parent definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponsiveVariantDefinition {
    breakpoint: Breakpoint,
    allowed_values: Option<Vec<Value>>,
    default: Option<Value>,
}

impl ResponsiveVariantDefinition {
    fn new(breakpoint: Breakpoint, params: VariantParams) -> Self {
        Self {
            breakpoint,
            allowed_values: params.allowed_values,
            default: params.default,
        }
    }

    /// Breakpoint this variant applies to.
    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    /// Values accepted at this breakpoint in addition to the property's.
    pub fn allowed_values(&self) -> Option<&[Value]> {
        self.allowed_values.as_deref()
    }

    /// Default declared by the variant itself.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Returns `true` if the variant declares a default.
    pub fn defined_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Validated definition of one component property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDefinition {
    name: String,
    allowed_values: Option<Vec<Value>>,
    value_type: Option<ValueType>,
    default: Option<Value>,
    responsive: Responsive,
    variants: BTreeMap<Breakpoint, ResponsiveVariantDefinition>,
    deprecation: Option<PropertyDeprecation>,
    required: bool,
}

impl PropertyDefinition {
    /// Builds and validates a definition.
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] describing the first violated rule.
    pub fn new(name: impl Into<String>, params: PropertyParams) -> Result<Self, DefinitionError> {
        let name = name.into();
        let deprecation = params
            .deprecation
            .as_ref()
            .map(|dep| PropertyDeprecation::new(&name, params.value_type, dep));
        let variants: BTreeMap<_, _> = params
            .variants
            .into_iter()
            .map(|(bp, variant)| (bp, ResponsiveVariantDefinition::new(bp, variant)))
            .collect();
        let required =
            params.default.is_none() && !variants.values().any(|v| v.defined_default());

        let definition = Self {
            name,
            allowed_values: params.allowed_values,
            value_type: params.value_type,
            default: params.default,
            responsive: params.responsive,
            variants,
            deprecation,
            required,
        };
        definition.validate_definition()?;
        Ok(definition)
    }

    /// Dotted name of the property, including its namespace.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base allowed values, if the property is restricted to a set.
    pub fn allowed_values(&self) -> Option<&[Value]> {
        self.allowed_values.as_deref()
    }

    /// Type constraint, if the property is type based.
    pub fn value_type(&self) -> Option<ValueType> {
        self.value_type
    }

    /// Base default, ignoring breakpoint variants.
    pub fn base_default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Declared responsive mode.
    pub fn responsive(&self) -> Responsive {
        self.responsive
    }

    /// Returns `true` for any mode other than [`Responsive::No`].
    pub fn is_responsive(&self) -> bool {
        self.responsive != Responsive::No
    }

    /// Returns `true` if the property uses exactly `mode`.
    pub fn is_responsive_mode(&self, mode: Responsive) -> bool {
        self.responsive == mode
    }

    /// Variants keyed by breakpoint, in breakpoint order.
    pub fn responsive_variants(&self) -> &BTreeMap<Breakpoint, ResponsiveVariantDefinition> {
        &self.variants
    }

    pub fn responsive_variant(&self, breakpoint: Breakpoint) -> Option<&ResponsiveVariantDefinition> {
        self.variants.get(&breakpoint)
    }

    /// Deprecation attached to the property.
    pub fn deprecation(&self) -> Option<&PropertyDeprecation> {
        self.deprecation.as_ref()
    }

    /// Returns `true` when no usable default exists, neither at base level
    /// nor in any breakpoint variant.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Returns `true` if a default exists at base level, or for `variant`
    /// (falling back to the base default when the variant declares none).
    pub fn defined_default(&self, variant: Option<Breakpoint>) -> bool {
        match variant {
            Some(bp) if self.variant_defines_default(bp) => true,
            _ => self.default.is_some(),
        }
    }

    /// Returns `true` if the variant itself declares a default.
    pub fn variant_defines_default(&self, breakpoint: Breakpoint) -> bool {
        self.is_responsive()
            && self
                .variants
                .get(&breakpoint)
                .is_some_and(ResponsiveVariantDefinition::defined_default)
    }

    /// Resolves the default for `variant`: the variant default when declared,
    /// otherwise the base default.
    pub fn default_value(&self, variant: Option<Breakpoint>) -> Option<&Value> {
        if !self.is_responsive() {
            return self.default.as_ref();
        }
        variant
            .and_then(|bp| self.variants.get(&bp))
            .and_then(ResponsiveVariantDefinition::default)
            .or(self.default.as_ref())
    }

    /// Returns `true` if `value` is accepted, at base level or at `variant`.
    ///
    /// Deprecated values are accepted even though they're discouraged.
    pub fn valid_value(&self, value: &Value, variant: Option<Breakpoint>) -> bool {
        if self.deprecated_value(value) {
            return true;
        }

        // type can't be changed by responsive variants
        if let Some(ty) = self.value_type {
            return ty.matches(value);
        }

        if !self.is_responsive() {
            return self
                .allowed_values
                .as_ref()
                .map_or(true, |allowed| allowed.contains(value));
        }

        if self
            .allowed_values
            .as_ref()
            .is_some_and(|allowed| allowed.contains(value))
        {
            return true;
        }

        let variant_allowed = variant
            .and_then(|bp| self.variants.get(&bp))
            .and_then(|v| v.allowed_values.as_ref());

        match (&self.allowed_values, variant_allowed) {
            (None, None) => true,
            (_, Some(allowed)) => allowed.contains(value),
            (Some(_), None) => false,
        }
    }

    /// Validates `value`, at base level or at `variant`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidValue`] naming the property, the value,
    /// its type and what was expected instead.
    pub fn validate_value(&self, value: &Value, variant: Option<Breakpoint>) -> Result<(), ValueError> {
        if self.valid_value(value, variant) {
            return Ok(());
        }

        let expected = if let Some(ty) = self.value_type {
            Expected::Type(ty)
        } else {
            let base = self.allowed_values.clone().unwrap_or_default();
            let responsive_variant = variant
                .filter(|_| self.is_responsive())
                .and_then(|bp| self.variants.get(&bp));
            match responsive_variant {
                Some(responsive_variant) => {
                    let mut values = base;
                    values.extend(responsive_variant.allowed_values.iter().flatten().cloned());
                    Expected::OneOfForBreakpoint {
                        breakpoint: responsive_variant.breakpoint,
                        values,
                    }
                }
                None => Expected::OneOf(base),
            }
        };

        Err(ValueError::InvalidValue {
            property: self.name.clone(),
            value: value.clone(),
            expected,
        })
    }

    /// Returns `true` when the whole property is deprecated.
    pub fn is_deprecated(&self) -> bool {
        self.deprecation
            .as_ref()
            .is_some_and(PropertyDeprecation::is_property_deprecated)
    }

    /// Returns `true` if `value` is deprecated for this property.
    pub fn deprecated_value(&self, value: &Value) -> bool {
        self.deprecation
            .as_ref()
            .is_some_and(|dep| dep.deprecated_value(value))
    }

    /// Warning reported for `value`; empty unless it is deprecated.
    pub fn deprecation_warn_message(&self, value: &Value) -> String {
        self.deprecation
            .as_ref()
            .map(|dep| dep.deprecation_warn_message(value))
            .unwrap_or_default()
    }

    pub(crate) fn deprecation_warn(&self, value: &Value) -> bool {
        self.deprecation
            .as_ref()
            .is_some_and(|dep| dep.deprecation_warn(value))
    }

    fn validate_definition(&self) -> Result<(), DefinitionError> {
        if self.allowed_values.is_some() && self.value_type.is_some() {
            return Err(DefinitionError::TypeAndAllowedValues {
                property: self.name.clone(),
            });
        }

        if self.responsive == Responsive::No {
            if let Some(&breakpoint) = self.variants.keys().next() {
                return Err(DefinitionError::VariantOnNonResponsive {
                    property: self.name.clone(),
                    breakpoint,
                });
            }
        } else {
            self.validate_variants()?;
        }

        self.validate_deprecation()?;

        if let Some(default) = &self.default {
            self.validate_default(default, self.allowed_values.clone())?;
        }

        Ok(())
    }

    fn validate_variants(&self) -> Result<(), DefinitionError> {
        for (&breakpoint, variant) in &self.variants {
            let Some(variant_allowed) = &variant.allowed_values else {
                continue;
            };
            if self.value_type.is_some() {
                return Err(DefinitionError::VariantValuesWithType {
                    property: self.name.clone(),
                    breakpoint,
                });
            }
            let repeated: Vec<Value> = variant_allowed
                .iter()
                .filter(|value| {
                    self.allowed_values
                        .as_ref()
                        .is_some_and(|allowed| allowed.contains(value))
                })
                .cloned()
                .collect();
            if !repeated.is_empty() {
                return Err(DefinitionError::DuplicateVariantValues {
                    property: self.name.clone(),
                    breakpoint,
                    values: repeated,
                });
            }
        }

        let declaring_default: Vec<Breakpoint> = self
            .variants
            .values()
            .filter(|v| v.defined_default())
            .map(ResponsiveVariantDefinition::breakpoint)
            .collect();

        if let Some(&breakpoint) = declaring_default.first() {
            if self.responsive == Responsive::Yes && self.default.is_some() {
                return Err(DefinitionError::ConflictingDefaults {
                    property: self.name.clone(),
                    breakpoint,
                });
            }
            if let Some(missing) = Breakpoint::REQUIRED
                .into_iter()
                .find(|bp| !declaring_default.contains(bp))
            {
                return Err(DefinitionError::MissingVariantDefault {
                    property: self.name.clone(),
                    breakpoint: missing,
                });
            }
        }

        for variant in self.variants.values() {
            let Some(default) = &variant.default else {
                continue;
            };
            let allowed = match (&self.allowed_values, &variant.allowed_values) {
                (None, None) => None,
                (base, own) => Some(
                    base.iter()
                        .flatten()
                        .chain(own.iter().flatten())
                        .cloned()
                        .collect(),
                ),
            };
            self.validate_default(default, allowed)?;
        }

        Ok(())
    }

    fn validate_deprecation(&self) -> Result<(), DefinitionError> {
        let Some(deprecation) = &self.deprecation else {
            return Ok(());
        };

        if let Some(ty) = deprecation.deprecated_type() {
            if self.value_type == Some(ty) {
                return Err(DefinitionError::DeprecatedTypeInUse {
                    property: self.name.clone(),
                    value_type: ty,
                });
            }
        }

        if let Some(deprecated) = deprecation.deprecated_values() {
            let current: Vec<&Value> = self
                .allowed_values
                .iter()
                .flatten()
                .chain(
                    self.variants
                        .values()
                        .flat_map(|v| v.allowed_values.iter().flatten()),
                )
                .collect();
            let repeated: Vec<Value> = deprecated
                .iter()
                .filter(|value| current.contains(value))
                .cloned()
                .collect();
            if !repeated.is_empty() {
                return Err(DefinitionError::DeprecatedValuesAllowed {
                    property: self.name.clone(),
                    values: repeated,
                });
            }
        }

        Ok(())
    }

    fn validate_default(&self, value: &Value, allowed: Option<Vec<Value>>) -> Result<(), DefinitionError> {
        if let Some(ty) = self.value_type {
            if ty.matches(value) {
                return Ok(());
            }
            return Err(DefinitionError::InvalidDefault {
                property: self.name.clone(),
                value: value.clone(),
                expected: Expected::Type(ty),
            });
        }

        match allowed {
            Some(allowed) if !allowed.contains(value) => Err(DefinitionError::InvalidDefault {
                property: self.name.clone(),
                value: value.clone(),
                expected: Expected::OneOf(allowed),
            }),
            _ => Ok(()),
        }
    }
}
