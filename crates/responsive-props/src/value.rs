//! Property value types.
//!
//! [`Value`] is the runtime value of one property, [`Values`] is the ordered
//! values tree a component is configured with. Both (de)serialize from plain
//! YAML or JSON data; `null` entries are treated as unset and dropped.
//!
//! # Example
//!
//! ```rust
//! use responsive_props::{Breakpoint, Value, Values};
//!
//! let values = Values::from_yaml(r#"
//! direction: inline
//! gap: 4
//! whenNarrow:
//!   direction: block
//! "#).unwrap();
//!
//! assert_eq!(values.get("direction"), Some(&Value::from("inline")));
//! assert_eq!(
//!     values.breakpoint(Breakpoint::Narrow).and_then(|v| v.get("direction")),
//!     Some(&Value::from("block")),
//! );
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::breakpoint::Breakpoint;
use crate::error::ValuesParseError;

/// Runtime value of a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean switch.
    Bool(bool),
    /// Integer number.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// String or symbolic value.
    Str(String),
    /// Structured value (also used for namespaces and breakpoint maps).
    Map(Values),
}

/// Shape of a value, as seen by style-class resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Strings and numbers, resolved by keyed lookup.
    Scalar,
    /// Booleans, resolved to the entry itself when `true`.
    Flag,
    /// Maps, resolved key by key.
    Struct,
}

impl Value {
    /// Returns the shape of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Flag,
            Value::Int(_) | Value::Float(_) | Value::Str(_) => ValueKind::Scalar,
            Value::Map(_) => ValueKind::Struct,
        }
    }

    /// Returns the concrete type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Boolean,
            Value::Int(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::Str(_) => ValueType::String,
            Value::Map(_) => ValueType::Map,
        }
    }

    /// Extracts the string, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the boolean, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the integer, if present.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the nested map, if present.
    pub fn as_map(&self) -> Option<&Values> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Extracts the nested map mutably, if present.
    pub fn as_map_mut(&mut self) -> Option<&mut Values> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Key used when a scalar value indexes a style-class map.
    ///
    /// Flags and structured values have no lookup key.
    pub fn lookup_key(&self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s.clone()),
            Value::Int(n) => Some(n.to_string()),
            Value::Float(n) => Some(n.to_string()),
            Value::Bool(_) | Value::Map(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Str(s) => f.write_str(s),
            Value::Map(m) => write!(f, "{}", m),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<Values> for Value {
    fn from(values: Values) -> Self {
        Value::Map(values)
    }
}

/// Formats a list of values as `[a, b, c]` for messages.
pub(crate) fn format_list(values: &[Value]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}

/// Type constraint of a property definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Any string value.
    String,
    /// Integer numbers only.
    Integer,
    /// Floating point numbers only.
    Float,
    /// Integer or floating point numbers.
    Number,
    /// Booleans.
    Boolean,
    /// Structured values.
    Map,
}

impl ValueType {
    /// Returns `true` if `value` satisfies this type.
    pub fn matches(self, value: &Value) -> bool {
        match (self, value) {
            (ValueType::String, Value::Str(_)) => true,
            (ValueType::Integer, Value::Int(_)) => true,
            (ValueType::Float, Value::Float(_)) => true,
            (ValueType::Number, Value::Int(_) | Value::Float(_)) => true,
            (ValueType::Boolean, Value::Bool(_)) => true,
            (ValueType::Map, Value::Map(_)) => true,
            _ => false,
        }
    }

    /// Name used in definitions and messages.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Map => "map",
        }
    }

    /// Parses a type from its name.
    pub fn from_name(name: &str) -> Option<ValueType> {
        match name {
            "string" => Some(ValueType::String),
            "integer" => Some(ValueType::Integer),
            "float" => Some(ValueType::Float),
            "number" => Some(ValueType::Number),
            "boolean" => Some(ValueType::Boolean),
            "map" => Some(ValueType::Map),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered values tree.
///
/// Mirrors the shape of a schema. Breakpoint overrides live under the
/// `whenNarrow` / `whenRegular` / `whenWide` keys of the outermost tree and
/// repeat the nested shape below them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Values(IndexMap<String, Value>);

impl Values {
    /// Creates an empty values tree.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Parses a values tree from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ValuesParseError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a values tree from JSON.
    pub fn from_json(json: &str) -> Result<Self, ValuesParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Adds an entry, returning `self` for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Adds a breakpoint override map, returning `self` for chaining.
    pub fn with_breakpoint(self, breakpoint: Breakpoint, values: Values) -> Self {
        self.with(breakpoint.key(), values)
    }

    /// Value stored under `key`; breakpoint maps included.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Inserts a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Removes a value, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns the nested map stored under `key`, if any.
    pub fn map(&self, key: &str) -> Option<&Values> {
        self.0.get(key).and_then(Value::as_map)
    }

    /// Returns the nested map under `key`, creating it when missing.
    ///
    /// A non-map value stored under `key` is replaced by an empty map.
    pub fn map_mut(&mut self, key: &str) -> &mut Values {
        let slot = self
            .0
            .entry(key.to_string())
            .or_insert_with(|| Value::Map(Values::new()));
        if !matches!(slot, Value::Map(_)) {
            *slot = Value::Map(Values::new());
        }
        match slot {
            Value::Map(map) => map,
            _ => unreachable!("slot holds a map"),
        }
    }

    /// Removes and returns the nested map under `key`.
    ///
    /// Non-map values under `key` are removed and discarded.
    pub fn take_map(&mut self, key: &str) -> Option<Values> {
        match self.remove(key) {
            Some(Value::Map(map)) => Some(map),
            _ => None,
        }
    }

    /// Returns the override map of a breakpoint, if present.
    pub fn breakpoint(&self, breakpoint: Breakpoint) -> Option<&Values> {
        self.map(breakpoint.key())
    }

    /// Returns the override map of a breakpoint, creating it when missing.
    pub fn breakpoint_mut(&mut self, breakpoint: Breakpoint) -> &mut Values {
        self.map_mut(breakpoint.key())
    }

    /// Returns the value of `key` scoped to `breakpoint`, if present.
    pub fn breakpoint_value(&self, breakpoint: Breakpoint, key: &str) -> Option<&Value> {
        self.breakpoint(breakpoint).and_then(|values| values.get(key))
    }

    /// Returns `true` if any breakpoint map holds a value for `key`.
    pub fn has_breakpoint_values(&self, key: &str) -> bool {
        Breakpoint::ALL
            .into_iter()
            .any(|bp| self.breakpoint_value(bp, key).is_some())
    }

    /// Returns `true` if any breakpoint key is present.
    pub fn has_breakpoints(&self) -> bool {
        Breakpoint::ALL
            .into_iter()
            .any(|bp| self.contains_key(bp.key()))
    }

    /// Drops breakpoint maps that hold no values.
    pub fn prune_empty_breakpoints(&mut self) {
        for bp in Breakpoint::ALL {
            if self.breakpoint(bp).is_some_and(Values::is_empty) {
                self.remove(bp.key());
            }
        }
    }
}

impl<'de> Deserialize<'de> for Values {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValuesVisitor;

        impl<'de> Visitor<'de> for ValuesVisitor {
            type Value = Values;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of property values")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Values, E> {
                Ok(Values::new())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Values, A::Error> {
                let mut values = Values::new();
                while let Some(MapKey(key)) = access.next_key()? {
                    // null entries are unset
                    if let Some(value) = access.next_value::<Option<Value>>()? {
                        values.insert(key, value);
                    }
                }
                Ok(values)
            }
        }

        deserializer.deserialize_map(ValuesVisitor)
    }
}

/// Map key read from serialized data.
///
/// YAML allows numbers and booleans as keys (`2: Grid--cols-2`); they are
/// kept as their string form, the form [`Value::lookup_key`] produces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MapKey(pub String);

impl<'de> Deserialize<'de> for MapKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapKeyVisitor;

        impl Visitor<'_> for MapKeyVisitor {
            type Value = MapKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number or boolean key")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<MapKey, E> {
                Ok(MapKey(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<MapKey, E> {
                Ok(MapKey(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<MapKey, E> {
                Ok(MapKey(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<MapKey, E> {
                Ok(MapKey(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<MapKey, E> {
                Ok(MapKey(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<MapKey, E> {
                Ok(MapKey(v.to_string()))
            }
        }

        deserializer.deserialize_any(MapKeyVisitor)
    }
}

impl fmt::Display for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        f.write_str("}")
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Values(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Values {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kind() {
        assert_eq!(Value::from("a").kind(), ValueKind::Scalar);
        assert_eq!(Value::from(3).kind(), ValueKind::Scalar);
        assert_eq!(Value::from(true).kind(), ValueKind::Flag);
        assert_eq!(Value::from(Values::new()).kind(), ValueKind::Struct);
    }

    #[test]
    fn test_value_type_matches() {
        assert!(ValueType::String.matches(&"x".into()));
        assert!(!ValueType::String.matches(&10.into()));
        assert!(ValueType::Number.matches(&10.into()));
        assert!(ValueType::Number.matches(&1.5.into()));
        assert!(!ValueType::Integer.matches(&1.5.into()));
        assert!(ValueType::Boolean.matches(&false.into()));
    }

    #[test]
    fn test_value_type_names_round_trip() {
        for ty in [
            ValueType::String,
            ValueType::Integer,
            ValueType::Float,
            ValueType::Number,
            ValueType::Boolean,
            ValueType::Map,
        ] {
            assert_eq!(ValueType::from_name(ty.name()), Some(ty));
        }
        assert_eq!(ValueType::from_name("symbol"), None);
    }

    #[test]
    fn test_lookup_key() {
        assert_eq!(Value::from("inline").lookup_key().as_deref(), Some("inline"));
        assert_eq!(Value::from(2).lookup_key().as_deref(), Some("2"));
        assert_eq!(Value::from(true).lookup_key(), None);
    }

    #[test]
    fn test_from_yaml_drops_nulls() {
        let values = Values::from_yaml(
            r#"
            a: 1
            b: ~
            c:
              d: two
              e: null
            "#,
        )
        .unwrap();

        assert_eq!(values.get("a"), Some(&Value::Int(1)));
        assert!(!values.contains_key("b"));
        let c = values.map("c").unwrap();
        assert_eq!(c.get("d"), Some(&Value::from("two")));
        assert!(!c.contains_key("e"));
    }

    #[test]
    fn test_from_yaml_numeric_keys() {
        let values = Values::from_yaml(
            r#"
            grid:
              2: two
              1.5: half
            3: three
            "#,
        )
        .unwrap();

        let grid = values.map("grid").unwrap();
        assert_eq!(grid.get("2"), Some(&Value::from("two")));
        assert_eq!(grid.get("1.5"), Some(&Value::from("half")));
        assert_eq!(values.get(&Value::Int(3).lookup_key().unwrap()), Some(&Value::from("three")));
    }

    #[test]
    fn test_from_json() {
        let values = Values::from_json(r#"{"gap": "normal", "wrap": true, "size": 1.5}"#).unwrap();
        assert_eq!(values.get("gap"), Some(&Value::from("normal")));
        assert_eq!(values.get("wrap"), Some(&Value::Bool(true)));
        assert_eq!(values.get("size"), Some(&Value::Float(1.5)));
    }

    #[test]
    fn test_from_yaml_rejects_non_mapping() {
        assert!(Values::from_yaml("- a\n- b").is_err());
    }

    #[test]
    fn test_map_mut_replaces_scalars() {
        let mut values = Values::new().with("whenNarrow", "oops");
        values.breakpoint_mut(Breakpoint::Narrow).insert("gap", "none");
        assert_eq!(
            values.breakpoint_value(Breakpoint::Narrow, "gap"),
            Some(&Value::from("none"))
        );
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut values = Values::new().with("a", 1).with("b", 2).with("c", 3);
        values.remove("b");
        let keys: Vec<&String> = values.keys().collect();
        assert_eq!(keys, ["a", "c"]);
    }

    #[test]
    fn test_prune_empty_breakpoints() {
        let mut values = Values::new()
            .with_breakpoint(Breakpoint::Narrow, Values::new())
            .with_breakpoint(Breakpoint::Regular, Values::new().with("gap", "none"));
        values.prune_empty_breakpoints();
        assert!(values.breakpoint(Breakpoint::Narrow).is_none());
        assert!(values.breakpoint(Breakpoint::Regular).is_some());
    }

    #[test]
    fn test_display() {
        let values = Values::new().with("a", "x").with("b", Values::new().with("c", 1));
        assert_eq!(values.to_string(), "{a: x, b: {c: 1}}");
    }
}
