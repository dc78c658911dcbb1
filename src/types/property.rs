//! Custom property values and the property bag attached to maps, layers,
//! sheets and tiles

use super::Color;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::fmt;

/// Type tag of a custom property (`type` attribute of a `property` node)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PropertyType {
    Int,
    Float,
    Bool,
    Color,
    #[default]
    String,
}

impl PropertyType {
    /// Resolve a `type` attribute. Absent or unrecognised tags are strings.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::to_ascii_lowercase).as_deref() {
            Some("int") => PropertyType::Int,
            Some("float") => PropertyType::Float,
            Some("bool") => PropertyType::Bool,
            Some("color") => PropertyType::Color,
            _ => PropertyType::String,
        }
    }

    /// The attribute spelling of this tag
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Int => "int",
            PropertyType::Float => "float",
            PropertyType::Bool => "bool",
            PropertyType::Color => "color",
            PropertyType::String => "string",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed custom property value
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Int(i32),
    Float(f32),
    Bool(bool),
    Color(Color),
    String(String),
}

impl PropertyValue {
    /// The structural type of the value (no string re-classification)
    pub fn value_type(&self) -> PropertyType {
        match self {
            PropertyValue::Int(_) => PropertyType::Int,
            PropertyValue::Float(_) => PropertyType::Float,
            PropertyValue::Bool(_) => PropertyType::Bool,
            PropertyValue::Color(_) => PropertyType::Color,
            PropertyValue::String(_) => PropertyType::String,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            PropertyValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            PropertyValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            PropertyValue::Color(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Int(v) => write!(f, "{v}"),
            PropertyValue::Float(v) => write!(f, "{v}"),
            PropertyValue::Bool(v) => write!(f, "{v}"),
            PropertyValue::Color(v) => write!(f, "{v}"),
            PropertyValue::String(v) => f.write_str(v),
        }
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        PropertyValue::Int(v)
    }
}

impl From<f32> for PropertyValue {
    fn from(v: f32) -> Self {
        PropertyValue::Float(v)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<Color> for PropertyValue {
    fn from(v: Color) -> Self {
        PropertyValue::Color(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::String(v.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::String(v)
    }
}

/// Ordering used when properties are written out: keys that do not start
/// with an uppercase letter come first, then uppercase-leading keys, each
/// group in lexical order.
pub fn property_key_order(a: &str, b: &str) -> Ordering {
    let upper = |key: &str| key.chars().next().is_some_and(char::is_uppercase);
    upper(a).cmp(&upper(b)).then_with(|| a.cmp(b))
}

/// Insertion-ordered property bag keyed by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    entries: IndexMap<String, PropertyValue>,
}

impl Properties {
    /// Create an empty bag
    pub fn new() -> Self {
        Properties {
            entries: IndexMap::new(),
        }
    }

    /// Set a value, replacing any previous value under the same key
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    /// Get a mutable value by key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut PropertyValue> {
        self.entries.get_mut(key)
    }

    /// Remove a value, keeping the order of the remaining entries
    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.entries.shift_remove(key)
    }

    /// Check if a key exists
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Boolean value under `key`, `false` when absent or not a bool
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(PropertyValue::as_bool).unwrap_or(false)
    }

    /// Copy every entry of `other` into this bag (last writer wins)
    pub fn merge(&mut self, other: &Properties) {
        for (key, value) in other.iter() {
            self.set(key, value.clone());
        }
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the bag is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries in the stable write order (see [`property_key_order`])
    pub fn sorted(&self) -> Vec<(&str, &PropertyValue)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|(a, _), (b, _)| property_key_order(a, b));
        entries
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Properties::new();
        for (key, value) in iter {
            properties.set(key, value);
        }
        properties
    }
}
