//! Typed property values ⇄ `(type, value)` attribute pairs.

use crate::document::TmxProperty;
use crate::error::{FormatError, Result, TmxError};
use crate::types::{Color, Properties, PropertyType, PropertyValue};

/// Parse the `value` attribute of a property according to its `type` tag.
///
/// Absent and unknown tags produce a string value. `bool` is true only for
/// the exact text `"true"`.
pub fn parse(type_tag: Option<&str>, raw: &str) -> Result<PropertyValue> {
    match PropertyType::from_tag(type_tag) {
        PropertyType::String => Ok(PropertyValue::String(raw.to_string())),
        PropertyType::Bool => Ok(PropertyValue::Bool(raw == "true")),
        PropertyType::Int => raw
            .trim()
            .parse::<i32>()
            .map(PropertyValue::Int)
            .map_err(|_| TmxError::from(FormatError::literal("int", raw))),
        PropertyType::Float => raw
            .trim()
            .parse::<f32>()
            .map(PropertyValue::Float)
            .map_err(|_| TmxError::from(FormatError::literal("float", raw))),
        PropertyType::Color => Color::parse(raw.trim()).map(PropertyValue::Color),
    }
}

/// Type tag to write for a value.
///
/// Strings that look exactly like an opaque `#RRGGBB` color (and survive a
/// parse/format round trip unchanged) are tagged `color`.
pub fn tag(value: &PropertyValue) -> PropertyType {
    match value {
        PropertyValue::String(s) if is_color_literal(s) => PropertyType::Color,
        other => other.value_type(),
    }
}

/// Text to write in the `value` attribute.
pub fn format(value: &PropertyValue) -> String {
    value.to_string()
}

fn is_color_literal(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && Color::parse(s).is_ok_and(|color| color.to_string() == s)
}

/// Build a document property node from a named value
pub fn to_node(name: &str, value: &PropertyValue) -> TmxProperty {
    TmxProperty {
        name: name.to_string(),
        property_type: Some(tag(value).as_str().to_string()),
        value: format(value),
    }
}

/// Convert a document property node into a typed value
pub fn from_node(node: &TmxProperty) -> Result<PropertyValue> {
    parse(node.property_type.as_deref(), &node.value)
}

/// Emit a whole bag as property nodes, in the stable write order
pub fn to_nodes(properties: &Properties) -> Vec<TmxProperty> {
    properties
        .sorted()
        .into_iter()
        .map(|(name, value)| to_node(name, value))
        .collect()
}
