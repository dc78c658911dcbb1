//! Core value types shared by the document tree and the map model

pub mod color;
pub mod geometry;
pub mod property;

pub use color::Color;
pub use geometry::{Location, Size};
pub use property::{property_key_order, Properties, PropertyType, PropertyValue};
