//! TMX document tree
//!
//! The node types mirror the Tiled XML schema element for element. Raw XML
//! parsing and serialization happen outside this crate; the converter in
//! [`crate::convert`] only ever sees these nodes.

mod layer;
mod object;
mod tileset;

pub use layer::{TmxChunk, TmxData, TmxImageLayer, TmxLayer, TmxTile};
pub use object::{TmxObject, TmxObjectGroup, TILE_DATA_OBJECT};
pub use tileset::{TmxFrame, TmxGrid, TmxImage, TmxTileSetTile, TmxTileset};

use crate::types::Color;

/// Property name that carries the description of a map or layer
pub const DESCRIPTION_PROPERTY: &str = "@Description";

/// The only orientation the converter accepts
pub const ORTHOGONAL: &str = "orthogonal";

/// `property` node: name, optional type tag and the raw value text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TmxProperty {
    pub name: String,
    /// `type` attribute; absent means string
    pub property_type: Option<String>,
    pub value: String,
}

impl TmxProperty {
    /// Untyped (string) property
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        TmxProperty {
            name: name.into(),
            property_type: None,
            value: value.into(),
        }
    }

    /// Property with an explicit type tag
    pub fn typed(name: impl Into<String>, property_type: &str, value: impl Into<String>) -> Self {
        TmxProperty {
            name: name.into(),
            property_type: Some(property_type.to_string()),
            value: value.into(),
        }
    }

    /// Whether this property holds a map or layer description
    pub fn is_description(&self) -> bool {
        self.name == DESCRIPTION_PROPERTY
    }
}

/// Root `map` node
#[derive(Debug, Clone, PartialEq)]
pub struct TmxMap {
    pub version: String,
    pub tiled_version: Option<String>,
    pub orientation: String,
    pub render_order: Option<String>,
    /// Width in tiles
    pub width: u32,
    /// Height in tiles
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub infinite: bool,
    pub background_color: Option<Color>,
    pub next_layer_id: u32,
    pub next_object_id: u32,
    pub properties: Vec<TmxProperty>,
    pub tilesets: Vec<TmxTileset>,
    pub layers: Vec<TmxLayer>,
    pub image_layers: Vec<TmxImageLayer>,
    pub object_groups: Vec<TmxObjectGroup>,
}

impl TmxMap {
    /// Create an empty orthogonal map
    pub fn new(width: u32, height: u32, tile_width: u32, tile_height: u32) -> Self {
        TmxMap {
            width,
            height,
            tile_width,
            tile_height,
            ..Default::default()
        }
    }

    /// `infinite` attribute value
    pub fn infinite_attribute(&self) -> u8 {
        u8::from(self.infinite)
    }

    /// `backgroundcolor` attribute value
    pub fn background_color_attribute(&self) -> Option<String> {
        self.background_color.map(|c| c.to_string())
    }

    pub fn is_orthogonal(&self) -> bool {
        self.orientation == ORTHOGONAL
    }

    /// Find a grid layer by name
    pub fn layer(&self, name: &str) -> Option<&TmxLayer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Find an object group by name
    pub fn object_group(&self, name: &str) -> Option<&TmxObjectGroup> {
        self.object_groups.iter().find(|g| g.name == name)
    }

    /// Find a tileset by name
    pub fn tileset(&self, name: &str) -> Option<&TmxTileset> {
        self.tilesets.iter().find(|t| t.name == name)
    }

    /// Find a property by name
    pub fn property(&self, name: &str) -> Option<&TmxProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

impl Default for TmxMap {
    fn default() -> Self {
        TmxMap {
            version: "1.0".to_string(),
            tiled_version: None,
            orientation: ORTHOGONAL.to_string(),
            render_order: None,
            width: 0,
            height: 0,
            tile_width: 0,
            tile_height: 0,
            infinite: false,
            background_color: None,
            next_layer_id: 1,
            next_object_id: 1,
            properties: Vec::new(),
            tilesets: Vec::new(),
            layers: Vec::new(),
            image_layers: Vec::new(),
            object_groups: Vec::new(),
        }
    }
}
