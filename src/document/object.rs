//! `objectgroup` and `object` nodes

use super::TmxProperty;
use crate::types::Color;

/// Name of the objects that carry per-cell property overlays
pub const TILE_DATA_OBJECT: &str = "TileData";

/// `object` node
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TmxObject {
    pub id: u32,
    pub name: String,
    pub object_type: Option<String>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
    pub properties: Vec<TmxProperty>,
}

impl TmxObject {
    /// Rectangular `TileData` object covering the given pixel bounds
    pub fn tile_data(id: u32, x: f32, y: f32, width: f32, height: f32) -> Self {
        TmxObject {
            id,
            name: TILE_DATA_OBJECT.to_string(),
            x,
            y,
            width,
            height,
            ..Default::default()
        }
    }

    pub fn is_tile_data(&self) -> bool {
        self.name == TILE_DATA_OBJECT
    }
}

/// `objectgroup` node
#[derive(Debug, Clone, PartialEq)]
pub struct TmxObjectGroup {
    pub id: u32,
    pub name: String,
    pub color: Option<Color>,
    pub visible: bool,
    pub locked: bool,
    pub objects: Vec<TmxObject>,
}

impl TmxObjectGroup {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        TmxObjectGroup {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Objects named `TileData`
    pub fn tile_data_objects(&self) -> impl Iterator<Item = &TmxObject> {
        self.objects.iter().filter(|o| o.is_tile_data())
    }
}

impl Default for TmxObjectGroup {
    fn default() -> Self {
        TmxObjectGroup {
            id: 0,
            name: String::new(),
            color: None,
            visible: true,
            locked: false,
            objects: Vec::new(),
        }
    }
}
