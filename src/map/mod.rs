//! Normalized tile map
//!
//! The host-side model a TMX document is converted into: an ordered list of
//! layers drawing tiles from an ordered list of tile sheets.

mod layer;
mod tile;
mod tile_sheet;

pub use layer::{Layer, LayerKind, TileGrid};
pub use tile::{AnimationFrame, Tile, FLIP_DIAGONAL, FLIP_HORIZONTAL, FLIP_VERTICAL};
pub use tile_sheet::{GidRange, TileSheet, IMAGE_SHEET_PREFIX};

use crate::document::ORTHOGONAL;
use crate::notification::NotificationCollection;
use crate::types::{Color, Properties, Size};

/// A tile map
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    pub orientation: String,
    /// Size in tiles
    pub size: Size,
    /// Tile size in pixels
    pub tile_size: Size,
    pub background_color: Option<Color>,
    pub description: String,
    pub properties: Properties,
    pub layers: Vec<Layer>,
    pub tile_sheets: Vec<TileSheet>,
    /// Diagnostics gathered while loading
    pub notifications: NotificationCollection,
}

impl Map {
    /// Create an empty orthogonal map
    pub fn new(size: Size, tile_size: Size) -> Self {
        Map {
            orientation: ORTHOGONAL.to_string(),
            size,
            tile_size,
            background_color: None,
            description: String::new(),
            properties: Properties::new(),
            layers: Vec::new(),
            tile_sheets: Vec::new(),
            notifications: NotificationCollection::new(),
        }
    }

    /// Size in pixels, `None` if it does not fit in `u32`
    pub fn display_size(&self) -> Option<Size> {
        self.size.checked_mul(self.tile_size)
    }

    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn add_tile_sheet(&mut self, sheet: TileSheet) {
        self.tile_sheets.push(sheet);
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn layer_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.name == name)
    }

    pub fn tile_sheet(&self, id: &str) -> Option<&TileSheet> {
        self.tile_sheets.iter().find(|s| s.id == id)
    }

    pub fn tile_sheet_mut(&mut self, id: &str) -> Option<&mut TileSheet> {
        self.tile_sheets.iter_mut().find(|s| s.id == id)
    }

    /// Whether a tile index of `sheet` has a GID once stored.
    ///
    /// Covers every index inside the sheet. The last tileset sheet also owns
    /// index `tile_count`, since its range ends at `firstgid + tilecount`.
    pub fn has_gid_for(&self, sheet: &TileSheet, index: u32) -> bool {
        let is_last = self
            .tileset_sheets()
            .last()
            .is_some_and(|last| std::ptr::eq(last, sheet));
        sheet.contains_index(index) || (is_last && index == sheet.tile_count())
    }

    /// Sheets that are not backing an image layer, in declaration order
    pub fn tileset_sheets(&self) -> impl Iterator<Item = &TileSheet> {
        self.tile_sheets.iter().filter(|s| !s.is_image_sheet())
    }
}

impl Default for Map {
    fn default() -> Self {
        Map::new(Size::default(), Size::default())
    }
}
