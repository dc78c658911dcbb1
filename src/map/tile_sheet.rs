//! Tile sheets and the GID ranges assigned to them

use super::tile::AnimationFrame;
use crate::types::{Color, Properties, Size};
use std::collections::BTreeMap;

/// Id prefix of the 1×1 sheets created for image layers
pub const IMAGE_SHEET_PREFIX: &str = "zImageSheet_";

/// Contiguous, inclusive range of GIDs owned by a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GidRange {
    pub first: u32,
    pub last: u32,
}

impl GidRange {
    pub fn new(first: u32, last: u32) -> Self {
        GidRange { first, last }
    }

    /// Whether a base id (flags already stripped) falls in the range
    pub fn contains(&self, base_id: u32) -> bool {
        (self.first..=self.last).contains(&base_id)
    }

    /// Sheet-local index of a base id inside the range
    pub fn local_index(&self, base_id: u32) -> Option<u32> {
        self.contains(base_id).then(|| base_id - self.first)
    }
}

/// An image cut into equally sized tiles
#[derive(Debug, Clone, PartialEq)]
pub struct TileSheet {
    pub id: String,
    pub image_source: String,
    /// Size in tiles
    pub sheet_size: Size,
    /// Tile size in pixels
    pub tile_size: Size,
    /// Range the sheet was loaded from; not used on store
    pub gid_range: Option<GidRange>,
    pub properties: Properties,
    pub tile_properties: BTreeMap<u32, Properties>,
    pub animations: BTreeMap<u32, Vec<AnimationFrame>>,
    pub transparent_color: Option<Color>,
}

impl TileSheet {
    pub fn new(
        id: impl Into<String>,
        image_source: impl Into<String>,
        sheet_size: Size,
        tile_size: Size,
    ) -> Self {
        TileSheet {
            id: id.into(),
            image_source: image_source.into(),
            sheet_size,
            tile_size,
            gid_range: None,
            properties: Properties::new(),
            tile_properties: BTreeMap::new(),
            animations: BTreeMap::new(),
            transparent_color: None,
        }
    }

    /// Synthetic 1×1 sheet backing an image layer; the tile is the whole image
    pub fn image_sheet(
        layer_name: &str,
        image_source: impl Into<String>,
        image_size: Size,
    ) -> Self {
        TileSheet::new(
            Self::image_sheet_id(layer_name),
            image_source,
            Size::ONE,
            image_size,
        )
    }

    /// Id of the synthetic sheet for an image layer
    pub fn image_sheet_id(layer_name: &str) -> String {
        format!("{IMAGE_SHEET_PREFIX}{layer_name}")
    }

    pub fn is_image_sheet(&self) -> bool {
        self.id.starts_with(IMAGE_SHEET_PREFIX)
    }

    /// Saturates at `u32::MAX`
    pub fn tile_count(&self) -> u32 {
        self.sheet_size.width.saturating_mul(self.sheet_size.height)
    }

    pub fn contains_index(&self, index: u32) -> bool {
        index < self.tile_count()
    }

    pub fn tile_properties(&self, index: u32) -> Option<&Properties> {
        self.tile_properties.get(&index)
    }

    /// Property bag of a tile index, created on first use
    pub fn tile_properties_mut(&mut self, index: u32) -> &mut Properties {
        self.tile_properties.entry(index).or_default()
    }

    pub fn animation(&self, index: u32) -> Option<&[AnimationFrame]> {
        self.animations.get(&index).map(Vec::as_slice)
    }

    /// Declare an animation. Empty frame lists are not stored.
    pub fn set_animation(&mut self, index: u32, frames: Vec<AnimationFrame>) {
        if frames.is_empty() {
            self.animations.remove(&index);
        } else {
            self.animations.insert(index, frames);
        }
    }
}
