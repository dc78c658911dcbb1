//! Placed tile instances

use crate::io::gid::{FlipFlags, RenderHint};
use crate::types::{Properties, PropertyValue};

/// Tile property recording a horizontal flip
pub const FLIP_HORIZONTAL: &str = "H";
/// Tile property recording a vertical flip
pub const FLIP_VERTICAL: &str = "V";
/// Tile property recording a diagonal flip
pub const FLIP_DIAGONAL: &str = "D";

/// One frame of a tile animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationFrame {
    /// Index within the owning sheet
    pub tile_index: u32,
    /// Milliseconds
    pub duration: u32,
}

impl AnimationFrame {
    pub fn new(tile_index: u32, duration: u32) -> Self {
        AnimationFrame {
            tile_index,
            duration,
        }
    }
}

/// A tile placed in a grid layer
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Id of the owning tile sheet
    pub sheet_id: String,
    /// Index within the sheet
    pub index: u32,
    /// Animation frames, never empty when present
    pub animation: Option<Vec<AnimationFrame>>,
    pub properties: Properties,
    pub render_hint: RenderHint,
}

impl Tile {
    /// Static tile
    pub fn new(sheet_id: impl Into<String>, index: u32) -> Self {
        Tile {
            sheet_id: sheet_id.into(),
            index,
            animation: None,
            properties: Properties::new(),
            render_hint: RenderHint::IDENTITY,
        }
    }

    /// Animated tile. An empty frame list yields a static tile.
    pub fn animated(sheet_id: impl Into<String>, index: u32, frames: Vec<AnimationFrame>) -> Self {
        let mut tile = Tile::new(sheet_id, index);
        if !frames.is_empty() {
            tile.animation = Some(frames);
        }
        tile
    }

    pub fn is_animated(&self) -> bool {
        self.animation.is_some()
    }

    /// Flip flags recorded in the `H`/`V`/`D` properties
    pub fn flip_flags(&self) -> FlipFlags {
        FlipFlags::from_bools(
            self.properties.flag(FLIP_HORIZONTAL),
            self.properties.flag(FLIP_VERTICAL),
            self.properties.flag(FLIP_DIAGONAL),
        )
    }

    /// Record flip flags as properties. Only set flags are written.
    pub fn set_flip_flags(&mut self, flags: FlipFlags) {
        let keys = [
            (FlipFlags::HORIZONTAL, FLIP_HORIZONTAL),
            (FlipFlags::VERTICAL, FLIP_VERTICAL),
            (FlipFlags::DIAGONAL, FLIP_DIAGONAL),
        ];
        for (flag, key) in keys {
            if flags.contains(flag) {
                self.properties.set(key, PropertyValue::Bool(true));
            }
        }
        self.sync_render_hint();
    }

    /// Recompute the render hint from the flip properties
    pub fn sync_render_hint(&mut self) {
        self.render_hint = self.flip_flags().render_hint();
    }
}
