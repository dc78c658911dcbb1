//! `tileset` node and its children

use super::TmxProperty;
use crate::error::{Result, TmxError};
use crate::types::{Color, Size};

/// `image` node of a tileset, tile or image layer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TmxImage {
    pub source: String,
    pub width: u32,
    pub height: u32,
    /// `trans` attribute (`RRGGBB`)
    pub transparent_color: Option<Color>,
}

impl TmxImage {
    pub fn new(source: impl Into<String>, width: u32, height: u32) -> Self {
        TmxImage {
            source: source.into(),
            width,
            height,
            transparent_color: None,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Parse and set the `trans` attribute
    pub fn set_transparent_attribute(&mut self, value: &str) -> Result<()> {
        self.transparent_color = Some(Color::parse_transparent_key(value)?);
        Ok(())
    }

    /// `trans` attribute value
    pub fn transparent_attribute(&self) -> Option<String> {
        self.transparent_color.map(|c| c.to_transparent_key())
    }
}

/// `grid` node. Carried for completeness; only orthogonal grids are meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TmxGrid {
    pub orientation: String,
    pub width: u32,
    pub height: u32,
}

/// `frame` node of a tile animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TmxFrame {
    pub tile_id: u32,
    /// Milliseconds
    pub duration: u32,
}

impl TmxFrame {
    pub fn new(tile_id: u32, duration: u32) -> Self {
        TmxFrame { tile_id, duration }
    }
}

/// `tile` node inside a tileset
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TmxTileSetTile {
    pub id: u32,
    pub properties: Vec<TmxProperty>,
    pub image: Option<TmxImage>,
    pub animation: Vec<TmxFrame>,
}

impl TmxTileSetTile {
    pub fn new(id: u32) -> Self {
        TmxTileSetTile {
            id,
            ..Default::default()
        }
    }

    pub fn is_animated(&self) -> bool {
        !self.animation.is_empty()
    }
}

/// `tileset` node, either embedded or a reference to an external file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TmxTileset {
    pub first_gid: u32,
    /// Path of an external tileset file
    pub source: Option<String>,
    pub name: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tile_count: u32,
    pub columns: u32,
    pub image: Option<TmxImage>,
    pub grid: Option<TmxGrid>,
    pub properties: Vec<TmxProperty>,
    pub tiles: Vec<TmxTileSetTile>,
}

impl TmxTileset {
    /// Embedded tileset
    pub fn new(name: impl Into<String>, first_gid: u32, tile_width: u32, tile_height: u32) -> Self {
        TmxTileset {
            first_gid,
            name: name.into(),
            tile_width,
            tile_height,
            ..Default::default()
        }
    }

    /// Reference to an external tileset file
    pub fn external(first_gid: u32, source: impl Into<String>) -> Self {
        TmxTileset {
            first_gid,
            source: Some(source.into()),
            ..Default::default()
        }
    }

    pub fn is_external(&self) -> bool {
        self.source.is_some()
    }

    /// Last GID owned by this tileset, inclusive.
    ///
    /// The range spans `tile_count + 1` ids, one past the last local index,
    /// so GID `first_gid + tile_count` still resolves here.
    pub fn last_gid(&self) -> u32 {
        self.first_gid.saturating_add(self.tile_count)
    }

    /// Merge a resolved external fragment: everything but `firstgid`
    /// comes from the fragment.
    pub fn resolved_with(&self, fragment: TmxTileset) -> TmxTileset {
        TmxTileset {
            first_gid: self.first_gid,
            source: None,
            ..fragment
        }
    }

    /// Sheet size in tiles.
    ///
    /// Derived from the image when present, otherwise from `columns` and
    /// `tilecount`.
    pub fn sheet_size(&self) -> Result<Size> {
        if let Some(image) = &self.image {
            if self.tile_width == 0 || self.tile_height == 0 {
                return Err(TmxError::malformed(format!(
                    "tileset {:?} has a zero tile size",
                    self.name
                )));
            }
            return Ok(Size::new(
                image.width / self.tile_width,
                image.height / self.tile_height,
            ));
        }

        if self.columns == 0 {
            return Err(TmxError::malformed(format!(
                "tileset {:?} has neither an image nor a column count",
                self.name
            )));
        }
        Ok(Size::new(self.columns, self.tile_count.div_ceil(self.columns)))
    }

    /// Find the `tile` node for a local index
    pub fn tile(&self, id: u32) -> Option<&TmxTileSetTile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    /// Find or insert the `tile` node for a local index
    pub fn tile_mut(&mut self, id: u32) -> &mut TmxTileSetTile {
        match self.tiles.iter().position(|t| t.id == id) {
            Some(i) => &mut self.tiles[i],
            None => {
                self.tiles.push(TmxTileSetTile::new(id));
                let last = self.tiles.len() - 1;
                &mut self.tiles[last]
            }
        }
    }
}
