//! Map layers: tile grids and image layers

use super::tile::Tile;
use crate::types::{Location, Properties, Size};

/// Row-major grid of optional tiles
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    size: Size,
    cells: Vec<Option<Tile>>,
}

impl TileGrid {
    /// Empty grid of the given size
    pub fn new(size: Size) -> Self {
        TileGrid {
            size,
            cells: vec![None; size.area()],
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    fn offset(&self, location: Location) -> Option<usize> {
        let (x, y) = (u32::try_from(location.x).ok()?, u32::try_from(location.y).ok()?);
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }

    pub fn contains(&self, location: Location) -> bool {
        self.offset(location).is_some()
    }

    pub fn get(&self, location: Location) -> Option<&Tile> {
        self.offset(location).and_then(|i| self.cells[i].as_ref())
    }

    pub fn get_mut(&mut self, location: Location) -> Option<&mut Tile> {
        let i = self.offset(location)?;
        self.cells[i].as_mut()
    }

    /// Place (or clear) a tile. Returns `false` when the location is outside
    /// the grid.
    pub fn set(&mut self, location: Location, tile: Option<Tile>) -> bool {
        match self.offset(location) {
            Some(i) => {
                self.cells[i] = tile;
                true
            }
            None => false,
        }
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Option<Tile>] {
        &self.cells
    }

    /// Occupied cells with their locations, row-major
    pub fn occupied(&self) -> impl Iterator<Item = (Location, &Tile)> {
        let width = self.size.width.max(1) as usize;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            let tile = cell.as_ref()?;
            Some((Location::new((i % width) as i32, (i / width) as i32), tile))
        })
    }

    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.cells.iter_mut().filter_map(Option::as_mut)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// What a layer draws
#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    Tiles(TileGrid),
    /// Single image backed by a synthetic 1×1 sheet
    Image { sheet_id: String },
}

/// A map layer
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// TMX layer id, 0 when not yet assigned
    pub id: u32,
    pub name: String,
    /// Size in tiles
    pub size: Size,
    pub kind: LayerKind,
    /// Pixel offset
    pub offset: Location,
    pub opacity: f32,
    pub visible: bool,
    pub properties: Properties,
    pub description: String,
}

impl Layer {
    /// Empty tile layer
    pub fn tiles(name: impl Into<String>, size: Size) -> Self {
        Layer::with_kind(name, size, LayerKind::Tiles(TileGrid::new(size)))
    }

    /// Image layer drawing the given sheet
    pub fn image(name: impl Into<String>, size: Size, sheet_id: impl Into<String>) -> Self {
        Layer::with_kind(
            name,
            size,
            LayerKind::Image {
                sheet_id: sheet_id.into(),
            },
        )
    }

    fn with_kind(name: impl Into<String>, size: Size, kind: LayerKind) -> Self {
        Layer {
            id: 0,
            name: name.into(),
            size,
            kind,
            offset: Location::ORIGIN,
            opacity: 1.0,
            visible: true,
            properties: Properties::new(),
            description: String::new(),
        }
    }

    pub fn is_image_layer(&self) -> bool {
        matches!(self.kind, LayerKind::Image { .. })
    }

    pub fn grid(&self) -> Option<&TileGrid> {
        match &self.kind {
            LayerKind::Tiles(grid) => Some(grid),
            LayerKind::Image { .. } => None,
        }
    }

    pub fn grid_mut(&mut self) -> Option<&mut TileGrid> {
        match &mut self.kind {
            LayerKind::Tiles(grid) => Some(grid),
            LayerKind::Image { .. } => None,
        }
    }

    /// Sheet id of an image layer
    pub fn image_sheet_id(&self) -> Option<&str> {
        match &self.kind {
            LayerKind::Image { sheet_id } => Some(sheet_id),
            LayerKind::Tiles(_) => None,
        }
    }

    pub fn tile(&self, location: Location) -> Option<&Tile> {
        self.grid()?.get(location)
    }

    pub fn tile_mut(&mut self, location: Location) -> Option<&mut Tile> {
        self.grid_mut()?.get_mut(location)
    }

    /// Place a tile; image layers and out-of-grid locations are ignored
    pub fn set_tile(&mut self, location: Location, tile: Option<Tile>) -> bool {
        self.grid_mut().is_some_and(|grid| grid.set(location, tile))
    }
}
