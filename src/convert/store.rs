//! Map → document

use super::TmxFormat;
use crate::document::{
    TmxData, TmxFrame, TmxImage, TmxImageLayer, TmxLayer, TmxMap, TmxObject, TmxObjectGroup,
    TmxProperty, TmxTileset, DESCRIPTION_PROPERTY, ORTHOGONAL,
};
use crate::error::{Result, TmxError};
use crate::io::gid::{EMPTY_GID, GID_MASK};
use crate::io::property_codec;
use crate::map::{Layer, LayerKind, Map, TileGrid};
use crate::types::{Properties, Size};
use std::collections::{HashMap, HashSet};

/// Where a sheet ended up in the document
#[derive(Debug, Clone, Copy)]
struct StoredSheet {
    tileset: usize,
    first_gid: u32,
    /// Exclusive upper bound of the indices that get a GID
    index_limit: u32,
}

impl TmxFormat {
    /// Build a document tree from a [`Map`].
    ///
    /// GID ranges are assigned here from the sheet order; the map is not
    /// modified.
    pub fn store(&self, map: &Map) -> Result<TmxMap> {
        if map.orientation != ORTHOGONAL {
            return Err(TmxError::OrientationUnsupported(map.orientation.clone()));
        }
        let tile_size = self.store_tile_size(map)?;

        tracing::debug!(
            layers = map.layers.len(),
            sheets = map.tile_sheets.len(),
            %tile_size,
            encoding = %self.config.encoding,
            "storing tmx map"
        );

        let mut doc = TmxMap::new(
            map.size.width,
            map.size.height,
            tile_size.width,
            tile_size.height,
        );
        doc.background_color = map.background_color;
        doc.properties = store_described_properties(&map.description, &map.properties);

        let sheets = store_tile_sets(map, tile_size, &mut doc)?;

        let layer_ids = assign_layer_ids(&map.layers);
        let mut next_layer_id = layer_ids.iter().max().map_or(1, |id| id + 1);
        let mut groups = Vec::new();

        for (layer, &id) in map.layers.iter().zip(&layer_ids) {
            match &layer.kind {
                LayerKind::Tiles(grid) => {
                    let tmx_layer = self.store_layer(layer, grid, id, &sheets, &mut doc.tilesets)?;
                    doc.layers.push(tmx_layer);

                    let objects = tile_data_objects(grid, tile_size);
                    if !objects.is_empty() {
                        let mut group = TmxObjectGroup::new(next_layer_id, &layer.name);
                        group.objects = objects;
                        groups.push(group);
                        next_layer_id += 1;
                    }
                }
                LayerKind::Image { sheet_id } => {
                    let sheet = map
                        .tile_sheet(sheet_id)
                        .ok_or_else(|| TmxError::UnknownTileSheet(sheet_id.clone()))?;
                    let mut image = TmxImage::new(
                        &sheet.image_source,
                        sheet.tile_size.width,
                        sheet.tile_size.height,
                    );
                    image.transparent_color = sheet.transparent_color;

                    let mut image_layer = TmxImageLayer::new(id, &layer.name, image);
                    (image_layer.offset_x, image_layer.offset_y) = self.store_offset(layer);
                    image_layer.opacity = layer.opacity;
                    image_layer.visible = layer.visible;
                    image_layer.properties =
                        store_described_properties(&layer.description, &layer.properties);
                    doc.image_layers.push(image_layer);
                }
            }
        }

        // Object ids continue above every layer and group id.
        let mut next_object_id = next_layer_id;
        for object in groups.iter_mut().flat_map(|g| g.objects.iter_mut()) {
            object.id = next_object_id;
            next_object_id += 1;
        }
        doc.object_groups = groups;
        doc.next_layer_id = next_layer_id;
        doc.next_object_id = next_object_id;

        for tileset in &mut doc.tilesets {
            tileset.tiles.sort_by_key(|t| t.id);
        }

        tracing::debug!(
            tilesets = doc.tilesets.len(),
            layers = doc.layers.len(),
            image_layers = doc.image_layers.len(),
            object_groups = doc.object_groups.len(),
            "tmx map stored"
        );
        Ok(doc)
    }

    /// Document tile size: configured, or the map tile size divided by the
    /// multiplier
    fn store_tile_size(&self, map: &Map) -> Result<Size> {
        let size = match self.config.fixed_tile_size {
            Some(size) => size,
            None => map
                .tile_size
                .checked_div(self.config.tile_size_multiplier)
                .ok_or_else(|| {
                    TmxError::malformed(format!(
                        "tile size multiplier {} has a zero component",
                        self.config.tile_size_multiplier
                    ))
                })?,
        };
        if size.is_empty() {
            return Err(TmxError::malformed(format!("tile size {size} is empty")));
        }
        Ok(size)
    }

    fn store_layer(
        &self,
        layer: &Layer,
        grid: &TileGrid,
        id: u32,
        sheets: &HashMap<&str, StoredSheet>,
        tilesets: &mut [TmxTileset],
    ) -> Result<TmxLayer> {
        let size = grid.size();
        let mut gids = Vec::with_capacity(size.area());

        for cell in grid.cells() {
            let Some(tile) = cell else {
                gids.push(EMPTY_GID);
                continue;
            };

            let stored = sheets
                .get(tile.sheet_id.as_str())
                .ok_or_else(|| TmxError::UnknownTileSheet(tile.sheet_id.clone()))?;
            if tile.index >= stored.index_limit {
                return Err(TmxError::malformed(format!(
                    "tile index {} is outside sheet {:?} of {} indices",
                    tile.index, tile.sheet_id, stored.index_limit
                )));
            }

            if let Some(frames) = &tile.animation {
                let entry = tilesets[stored.tileset].tile_mut(tile.index);
                if entry.animation.is_empty() {
                    entry.animation = frames
                        .iter()
                        .map(|f| TmxFrame::new(f.tile_index, f.duration))
                        .collect();
                }
            }

            gids.push(stored.first_gid + tile.index);
        }

        let mut tmx_layer = TmxLayer::new(id, &layer.name, size.width, size.height);
        tmx_layer.data = Some(TmxData::from_gids(self.config.encoding, size.width, &gids)?);
        (tmx_layer.offset_x, tmx_layer.offset_y) = self.store_offset(layer);
        tmx_layer.opacity = layer.opacity;
        tmx_layer.visible = layer.visible;
        tmx_layer.properties = store_described_properties(&layer.description, &layer.properties);

        tracing::trace!(
            layer = %layer.name,
            id,
            tiles = grid.occupied_count(),
            "stored tile layer"
        );
        Ok(tmx_layer)
    }

    /// Layer offset back in document pixels
    fn store_offset(&self, layer: &Layer) -> (f32, f32) {
        let multiplier = self.config.tile_size_multiplier;
        (
            layer.offset.x as f32 / multiplier.width.max(1) as f32,
            layer.offset.y as f32 / multiplier.height.max(1) as f32,
        )
    }
}

/// Emit one tileset per non-image sheet, assigning GID ranges by cumulative
/// tile count in sheet order.
fn store_tile_sets<'m>(
    map: &'m Map,
    tile_size: Size,
    doc: &mut TmxMap,
) -> Result<HashMap<&'m str, StoredSheet>> {
    let mut sheets = HashMap::new();
    let mut first_gid = 1u32;
    let last_sheet = map.tileset_sheets().last();

    for sheet in map.tileset_sheets() {
        let tile_count = sheet.tile_count();
        let mut tileset = TmxTileset::new(&sheet.id, first_gid, tile_size.width, tile_size.height);
        tileset.tile_count = tile_count;
        tileset.columns = sheet.sheet_size.width;

        let pixels = sheet.sheet_size.checked_mul(tile_size).ok_or_else(|| {
            TmxError::malformed(format!("image of sheet {:?} is too large", sheet.id))
        })?;
        let mut image = TmxImage::new(&sheet.image_source, pixels.width, pixels.height);
        image.transparent_color = sheet.transparent_color;
        tileset.image = Some(image);
        tileset.properties = property_codec::to_nodes(&sheet.properties);

        for (&index, properties) in &sheet.tile_properties {
            if !properties.is_empty() {
                tileset.tile_mut(index).properties = property_codec::to_nodes(properties);
            }
        }
        for (&index, frames) in &sheet.animations {
            tileset.tile_mut(index).animation = frames
                .iter()
                .map(|f| TmxFrame::new(f.tile_index, f.duration))
                .collect();
        }

        // The last range also owns `firstgid + tilecount`.
        let is_last = last_sheet.is_some_and(|last| std::ptr::eq(last, sheet));
        sheets.entry(sheet.id.as_str()).or_insert(StoredSheet {
            tileset: doc.tilesets.len(),
            first_gid,
            index_limit: tile_count.saturating_add(u32::from(is_last)),
        });
        doc.tilesets.push(tileset);

        first_gid = first_gid
            .checked_add(tile_count)
            .filter(|&next| next <= GID_MASK)
            .ok_or_else(|| {
                TmxError::malformed(format!(
                    "gid range of sheet {:?} runs into the flip bits",
                    sheet.id
                ))
            })?;
    }

    Ok(sheets)
}

/// Keep unique non-zero layer ids; give the rest fresh ids above the
/// highest kept one.
fn assign_layer_ids(layers: &[Layer]) -> Vec<u32> {
    let mut used = HashSet::new();
    let kept: Vec<Option<u32>> = layers
        .iter()
        .map(|l| (l.id != 0 && used.insert(l.id)).then_some(l.id))
        .collect();

    let mut next = used.iter().max().map_or(1, |id| id + 1);
    kept.into_iter()
        .map(|id| {
            id.unwrap_or_else(|| {
                let id = next;
                next += 1;
                id
            })
        })
        .collect()
}

/// One `TileData` object per occupied cell with properties. Ids are
/// assigned by the caller.
fn tile_data_objects(grid: &TileGrid, tile_size: Size) -> Vec<TmxObject> {
    let (tw, th) = (tile_size.width as f32, tile_size.height as f32);
    grid.occupied()
        .filter(|(_, tile)| !tile.properties.is_empty())
        .map(|(location, tile)| {
            let (x, y) = (location.x as f32 * tw, location.y as f32 * th);
            let mut object = TmxObject::tile_data(0, x, y, tw, th);
            object.properties = property_codec::to_nodes(&tile.properties);
            object
        })
        .collect()
}

fn store_described_properties(description: &str, properties: &Properties) -> Vec<TmxProperty> {
    if description.is_empty() {
        return property_codec::to_nodes(properties);
    }
    let mut all = properties.clone();
    all.set(DESCRIPTION_PROPERTY, description);
    property_codec::to_nodes(&all)
}
