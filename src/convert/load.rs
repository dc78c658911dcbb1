//! Document → map

use super::TmxFormat;
use crate::document::{
    TmxData, TmxImageLayer, TmxLayer, TmxMap, TmxObjectGroup, TmxProperty, TmxTileset, ORTHOGONAL,
};
use crate::error::{Result, TmxError};
use crate::io::gid::{self, EMPTY_GID};
use crate::io::property_codec;
use crate::map::{AnimationFrame, GidRange, Layer, Map, Tile, TileSheet};
use crate::notification::{NotificationCollection, NotificationType};
use crate::types::{Location, Properties, Size};
use std::borrow::Cow;
use std::ops::Range;

impl TmxFormat {
    /// Convert a document tree into a [`Map`].
    ///
    /// Fails on the first error; no partial map is returned.
    pub fn load(&self, doc: &TmxMap) -> Result<Map> {
        if !doc.is_orthogonal() {
            return Err(TmxError::OrientationUnsupported(doc.orientation.clone()));
        }

        let tile_size = self.load_tile_size(doc);
        if tile_size.is_empty() {
            return Err(TmxError::malformed(format!("tile size {tile_size} is empty")));
        }

        tracing::debug!(
            width = doc.width,
            height = doc.height,
            %tile_size,
            tilesets = doc.tilesets.len(),
            layers = doc.layers.len(),
            "loading tmx map"
        );

        let multiplier = self.config.tile_size_multiplier;
        let scaled = tile_size.checked_mul(multiplier).ok_or_else(|| {
            TmxError::malformed(format!("tile size {tile_size} scaled by {multiplier} overflows"))
        })?;
        let mut map = Map::new(Size::new(doc.width, doc.height), scaled);
        map.background_color = doc.background_color;
        load_described_properties(&doc.properties, &mut map.description, &mut map.properties)?;

        self.load_tile_sets(doc, &mut map)?;
        self.load_layers(doc, &mut map)?;
        self.load_image_layers(doc, &mut map)?;
        self.load_objects(doc, tile_size, &mut map)?;

        tracing::debug!(
            layers = map.layers.len(),
            sheets = map.tile_sheets.len(),
            notifications = map.notifications.len(),
            "tmx map loaded"
        );
        Ok(map)
    }

    /// Document tile size, before the multiplier is applied
    fn load_tile_size(&self, doc: &TmxMap) -> Size {
        self.config
            .fixed_tile_size
            .unwrap_or(Size::new(doc.tile_width, doc.tile_height))
    }

    fn resolve_tileset<'a>(&self, tileset: &'a TmxTileset) -> Result<Cow<'a, TmxTileset>> {
        let Some(source) = &tileset.source else {
            return Ok(Cow::Borrowed(tileset));
        };
        let resolver = self
            .resolver
            .as_ref()
            .ok_or_else(|| TmxError::UnresolvedTileset(source.clone()))?;

        tracing::trace!(source = %source, "resolving external tileset");
        let fragment = resolver.resolve(source)?;
        Ok(Cow::Owned(tileset.resolved_with(fragment)))
    }

    fn load_tile_sets(&self, doc: &TmxMap, map: &mut Map) -> Result<()> {
        let tile_size = map.tile_size;
        for reference in &doc.tilesets {
            let tileset = self.resolve_tileset(reference)?;
            let mut sheet = TileSheet::new(
                &tileset.name,
                tileset.image.as_ref().map(|i| i.source.as_str()).unwrap_or_default(),
                tileset.sheet_size()?,
                tile_size,
            );
            sheet.gid_range = Some(GidRange::new(tileset.first_gid, tileset.last_gid()));
            sheet.transparent_color = tileset.image.as_ref().and_then(|i| i.transparent_color);
            sheet.properties = load_properties(&tileset.properties)?;

            if let Some(grid) = &tileset.grid {
                if !grid.orientation.is_empty() && grid.orientation != ORTHOGONAL {
                    map.notifications.notify_for(
                        NotificationType::NotSupported,
                        &tileset.name,
                        format!("{} tileset grid is ignored", grid.orientation),
                    );
                }
            }

            for tile in &tileset.tiles {
                if !tile.properties.is_empty() {
                    *sheet.tile_properties_mut(tile.id) = load_properties(&tile.properties)?;
                }
                if tile.image.is_some() {
                    map.notifications.notify_for(
                        NotificationType::NotImplemented,
                        &tileset.name,
                        format!("image of tile {} is ignored", tile.id),
                    );
                }
                sheet.set_animation(
                    tile.id,
                    tile.animation
                        .iter()
                        .map(|f| AnimationFrame::new(f.tile_id, f.duration))
                        .collect(),
                );
            }

            tracing::trace!(
                sheet = %sheet.id,
                first_gid = tileset.first_gid,
                last_gid = tileset.last_gid(),
                "loaded tileset"
            );
            map.add_tile_sheet(sheet);
        }

        clamp_gid_ranges(&mut map.tile_sheets);
        Ok(())
    }

    fn load_layers(&self, doc: &TmxMap, map: &mut Map) -> Result<()> {
        for tmx_layer in &doc.layers {
            let layer = self.load_layer(tmx_layer, map)?;
            map.add_layer(layer);
        }
        Ok(())
    }

    fn load_layer(&self, tmx_layer: &TmxLayer, map: &mut Map) -> Result<Layer> {
        let size = Size::new(tmx_layer.width, tmx_layer.height);
        let mut layer = Layer::tiles(&tmx_layer.name, size);
        layer.id = tmx_layer.id;
        load_described_properties(
            &tmx_layer.properties,
            &mut layer.description,
            &mut layer.properties,
        )?;

        if let Some(data) = &tmx_layer.data {
            let cells = layer_cells(data, size, &tmx_layer.name, &mut map.notifications)?;
            for (location, gid) in cells {
                let tile = load_tile(&map.tile_sheets, gid)?;
                layer.set_tile(location, tile);
            }
        }

        layer.offset = self.scale_offset(tmx_layer.offset_x, tmx_layer.offset_y);
        layer.opacity = tmx_layer.opacity;
        layer.visible = tmx_layer.visible;

        tracing::trace!(
            layer = %layer.name,
            tiles = layer.grid().map_or(0, |g| g.occupied_count()),
            "loaded tile layer"
        );
        Ok(layer)
    }

    fn load_image_layers(&self, doc: &TmxMap, map: &mut Map) -> Result<()> {
        for tmx_layer in &doc.image_layers {
            let Some(image) = &tmx_layer.image else {
                map.notifications.notify_for(
                    NotificationType::Warning,
                    &tmx_layer.name,
                    "image layer without an image is skipped",
                );
                continue;
            };

            let mut sheet = TileSheet::image_sheet(&tmx_layer.name, &image.source, image.size());
            sheet.transparent_color = image.transparent_color;
            let layer = self.load_image_layer(tmx_layer, map.size, &sheet.id)?;

            map.add_tile_sheet(sheet);
            map.add_layer(layer);
        }
        Ok(())
    }

    fn load_image_layer(
        &self,
        tmx_layer: &TmxImageLayer,
        size: Size,
        sheet_id: &str,
    ) -> Result<Layer> {
        let mut layer = Layer::image(&tmx_layer.name, size, sheet_id);
        layer.id = tmx_layer.id;
        load_described_properties(
            &tmx_layer.properties,
            &mut layer.description,
            &mut layer.properties,
        )?;
        layer.offset = self.scale_offset(tmx_layer.offset_x, tmx_layer.offset_y);
        layer.opacity = tmx_layer.opacity;
        layer.visible = tmx_layer.visible;
        Ok(layer)
    }

    fn load_objects(&self, doc: &TmxMap, tile_size: Size, map: &mut Map) -> Result<()> {
        for group in &doc.object_groups {
            let target = map
                .layers
                .iter_mut()
                .find(|l| l.name == group.name && !l.is_image_layer());
            let Some(layer) = target else {
                map.notifications.notify_for(
                    NotificationType::Warning,
                    &group.name,
                    "object group has no matching tile layer",
                );
                continue;
            };
            apply_tile_data(group, tile_size, layer, &mut map.notifications)?;
        }
        Ok(())
    }

    fn scale_offset(&self, x: f32, y: f32) -> Location {
        let multiplier = self.config.tile_size_multiplier;
        Location::new(
            (x * multiplier.width as f32).floor() as i32,
            (y * multiplier.height as f32).floor() as i32,
        )
    }
}

/// Cut each inclusive range short of the next tileset's `firstgid`, so the
/// id one past a sheet's last tile belongs to the sheet declared there.
fn clamp_gid_ranges(sheets: &mut [TileSheet]) {
    let firsts: Vec<u32> = sheets.iter().filter_map(|s| s.gid_range).map(|r| r.first).collect();
    for range in sheets.iter_mut().filter_map(|s| s.gid_range.as_mut()) {
        let next = firsts.iter().copied().filter(|&f| f > range.first).min();
        if let Some(next) = next {
            range.last = range.last.min(next - 1);
        }
    }
}

/// Locate the sheet owning `gid` and build the placed tile.
///
/// GID 0 is an empty cell. Sheets are searched in declaration order and the
/// first range containing the base id wins.
pub(crate) fn load_tile(sheets: &[TileSheet], gid: u32) -> Result<Option<Tile>> {
    if gid == EMPTY_GID {
        return Ok(None);
    }

    let parts = gid::decompose(gid);
    let (sheet, index) = sheets
        .iter()
        .find_map(|sheet| {
            let index = sheet.gid_range?.local_index(parts.base_id)?;
            Some((sheet, index))
        })
        .ok_or(TmxError::InvalidGid(gid))?;

    let mut tile = match sheet.animation(index) {
        Some(frames) => Tile::animated(&sheet.id, index, frames.to_vec()),
        None => Tile::new(&sheet.id, index),
    };
    tile.set_flip_flags(parts.flags);
    Ok(Some(tile))
}

/// Non-empty cells of a `data` node with their grid locations.
///
/// A flat payload must be empty or cover the grid exactly. Chunk payloads
/// are laid out from the chunk origin, wrapping to column 0 of the next row
/// at the layer width; cells outside the grid are dropped with a warning.
fn layer_cells(
    data: &TmxData,
    size: Size,
    layer_name: &str,
    notifications: &mut NotificationCollection,
) -> Result<Vec<(Location, u32)>> {
    let width = size.width as i32;
    let height = size.height as i32;
    let mut cells = Vec::new();

    if !data.is_chunked() {
        let gids = data.decode()?;
        if !gids.is_empty() && gids.len() != size.area() {
            return Err(TmxError::malformed(format!(
                "layer {layer_name:?} has {} tiles, expected {} for {size}",
                gids.len(),
                size.area()
            )));
        }
        for (i, gid) in gids.into_iter().enumerate() {
            if gid != EMPTY_GID {
                let i = i as i32;
                cells.push((Location::new(i % width, i / width), gid));
            }
        }
        return Ok(cells);
    }

    let mut dropped = 0usize;
    for chunk in &data.chunks {
        let mut cursor = Location::new(chunk.x, chunk.y);
        for gid in chunk.decode(data.context)? {
            let inside = (0..width).contains(&cursor.x) && (0..height).contains(&cursor.y);
            if gid != EMPTY_GID {
                if inside {
                    cells.push((cursor, gid));
                } else {
                    dropped += 1;
                }
            }

            cursor.x += 1;
            if cursor.x >= width {
                cursor.x = 0;
                cursor.y += 1;
            }
        }
    }

    if dropped > 0 {
        notifications.notify_for(
            NotificationType::Warning,
            layer_name,
            format!("{dropped} chunk tiles fall outside the {size} layer grid"),
        );
    }
    Ok(cells)
}

/// Apply the `TileData` objects of a group to the occupied cells they cover.
fn apply_tile_data(
    group: &TmxObjectGroup,
    tile_size: Size,
    layer: &mut Layer,
    notifications: &mut NotificationCollection,
) -> Result<()> {
    let (tw, th) = (tile_size.width as f32, tile_size.height as f32);
    let bounds = layer.size;

    for object in group.tile_data_objects() {
        let properties = load_properties(&object.properties)?;
        let columns = covered_span(object.x, object.width, tw, bounds.width);
        let rows = covered_span(object.y, object.height, th, bounds.height);

        for y in rows {
            for x in columns.clone() {
                if let Some(tile) = layer.tile_mut(Location::new(x, y)) {
                    tile.properties.merge(&properties);
                    tile.sync_render_hint();
                }
            }
        }
    }

    let skipped = group.objects.len() - group.tile_data_objects().count();
    if skipped > 0 {
        notifications.notify_for(
            NotificationType::NotImplemented,
            &group.name,
            format!("{skipped} objects other than TileData are not converted"),
        );
    }
    Ok(())
}

/// Cells `floor(start / cell)` onwards, `floor(extent / cell)` of them,
/// clipped to `0..limit`
fn covered_span(start: f32, extent: f32, cell: f32, limit: u32) -> Range<i32> {
    let first = (start / cell).floor() as i32;
    let count = (extent / cell).floor() as i32;
    let limit = i32::try_from(limit).unwrap_or(i32::MAX);
    first.max(0)..first.saturating_add(count).min(limit)
}

fn load_properties(nodes: &[TmxProperty]) -> Result<Properties> {
    let mut properties = Properties::new();
    for node in nodes {
        properties.set(&node.name, property_codec::from_node(node)?);
    }
    Ok(properties)
}

/// Like [`load_properties`], routing `@Description` into `description`
fn load_described_properties(
    nodes: &[TmxProperty],
    description: &mut String,
    properties: &mut Properties,
) -> Result<()> {
    for node in nodes {
        if node.is_description() {
            description.clone_from(&node.value);
        } else {
            properties.set(&node.name, property_codec::from_node(node)?);
        }
    }
    Ok(())
}
