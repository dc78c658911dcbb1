//! Test document and map builders.
//!
//! `two_tileset_document()` is the canonical small document: tilesets at
//! firstgid 1 (10 tiles) and firstgid 11 (5 tiles) under one 4×2 layer.
//! `sample_map()` exercises every part of the map model in one place.

#![allow(dead_code)]

use tmxtile::document::{TmxData, TmxImage, TmxLayer, TmxMap, TmxTileset};
use tmxtile::io::gid::FlipFlags;
use tmxtile::map::AnimationFrame;
use tmxtile::{Color, EncodingContext, Layer, Location, Map, Size, Tile, TileSheet};

pub const TILE: u32 = 16;

/// Embedded tileset with a `columns × rows` image
pub fn tileset(name: &str, first_gid: u32, columns: u32, rows: u32) -> TmxTileset {
    let mut tileset = TmxTileset::new(name, first_gid, TILE, TILE);
    tileset.tile_count = columns * rows;
    tileset.columns = columns;
    tileset.image = Some(TmxImage::new(format!("{name}.png"), columns * TILE, rows * TILE));
    tileset
}

/// Grid layer with a flat payload
pub fn layer(id: u32, name: &str, size: Size, context: EncodingContext, gids: &[u32]) -> TmxLayer {
    let mut layer = TmxLayer::new(id, name, size.width, size.height);
    layer.data = Some(TmxData::from_gids(context, size.width, gids).unwrap());
    layer
}

/// Tilesets `terrain` (firstgid 1, 10 tiles) and `props` (firstgid 11,
/// 5 tiles) with one 4×2 CSV layer named `Back`
pub fn two_tileset_document(gids: &[u32]) -> TmxMap {
    let mut doc = TmxMap::new(4, 2, TILE, TILE);
    doc.tilesets.push(tileset("terrain", 1, 5, 2));
    doc.tilesets.push(tileset("props", 11, 5, 1));
    doc.layers
        .push(layer(1, "Back", Size::new(4, 2), EncodingContext::CSV, gids));
    doc
}

fn water_animation() -> Vec<AnimationFrame> {
    vec![AnimationFrame::new(5, 120), AnimationFrame::new(6, 120)]
}

/// A 4×3 map with two grid layers, an image layer, typed properties,
/// animations, flips and per-cell properties.
pub fn sample_map() -> Map {
    let mut map = Map::new(Size::new(4, 3), Size::square(TILE));
    map.description = "A test map".to_string();
    map.background_color = Some(Color::from_rgb(0x20, 0x30, 0x40));
    map.properties.set("Music", "theme.ogg");
    map.properties.set("level", 3);
    map.properties.set("Gravity", 9.5f32);
    map.properties.set("Outdoors", true);
    map.properties.set("Tint", Color::from_rgba(0x11, 0x22, 0x33, 0x80));

    let mut terrain = TileSheet::new("terrain", "terrain.png", Size::new(4, 2), Size::square(TILE));
    terrain.properties.set("Author", "tester");
    terrain.tile_properties_mut(1).set("Water", true);
    terrain.set_animation(5, water_animation());
    map.add_tile_sheet(terrain);
    map.add_tile_sheet(TileSheet::new("props", "props.png", Size::new(2, 2), Size::square(TILE)));

    let mut sky = TileSheet::image_sheet("Sky", "sky.png", Size::new(64, 48));
    sky.transparent_color = Some(Color::from_rgb(0xFF, 0x00, 0xFF));

    // Back: every cell filled from terrain
    let mut back = Layer::tiles("Back", map.size);
    back.id = 1;
    for y in 0..3 {
        for x in 0..4 {
            let index = ((x + y * 4) % 8) as u32;
            let tile = if index == 5 {
                Tile::animated("terrain", index, water_animation())
            } else {
                Tile::new("terrain", index)
            };
            back.set_tile(Location::new(x, y), Some(tile));
        }
    }
    if let Some(tile) = back.tile_mut(Location::new(1, 1)) {
        tile.set_flip_flags(FlipFlags::HORIZONTAL | FlipFlags::DIAGONAL);
    }
    if let Some(tile) = back.tile_mut(Location::new(2, 0)) {
        tile.properties.set("Passable", false);
        tile.properties.set("cost", 4);
    }
    map.add_layer(back);

    // Front: sparse, hidden, offset
    let mut front = Layer::tiles("Front", map.size);
    front.id = 2;
    front.description = "Foreground".to_string();
    front.offset = Location::new(8, -4);
    front.opacity = 0.5;
    front.visible = false;
    front.properties.set("Depth", 2);
    front.set_tile(Location::new(3, 2), Some(Tile::new("props", 3)));
    let mut flipped = Tile::new("props", 0);
    flipped.set_flip_flags(FlipFlags::VERTICAL);
    front.set_tile(Location::new(0, 2), Some(flipped));
    map.add_layer(front);

    let mut sky_layer = Layer::image("Sky", map.size, sky.id.clone());
    sky_layer.id = 3;
    sky_layer.opacity = 0.75;
    map.add_tile_sheet(sky);
    map.add_layer(sky_layer);

    map
}
