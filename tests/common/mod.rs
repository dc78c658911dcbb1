//! Shared test utilities for tmxtile integration tests.
//!
//! Holds the converter setup, round-trip helper and cell lookups that all
//! test crates import via `mod common;`.

#![allow(dead_code)]

pub mod builders;

use tmxtile::io::Compression;
use tmxtile::{EncodingContext, Location, Map, Tile, TmxConfiguration, TmxFormat, TmxMap};

/// Every encoding the store side can produce
pub const ALL_ENCODINGS: [EncodingContext; 4] = [
    EncodingContext::XML,
    EncodingContext::CSV,
    EncodingContext::BASE64,
    EncodingContext::base64(Compression::Gzip),
];

/// Converter writing tile data with `encoding`
pub fn format_with(encoding: EncodingContext) -> TmxFormat {
    TmxFormat::new().with_configuration(TmxConfiguration::default().with_encoding(encoding))
}

/// Load a document, panicking with the error on failure
pub fn load(doc: &TmxMap) -> Map {
    match TmxFormat::new().load(doc) {
        Ok(map) => map,
        Err(e) => panic!("load failed: {e}"),
    }
}

/// Store then load again with the given encoding.
///
/// GID ranges are cleared on the result since they only exist on loaded maps.
pub fn roundtrip(map: &Map, encoding: EncodingContext) -> Map {
    let format = format_with(encoding);
    let doc = format.store(map).unwrap();
    let mut loaded = format.load(&doc).unwrap();
    forget_gid_ranges(&mut loaded);
    loaded
}

pub fn forget_gid_ranges(map: &mut Map) {
    for sheet in &mut map.tile_sheets {
        sheet.gid_range = None;
    }
}

/// Tile at a cell of a named layer
pub fn tile_at<'a>(map: &'a Map, layer: &str, x: i32, y: i32) -> Option<&'a Tile> {
    map.layer(layer)?.tile(Location::new(x, y))
}

/// `(sheet id, index)` of a cell, for compact assertions
pub fn cell(map: &Map, layer: &str, x: i32, y: i32) -> Option<(String, u32)> {
    tile_at(map, layer, x, y).map(|t| (t.sheet_id.clone(), t.index))
}
