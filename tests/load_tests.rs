//! Integration tests for loading TMX documents

mod common;

use common::builders::{layer, tileset, two_tileset_document, TILE};
use common::{cell, load, tile_at};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tmxtile::document::{
    TmxData, TmxImage, TmxImageLayer, TmxLayer, TmxObject, TmxObjectGroup, TmxProperty,
    TmxTileset,
};
use tmxtile::io::{Mirror, Rotation};
use tmxtile::map::LayerKind;
use tmxtile::{
    Color, Compression, EncodingContext, NotificationType, Size, TileDataPayload, TmxConfiguration,
    TmxError, TmxFormat, TmxMap,
};

#[test]
fn test_gid_ranges_resolve_to_sheets() {
    let map = load(&two_tileset_document(&[12, 16, 1, 10, 0, 0, 0, 11]));

    assert_eq!(cell(&map, "Back", 0, 0), Some(("props".into(), 1)));
    assert_eq!(cell(&map, "Back", 1, 0), Some(("props".into(), 5)));
    assert_eq!(cell(&map, "Back", 2, 0), Some(("terrain".into(), 0)));
    assert_eq!(cell(&map, "Back", 3, 0), Some(("terrain".into(), 9)));
    assert_eq!(cell(&map, "Back", 0, 1), None);
    // one past terrain's last tile is the first props tile
    assert_eq!(cell(&map, "Back", 3, 1), Some(("props".into(), 0)));
}

#[test]
fn test_gid_past_last_range_is_invalid() {
    let doc = two_tileset_document(&[17, 0, 0, 0, 0, 0, 0, 0]);
    let err = TmxFormat::new().load(&doc).unwrap_err();
    assert!(matches!(err, TmxError::InvalidGid(17)));
    assert_eq!(err.to_string(), "Invalid tile gid: 17");
}

#[test]
fn test_flipped_gid() {
    let map = load(&two_tileset_document(&[0x8000_0005, 0x6000_0002, 0, 0, 0, 0, 0, 0]));

    let tile = tile_at(&map, "Back", 0, 0).unwrap();
    assert_eq!((tile.sheet_id.as_str(), tile.index), ("terrain", 4));
    assert!(tile.properties.flag("H"));
    assert!(!tile.properties.contains("V"));
    assert!(!tile.properties.contains("D"));
    assert_eq!(tile.render_hint.mirror, Mirror::Horizontal);
    assert_eq!(tile.render_hint.rotation, Rotation::None);

    // vertical + diagonal
    let tile = tile_at(&map, "Back", 1, 0).unwrap();
    assert_eq!(tile.index, 1);
    assert!(tile.properties.flag("V") && tile.properties.flag("D"));
    assert_eq!(tile.render_hint.rotation, Rotation::Clockwise270);
    assert_eq!(tile.render_hint.mirror, Mirror::None);
}

#[test]
fn test_non_orthogonal_rejected() {
    let mut doc = two_tileset_document(&[0; 8]);
    doc.orientation = "isometric".to_string();
    let err = TmxFormat::new().load(&doc).unwrap_err();
    assert!(matches!(err, TmxError::OrientationUnsupported(ref o) if o == "isometric"));
}

#[test]
fn test_zlib_base64_layer() {
    let mut doc = TmxMap::new(4, 1, TILE, TILE);
    doc.tilesets.push(tileset("terrain", 1, 5, 2));
    let context = EncodingContext::base64(Compression::Zlib);
    let mut back = TmxLayer::new(1, "Back", 4, 1);
    back.data = Some(TmxData {
        context,
        payload: TileDataPayload::Text {
            raw: "\n   eJxjZGBgYAJiZiBmZWBoAAAA5ACM\n".to_string(),
            context,
        },
        chunks: Vec::new(),
    });
    doc.layers.push(back);

    let map = load(&doc);
    assert_eq!(cell(&map, "Back", 0, 0), Some(("terrain".into(), 0)));
    assert_eq!(cell(&map, "Back", 2, 0), Some(("terrain".into(), 2)));
    let flipped = tile_at(&map, "Back", 3, 0).unwrap();
    assert_eq!(flipped.index, 4);
    assert!(flipped.properties.flag("H"));
}

#[test]
fn test_zstd_layer_unsupported() {
    let mut doc = two_tileset_document(&[0; 8]);
    let context = EncodingContext::base64(Compression::Zstd);
    doc.layers[0].data = Some(TmxData {
        context,
        payload: TileDataPayload::Text {
            raw: "KLUv/SAIQQAAAQAAAAIAAAA=".to_string(),
            context,
        },
        chunks: Vec::new(),
    });
    let err = TmxFormat::new().load(&doc).unwrap_err();
    assert!(matches!(err, TmxError::UnsupportedOperation(_)));
}

#[test]
fn test_short_flat_payload_rejected() {
    let mut doc = two_tileset_document(&[0; 8]);
    doc.layers[0] = layer(1, "Back", Size::new(4, 2), EncodingContext::CSV, &[1, 2, 3]);
    let err = TmxFormat::new().load(&doc).unwrap_err();
    assert!(err.is_format_error());
}

#[test]
fn test_tile_data_overlay() {
    let mut doc = two_tileset_document(&[1, 2, 0, 4, 5, 6, 7, 8]);
    let mut group = TmxObjectGroup::new(2, "Back");
    let mut object = TmxObject::tile_data(1, 16.0, 0.0, 32.0, 32.0);
    object.properties = vec![
        TmxProperty::typed("Solid", "bool", "true"),
        TmxProperty::typed("V", "bool", "true"),
    ];
    group.objects.push(object);
    doc.object_groups.push(group);

    let map = load(&doc);
    for (x, y) in [(1, 0), (1, 1), (2, 1)] {
        let tile = tile_at(&map, "Back", x, y).unwrap();
        assert!(tile.properties.flag("Solid"), "cell ({x}, {y})");
        assert_eq!(tile.render_hint.mirror, Mirror::Vertical);
    }
    // empty cell stays empty, cells outside the rectangle are untouched
    assert!(tile_at(&map, "Back", 2, 0).is_none());
    assert!(!tile_at(&map, "Back", 0, 0).unwrap().properties.contains("Solid"));
    assert!(!tile_at(&map, "Back", 3, 0).unwrap().properties.contains("Solid"));
}

#[test]
fn test_overlay_last_writer_wins() {
    let mut doc = two_tileset_document(&[1, 0, 0, 0, 0, 0, 0, 0]);
    let mut group = TmxObjectGroup::new(2, "Back");
    for (id, cost) in [(1, "1"), (2, "2")] {
        let mut object = TmxObject::tile_data(id, 0.0, 0.0, 16.0, 16.0);
        object.properties = vec![TmxProperty::typed("cost", "int", cost)];
        group.objects.push(object);
    }
    doc.object_groups.push(group);

    let map = load(&doc);
    let tile = tile_at(&map, "Back", 0, 0).unwrap();
    assert_eq!(tile.properties.get("cost").and_then(|v| v.as_int()), Some(2));
}

#[test]
fn test_unmatched_object_group_warns() {
    let mut doc = two_tileset_document(&[0; 8]);
    let mut group = TmxObjectGroup::new(2, "Nowhere");
    group.objects.push(TmxObject::tile_data(1, 0.0, 0.0, 16.0, 16.0));
    doc.object_groups.push(group);

    let map = load(&doc);
    let warnings = map.notifications.of_type(NotificationType::Warning);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].source.as_deref(), Some("Nowhere"));
}

#[test]
fn test_image_layer_gets_synthetic_sheet() {
    let mut doc = two_tileset_document(&[0; 8]);
    let mut image = TmxImage::new("sky.png", 320, 200);
    image.set_transparent_attribute("FF00FF").unwrap();
    let mut sky = TmxImageLayer::new(5, "Sky", image);
    sky.offset_x = 4.0;
    sky.properties.push(TmxProperty::new("@Description", "backdrop"));
    doc.image_layers.push(sky);

    let map = load(&doc);
    let sheet = map.tile_sheet("zImageSheet_Sky").unwrap();
    assert_eq!(sheet.sheet_size, Size::ONE);
    assert_eq!(sheet.tile_size, Size::new(320, 200));
    assert_eq!(sheet.transparent_color, Some(Color::from_rgb(255, 0, 255)));
    assert!(sheet.gid_range.is_none());

    let layer = map.layers.last().unwrap();
    assert_eq!(layer.name, "Sky");
    assert_eq!(layer.id, 5);
    assert_eq!(layer.description, "backdrop");
    assert_eq!(layer.offset.x, 4);
    assert!(matches!(&layer.kind, LayerKind::Image { sheet_id } if sheet_id == "zImageSheet_Sky"));
}

#[test]
fn test_external_tileset_resolved() {
    let mut doc = TmxMap::new(2, 1, TILE, TILE);
    doc.tilesets.push(TmxTileset::external(1, "terrain.tsx"));
    doc.layers
        .push(layer(1, "Back", Size::new(2, 1), EncodingContext::CSV, &[1, 4]));

    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let format = TmxFormat::new().with_resolver(move |source: &str| -> tmxtile::Result<TmxTileset> {
        seen.fetch_add(1, Ordering::SeqCst);
        assert_eq!(source, "terrain.tsx");
        // the fragment's own firstgid is ignored
        Ok(tileset("terrain", 99, 2, 2))
    });

    let map = format.load(&doc).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cell(&map, "Back", 1, 0), Some(("terrain".into(), 3)));
}

#[test]
fn test_resolver_error_propagates() {
    let mut doc = TmxMap::new(1, 1, TILE, TILE);
    doc.tilesets.push(TmxTileset::external(1, "missing.tsx"));
    let format = TmxFormat::new()
        .with_resolver(|source: &str| -> tmxtile::Result<TmxTileset> {
            Err(TmxError::UnresolvedTileset(source.to_string()))
        });
    assert!(matches!(
        format.load(&doc),
        Err(TmxError::UnresolvedTileset(ref s)) if s == "missing.tsx"
    ));
}

#[test]
fn test_multiplier_scales_tile_size_and_offsets() {
    let mut doc = two_tileset_document(&[1, 0, 0, 0, 0, 0, 0, 0]);
    doc.layers[0].offset_x = 3.5;
    doc.layers[0].offset_y = -1.25;

    let format = TmxFormat::new().with_configuration(
        TmxConfiguration::default().with_tile_size_multiplier(Size::square(2)),
    );
    let map = format.load(&doc).unwrap();
    assert_eq!(map.tile_size, Size::square(32));
    assert_eq!(map.tile_sheet("terrain").unwrap().tile_size, Size::square(32));
    let back = map.layer("Back").unwrap();
    assert_eq!((back.offset.x, back.offset.y), (7, -3));
}

#[test]
fn test_tile_size_scale_overflow_is_format_error() {
    let mut doc = two_tileset_document(&[1, 0, 0, 0, 0, 0, 0, 0]);
    doc.tile_width = 70_000;
    doc.tile_height = 70_000;

    let format = TmxFormat::new().with_configuration(
        TmxConfiguration::default().with_tile_size_multiplier(Size::square(70_000)),
    );
    let err = format.load(&doc).unwrap_err();
    assert!(err.is_format_error());
}

#[test]
fn test_map_properties_and_description() {
    let mut doc = two_tileset_document(&[0; 8]);
    doc.background_color = Some(Color::from_rgb(1, 2, 3));
    doc.properties = vec![
        TmxProperty::new("@Description", "the cellar"),
        TmxProperty::typed("Lit", "bool", "false"),
        TmxProperty::typed("Ambient", "color", "#80FFEEDD"),
        TmxProperty::typed("Note", "file", "notes.txt"),
    ];

    let map = load(&doc);
    assert_eq!(map.description, "the cellar");
    assert_eq!(map.background_color, Some(Color::from_rgb(1, 2, 3)));
    assert_eq!(map.properties.len(), 3);
    assert_eq!(map.properties.get("Lit").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        map.properties.get("Ambient").and_then(|v| v.as_color()),
        Some(Color::from_rgba(0xFF, 0xEE, 0xDD, 0x80))
    );
    assert_eq!(map.properties.get("Note").and_then(|v| v.as_str()), Some("notes.txt"));
}

#[test]
fn test_bad_int_property_fails_load() {
    let mut doc = two_tileset_document(&[0; 8]);
    doc.properties = vec![TmxProperty::typed("Count", "int", "many")];
    assert!(TmxFormat::new().load(&doc).unwrap_err().is_format_error());
}

#[test]
fn test_load_all_keeps_order() {
    let good = two_tileset_document(&[1, 0, 0, 0, 0, 0, 0, 0]);
    let bad = two_tileset_document(&[99, 0, 0, 0, 0, 0, 0, 0]);
    let mut other = two_tileset_document(&[12, 0, 0, 0, 0, 0, 0, 0]);
    other.layers[0].name = "Other".to_string();

    let results = TmxFormat::new().load_all(&[good, bad, other]);
    assert_eq!(results.len(), 3);
    assert!(results[0].as_ref().is_ok_and(|m| m.layer("Back").is_some()));
    assert!(matches!(results[1], Err(TmxError::InvalidGid(99))));
    assert!(results[2].as_ref().is_ok_and(|m| m.layer("Other").is_some()));
}
