//! TMX document ⇄ [`Map`] conversion
//!
//! [`TmxFormat`] walks a [`TmxMap`] tree and builds a [`Map`] (load), or
//! builds a fresh tree from a [`Map`] (store). Conversions are pure and keep
//! no state between calls.

mod load;
mod store;

use crate::document::{TmxMap, TmxTileset, ORTHOGONAL};
use crate::error::Result;
use crate::io::tile_data::EncodingContext;
use crate::map::{LayerKind, Map};
use crate::notification::{NotificationCollection, NotificationType};
use crate::types::Size;
use rayon::prelude::*;
use std::fmt;
use std::sync::Arc;

/// Resolves the `source` of an external tileset into its parsed fragment.
///
/// Any `Fn(&str) -> Result<TmxTileset>` closure implements it.
pub trait TilesetResolver: Send + Sync {
    fn resolve(&self, source: &str) -> Result<TmxTileset>;
}

impl<F> TilesetResolver for F
where
    F: Fn(&str) -> Result<TmxTileset> + Send + Sync,
{
    fn resolve(&self, source: &str) -> Result<TmxTileset> {
        self(source)
    }
}

/// Configuration for [`TmxFormat`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TmxConfiguration {
    /// Tile size in document pixels.
    ///
    /// Default: `None`, which means the document's `tilewidth`/`tileheight`
    /// on load and the map tile size divided by the multiplier on store.
    pub fixed_tile_size: Option<Size>,
    /// Scale from document pixels to map pixels. Default: 1×1.
    pub tile_size_multiplier: Size,
    /// Encoding of the `data` nodes written on store. Default: XML children.
    pub encoding: EncodingContext,
}

impl Default for TmxConfiguration {
    fn default() -> Self {
        Self {
            fixed_tile_size: None,
            tile_size_multiplier: Size::ONE,
            encoding: EncodingContext::default(),
        }
    }
}

impl TmxConfiguration {
    pub fn with_fixed_tile_size(mut self, size: Size) -> Self {
        self.fixed_tile_size = Some(size);
        self
    }

    pub fn with_tile_size_multiplier(mut self, multiplier: Size) -> Self {
        self.tile_size_multiplier = multiplier;
        self
    }

    pub fn with_encoding(mut self, encoding: EncodingContext) -> Self {
        self.encoding = encoding;
        self
    }
}

/// Converter between TMX documents and [`Map`]
#[derive(Clone, Default)]
pub struct TmxFormat {
    config: TmxConfiguration,
    resolver: Option<Arc<dyn TilesetResolver>>,
}

impl fmt::Debug for TmxFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmxFormat")
            .field("config", &self.config)
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}

impl TmxFormat {
    pub const NAME: &'static str = "Tiled XML Format";
    pub const FILE_EXTENSION: &'static str = "tmx";

    /// Converter with the default configuration and no tileset resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the converter configuration.
    pub fn with_configuration(mut self, config: TmxConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Set the collaborator used for external tilesets.
    pub fn with_resolver(mut self, resolver: impl TilesetResolver + 'static) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    pub fn configuration(&self) -> &TmxConfiguration {
        &self.config
    }

    /// Load several independent documents in parallel.
    ///
    /// Results come back in input order, one per document.
    pub fn load_all(&self, documents: &[TmxMap]) -> Vec<Result<Map>> {
        tracing::debug!(documents = documents.len(), "loading tmx documents in parallel");
        documents.par_iter().map(|doc| self.load(doc)).collect()
    }

    /// Report what in `map` will not survive a store.
    pub fn determine_compatibility(&self, map: &Map) -> NotificationCollection {
        let mut notes = NotificationCollection::new();

        if map.orientation != ORTHOGONAL {
            notes.notify(
                NotificationType::NotSupported,
                format!("orientation {:?} cannot be stored", map.orientation),
            );
        }

        for layer in &map.layers {
            if layer.size != map.size {
                notes.notify_for(
                    NotificationType::Warning,
                    &layer.name,
                    format!("layer size {} differs from map size {}", layer.size, map.size),
                );
            }

            match &layer.kind {
                LayerKind::Tiles(grid) => {
                    for (location, tile) in grid.occupied() {
                        match map.tile_sheet(&tile.sheet_id) {
                            None => notes.notify_for(
                                NotificationType::Error,
                                &layer.name,
                                format!(
                                    "tile at {location} uses unknown sheet {:?}",
                                    tile.sheet_id
                                ),
                            ),
                            Some(sheet) if !map.has_gid_for(sheet, tile.index) => {
                                notes.notify_for(
                                    NotificationType::Error,
                                    &layer.name,
                                    format!(
                                        "tile at {location} uses index {} outside sheet {:?}",
                                        tile.index, sheet.id
                                    ),
                                )
                            }
                            Some(_) => {}
                        }
                    }
                }
                LayerKind::Image { sheet_id } => {
                    if map.tile_sheet(sheet_id).is_none() {
                        notes.notify_for(
                            NotificationType::Error,
                            &layer.name,
                            format!("image layer sheet {sheet_id:?} is missing"),
                        );
                    }
                }
            }
        }

        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Layer, Tile, TileSheet};
    use crate::types::Location;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_format_is_send_sync() {
        assert_send_sync::<TmxFormat>();
        assert_send_sync::<Map>();
    }

    #[test]
    fn test_configuration_builder() {
        let config = TmxConfiguration::default()
            .with_fixed_tile_size(Size::square(16))
            .with_tile_size_multiplier(Size::square(4))
            .with_encoding(EncodingContext::CSV);
        let format = TmxFormat::new().with_configuration(config);
        assert_eq!(format.configuration().fixed_tile_size, Some(Size::square(16)));
        assert_eq!(format.configuration().tile_size_multiplier, Size::square(4));
        assert_eq!(format.configuration().encoding, EncodingContext::CSV);
    }

    #[test]
    fn test_compatibility_clean_map() {
        let mut map = Map::new(Size::new(2, 2), Size::square(16));
        map.add_tile_sheet(TileSheet::new("ground", "g.png", Size::new(2, 1), Size::square(16)));
        let mut layer = Layer::tiles("Back", map.size);
        layer.set_tile(Location::ORIGIN, Some(Tile::new("ground", 1)));
        map.add_layer(layer);
        assert!(TmxFormat::new().determine_compatibility(&map).is_empty());

        // one past the end of the last sheet still has a gid
        map.layers[0].set_tile(Location::new(1, 0), Some(Tile::new("ground", 2)));
        assert!(TmxFormat::new().determine_compatibility(&map).is_empty());
    }

    #[test]
    fn test_compatibility_reports_problems() {
        let mut map = Map::new(Size::new(2, 2), Size::square(16));
        map.orientation = "isometric".to_string();
        map.add_tile_sheet(TileSheet::new("ground", "g.png", Size::new(2, 1), Size::square(16)));
        let mut layer = Layer::tiles("Back", Size::new(3, 3));
        layer.set_tile(Location::new(0, 0), Some(Tile::new("ground", 3)));
        layer.set_tile(Location::new(1, 0), Some(Tile::new("missing", 0)));
        map.add_layer(layer);
        map.add_layer(Layer::image("Sky", map.size, "zImageSheet_Sky"));

        let notes = TmxFormat::new().determine_compatibility(&map);
        assert_eq!(notes.of_type(NotificationType::NotSupported).len(), 1);
        assert_eq!(notes.of_type(NotificationType::Warning).len(), 1);
        assert_eq!(notes.of_type(NotificationType::Error).len(), 3);
    }
}
