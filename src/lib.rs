//! # tmxtile
//!
//! A pure Rust library for converting Tiled TMX map documents to and from a
//! normalized, grid-based tile map.
//!
//! ## Features
//!
//! - Tile data in XML, CSV and base64 form, optionally gzip or zlib compressed
//! - GID flip flags with rotation/mirror render hints
//! - Typed custom properties that survive a load/store round trip
//! - Animated tiles, image layers and per-cell `TileData` property overlays
//! - External tilesets through a pluggable resolver
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tmxtile::{EncodingContext, TmxConfiguration, TmxFormat};
//!
//! // `doc` comes from your XML parser
//! let format = TmxFormat::new();
//! let map = format.load(&doc)?;
//!
//! for layer in &map.layers {
//!     println!("Layer: {}", layer.name);
//! }
//!
//! // Write back with CSV tile data
//! let format = format.with_configuration(
//!     TmxConfiguration::default().with_encoding(EncodingContext::CSV),
//! );
//! let doc = format.store(&map)?;
//! # Ok::<(), tmxtile::TmxError>(())
//! ```
//!
//! ## Architecture
//!
//! - `io` - payload codecs: compression, GIDs, tile data, property values
//! - `document` - the TMX node tree
//! - `map` - the normalized map model
//! - `convert` - `TmxFormat`, the converter between the two

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod convert;
pub mod document;
pub mod error;
pub mod io;
pub mod map;
pub mod notification;
pub mod types;

// Re-export commonly used types
pub use error::{FormatError, Result, TmxError};
pub use types::{Color, Location, Properties, PropertyType, PropertyValue, Size};

// Re-export codec types
pub use io::{Compression, EncodingContext, FlipFlags, RenderHint, TextForm, TileDataPayload};

// Re-export document and map
pub use document::TmxMap;
pub use map::{Layer, Map, Tile, TileSheet};

// Re-export the converter
pub use convert::{TilesetResolver, TmxConfiguration, TmxFormat};

pub use notification::{Notification, NotificationCollection, NotificationType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
