//! Codecs for the pieces of a TMX document that are not plain XML:
//! compressed payloads, GID flip bits, tile data payloads and typed
//! property values.

pub mod compression;
pub mod gid;
pub mod property_codec;
pub mod tile_data;

pub use compression::{Compression, Compressor, Decompressor};
pub use gid::{DecomposedGid, FlipFlags, Mirror, RenderHint, Rotation, EMPTY_GID, GID_MASK};
pub use tile_data::{EncodingContext, TextForm, TileDataPayload};
