//! `layer`, `data`, `chunk` and `imagelayer` nodes

use super::{TmxImage, TmxProperty};
use crate::error::Result;
use crate::io::tile_data::{self, EncodingContext, TileDataPayload};

/// `tile` child of a `data` or `chunk` node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TmxTile {
    pub gid: u32,
}

/// `chunk` node of a `data` element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TmxChunk {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub payload: TileDataPayload,
}

impl TmxChunk {
    /// Decode the chunk body using the encoding of its parent `data` node
    pub fn decode(&self, context: EncodingContext) -> Result<Vec<u32>> {
        tile_data::decode(context, &self.payload)
    }
}

/// `data` node of a grid layer
///
/// The encoding context is fixed for the node: the flat payload and every
/// chunk are read with it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TmxData {
    pub context: EncodingContext,
    pub payload: TileDataPayload,
    pub chunks: Vec<TmxChunk>,
}

impl TmxData {
    /// Empty node in the given encoding
    pub fn new(context: EncodingContext) -> Self {
        TmxData {
            context,
            payload: TileDataPayload::empty(context),
            chunks: Vec::new(),
        }
    }

    /// Encode a flat GID list
    pub fn from_gids(context: EncodingContext, layer_width: u32, gids: &[u32]) -> Result<Self> {
        Ok(TmxData {
            context,
            payload: tile_data::encode(context, layer_width, gids)?,
            chunks: Vec::new(),
        })
    }

    pub fn is_chunked(&self) -> bool {
        !self.chunks.is_empty()
    }

    /// Decode the flat payload (chunks are ignored)
    pub fn decode(&self) -> Result<Vec<u32>> {
        tile_data::decode(self.context, &self.payload)
    }

    pub fn encoding_attribute(&self) -> Option<&'static str> {
        self.context.encoding_attribute()
    }

    pub fn compression_attribute(&self) -> Option<&'static str> {
        self.context.compression_attribute()
    }
}

/// `layer` node (tile grid)
#[derive(Debug, Clone, PartialEq)]
pub struct TmxLayer {
    pub id: u32,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub visible: bool,
    pub opacity: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub properties: Vec<TmxProperty>,
    pub data: Option<TmxData>,
}

impl TmxLayer {
    pub fn new(id: u32, name: impl Into<String>, width: u32, height: u32) -> Self {
        TmxLayer {
            id,
            name: name.into(),
            width,
            height,
            ..Default::default()
        }
    }

    /// `visible` attribute value
    pub fn visible_attribute(&self) -> u8 {
        u8::from(self.visible)
    }
}

impl Default for TmxLayer {
    fn default() -> Self {
        TmxLayer {
            id: 0,
            name: String::new(),
            width: 0,
            height: 0,
            visible: true,
            opacity: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            properties: Vec::new(),
            data: None,
        }
    }
}

/// `imagelayer` node
#[derive(Debug, Clone, PartialEq)]
pub struct TmxImageLayer {
    pub id: u32,
    pub name: String,
    pub visible: bool,
    pub opacity: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub properties: Vec<TmxProperty>,
    pub image: Option<TmxImage>,
}

impl TmxImageLayer {
    pub fn new(id: u32, name: impl Into<String>, image: TmxImage) -> Self {
        TmxImageLayer {
            id,
            name: name.into(),
            image: Some(image),
            ..Default::default()
        }
    }

    /// `visible` attribute value
    pub fn visible_attribute(&self) -> u8 {
        u8::from(self.visible)
    }
}

impl Default for TmxImageLayer {
    fn default() -> Self {
        TmxImageLayer {
            id: 0,
            name: String::new(),
            visible: true,
            opacity: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            properties: Vec::new(),
            image: None,
        }
    }
}
