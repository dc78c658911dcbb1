//! Layer tile data: GID sequences ⇄ `data`/`chunk` payloads.
//!
//! A payload is either a list of `<tile gid=".."/>` children or a text body.
//! Text bodies are CSV (optionally wrapped one map row per line) or base64
//! of the little-endian u32 GID array, optionally gzip/zlib compressed.
//!
//! The encoding is carried by an explicit [`EncodingContext`]; nothing here
//! keeps state between calls.

use super::compression::{self, Compression};
use crate::document::TmxTile;
use crate::error::{FormatError, Result, TmxError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use std::fmt;

/// Size of one GID in a binary payload
pub const GID_BYTES: usize = 4;

/// Textual form of a `data` node (`encoding` attribute)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextForm {
    /// `<tile>` child nodes, no `encoding` attribute
    #[default]
    XmlChildren,
    /// `encoding="csv"`
    Csv,
    /// `encoding="base64"`
    Base64,
}

impl TextForm {
    /// Resolve the `encoding` attribute. Unrecognised values are read as base64.
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => TextForm::XmlChildren,
            Some("csv") => TextForm::Csv,
            Some(_) => TextForm::Base64,
        }
    }

    /// The attribute spelling, `None` for XML children
    pub fn attribute(&self) -> Option<&'static str> {
        match self {
            TextForm::XmlChildren => None,
            TextForm::Csv => Some("csv"),
            TextForm::Base64 => Some("base64"),
        }
    }
}

/// Encoding of one `data` node and all of its chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EncodingContext {
    pub text_form: TextForm,
    pub compression: Compression,
}

impl EncodingContext {
    pub const XML: EncodingContext = EncodingContext::new(TextForm::XmlChildren, Compression::None);
    pub const CSV: EncodingContext = EncodingContext::new(TextForm::Csv, Compression::None);
    pub const BASE64: EncodingContext = EncodingContext::new(TextForm::Base64, Compression::None);

    pub const fn new(text_form: TextForm, compression: Compression) -> Self {
        EncodingContext {
            text_form,
            compression,
        }
    }

    /// Base64 with the given compression
    pub const fn base64(compression: Compression) -> Self {
        EncodingContext::new(TextForm::Base64, compression)
    }

    /// Build from the `encoding` and `compression` attributes of a `data` node
    pub fn from_attributes(encoding: Option<&str>, compression: Option<&str>) -> Result<Self> {
        Ok(EncodingContext::new(
            TextForm::from_attribute(encoding),
            Compression::from_attribute(compression)?,
        ))
    }

    /// `encoding` attribute to write
    pub fn encoding_attribute(&self) -> Option<&'static str> {
        self.text_form.attribute()
    }

    /// `compression` attribute to write
    pub fn compression_attribute(&self) -> Option<&'static str> {
        self.compression.attribute()
    }

    /// Reject combinations no payload can carry
    pub fn validate(&self) -> Result<()> {
        if self.compression == Compression::Zstd {
            return Err(TmxError::unsupported("zstd compressed tile data is not supported"));
        }
        if self.compression != Compression::None && self.text_form != TextForm::Base64 {
            return Err(TmxError::malformed(format!(
                "{} compression requires base64 encoding",
                self.compression
            )));
        }
        Ok(())
    }
}

impl fmt::Display for EncodingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text_form {
            TextForm::XmlChildren => f.write_str("xml"),
            TextForm::Csv => f.write_str("csv"),
            TextForm::Base64 if self.compression == Compression::None => f.write_str("base64"),
            TextForm::Base64 => write!(f, "base64+{}", self.compression),
        }
    }
}

/// Body of a `data` or `chunk` node
#[derive(Debug, Clone, PartialEq)]
pub enum TileDataPayload {
    /// `<tile gid=".."/>` children
    XmlChildren(Vec<TmxTile>),
    /// Text body together with the encoding it was written in
    Text { raw: String, context: EncodingContext },
}

impl TileDataPayload {
    /// Payload with no tiles in the given encoding
    pub fn empty(context: EncodingContext) -> Self {
        match context.text_form {
            TextForm::XmlChildren => TileDataPayload::XmlChildren(Vec::new()),
            _ => TileDataPayload::Text {
                raw: String::new(),
                context,
            },
        }
    }

    /// Encoding the payload was built with
    pub fn context(&self) -> EncodingContext {
        match self {
            TileDataPayload::XmlChildren(_) => EncodingContext::XML,
            TileDataPayload::Text { context, .. } => *context,
        }
    }

    /// Whether the payload carries no tiles at all
    pub fn is_empty(&self) -> bool {
        match self {
            TileDataPayload::XmlChildren(tiles) => tiles.is_empty(),
            TileDataPayload::Text { raw, .. } => raw.trim().is_empty(),
        }
    }
}

impl Default for TileDataPayload {
    fn default() -> Self {
        TileDataPayload::XmlChildren(Vec::new())
    }
}

/// Decode a payload that belongs to a `data` node encoded with `context`.
///
/// A payload written in a different encoding than its node is rejected.
pub fn decode(context: EncodingContext, payload: &TileDataPayload) -> Result<Vec<u32>> {
    context.validate()?;
    if payload.context() != context {
        return Err(TmxError::malformed(format!(
            "{} payload inside a {} data node",
            payload.context(),
            context
        )));
    }

    match payload {
        TileDataPayload::XmlChildren(tiles) => Ok(tiles.iter().map(|t| t.gid).collect()),
        TileDataPayload::Text { raw, context } => decode_text(*context, raw),
    }
}

/// Encode `gids` as a payload in the given encoding.
///
/// `layer_width` drives CSV row wrapping; pass 0 to keep the list flat.
pub fn encode(context: EncodingContext, layer_width: u32, gids: &[u32]) -> Result<TileDataPayload> {
    context.validate()?;
    match context.text_form {
        TextForm::XmlChildren => Ok(TileDataPayload::XmlChildren(
            gids.iter().map(|&gid| TmxTile { gid }).collect(),
        )),
        _ => Ok(TileDataPayload::Text {
            raw: encode_text(context, layer_width, gids)?,
            context,
        }),
    }
}

/// Decode a text body (CSV or base64).
pub fn decode_text(context: EncodingContext, raw: &str) -> Result<Vec<u32>> {
    context.validate()?;
    match context.text_form {
        TextForm::XmlChildren => Err(TmxError::unsupported(
            "xml tile children have no text body",
        )),
        TextForm::Csv => decode_csv(raw),
        TextForm::Base64 => decode_base64(raw, context.compression),
    }
}

/// Encode a text body (CSV or base64).
pub fn encode_text(context: EncodingContext, layer_width: u32, gids: &[u32]) -> Result<String> {
    context.validate()?;
    match context.text_form {
        TextForm::XmlChildren => Err(TmxError::unsupported(
            "xml tile children have no text body",
        )),
        TextForm::Csv => Ok(encode_csv(layer_width, gids)),
        TextForm::Base64 => encode_base64(context.compression, gids),
    }
}

/// Parse a comma separated GID list. Whitespace and line breaks around
/// values are ignored, as are empty entries left by a trailing comma.
pub fn decode_csv(raw: &str) -> Result<Vec<u32>> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<u32>()
                .map_err(|_| TmxError::from(FormatError::literal("gid", token)))
        })
        .collect()
}

/// Write a comma separated GID list with a line break after every
/// `layer_width`-th value.
pub fn encode_csv(layer_width: u32, gids: &[u32]) -> String {
    let width = layer_width as usize;
    let mut out = String::with_capacity(gids.len() * 4);
    for (i, gid) in gids.iter().enumerate() {
        if i > 0 {
            out.push(',');
            if width > 0 && i % width == 0 {
                out.push('\n');
            }
        }
        out.push_str(&gid.to_string());
    }
    if width > 0 && !gids.is_empty() && gids.len() % width == 0 {
        out.push('\n');
    }
    out
}

/// base64 → optional decompression → little-endian u32 array
pub fn decode_base64(raw: &str, compression: Compression) -> Result<Vec<u32>> {
    let compact: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Ok(Vec::new());
    }

    let packed = STANDARD.decode(compact.as_bytes()).map_err(FormatError::from)?;
    let bytes = compression::decompress(compression, &packed)?;
    if bytes.len() % GID_BYTES != 0 {
        return Err(TmxError::malformed(format!(
            "tile data of {} bytes is not a whole number of gids",
            bytes.len()
        )));
    }

    let mut gids = vec![0u32; bytes.len() / GID_BYTES];
    LittleEndian::read_u32_into(&bytes, &mut gids);
    Ok(gids)
}

/// Little-endian u32 array → optional compression → base64
pub fn encode_base64(compression: Compression, gids: &[u32]) -> Result<String> {
    let mut bytes = Vec::with_capacity(gids.len() * GID_BYTES);
    for &gid in gids {
        bytes.write_u32::<LittleEndian>(gid)?;
    }
    let packed = compression::compress(compression, &bytes)?;
    Ok(STANDARD.encode(packed))
}
