//! Compression of tile-data payload bytes.
//!
//! TMX documents use two compression families on base64 payloads:
//! - **gzip**: supported in both directions
//! - **zlib**: decode only; the 2-byte header and the 4-byte Adler-32
//!   trailer are stripped and the remaining raw deflate stream inflated
//!
//! `zstd` is recognised so that it can be refused explicitly instead of
//! being mistaken for another algorithm.

use crate::error::{FormatError, Result, TmxError};
use flate2::read::{DeflateDecoder, GzDecoder};
use flate2::write::GzEncoder;
use std::fmt;
use std::io::{Read, Write};

/// Length of the zlib stream header (CMF + FLG)
pub const ZLIB_HEADER_LEN: usize = 2;
/// Length of the trailing Adler-32 checksum of a zlib stream
pub const ZLIB_TRAILER_LEN: usize = 4;

/// Trait for compressing data.
pub trait Compressor {
    /// Compress the whole source buffer.
    fn compress(&self, source: &[u8]) -> Result<Vec<u8>>;
}

/// Trait for decompressing data.
pub trait Decompressor {
    /// Decompress the whole source buffer.
    fn decompress(&self, source: &[u8]) -> Result<Vec<u8>>;
}

/// Compression applied to a base64 tile payload (`compression` attribute)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Compression {
    #[default]
    None,
    Gzip,
    Zlib,
    Zstd,
}

impl Compression {
    /// Resolve the `compression` attribute of a `data` node
    pub fn from_attribute(value: Option<&str>) -> Result<Self> {
        match value.map(str::trim) {
            None | Some("") => Ok(Compression::None),
            Some("gzip") => Ok(Compression::Gzip),
            Some("zlib") => Ok(Compression::Zlib),
            Some("zstd") => Ok(Compression::Zstd),
            Some(other) => Err(FormatError::literal("compression", other).into()),
        }
    }

    /// The attribute spelling, `None` for uncompressed payloads
    pub fn attribute(&self) -> Option<&'static str> {
        match self {
            Compression::None => None,
            Compression::Gzip => Some("gzip"),
            Compression::Zlib => Some("zlib"),
            Compression::Zstd => Some("zstd"),
        }
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        self.attribute().unwrap_or("none")
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Compressor for Compression {
    fn compress(&self, source: &[u8]) -> Result<Vec<u8>> {
        compress(*self, source)
    }
}

impl Decompressor for Compression {
    fn decompress(&self, source: &[u8]) -> Result<Vec<u8>> {
        decompress(*self, source)
    }
}

/// Decompress `data` according to `kind`.
pub fn decompress(kind: Compression, data: &[u8]) -> Result<Vec<u8>> {
    match kind {
        Compression::None => Ok(data.to_vec()),
        Compression::Gzip => inflate(GzDecoder::new(data), kind),
        Compression::Zlib => {
            if data.len() < ZLIB_HEADER_LEN + ZLIB_TRAILER_LEN {
                return Err(TmxError::malformed(format!(
                    "zlib stream of {} bytes is shorter than its framing",
                    data.len()
                )));
            }
            let deflate = &data[ZLIB_HEADER_LEN..data.len() - ZLIB_TRAILER_LEN];
            inflate(DeflateDecoder::new(deflate), kind)
        }
        Compression::Zstd => Err(TmxError::unsupported(
            "zstd decompression is not supported",
        )),
    }
}

/// Compress `data` according to `kind`.
pub fn compress(kind: Compression, data: &[u8]) -> Result<Vec<u8>> {
    match kind {
        Compression::None => Ok(data.to_vec()),
        Compression::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(data)?;
            Ok(encoder.finish()?)
        }
        Compression::Zlib => Err(TmxError::unsupported("zlib compression is not supported")),
        Compression::Zstd => Err(TmxError::unsupported("zstd compression is not supported")),
    }
}

fn inflate<R: Read>(mut decoder: R, kind: Compression) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|source| FormatError::Inflate {
            compression: kind.name(),
            source,
        })?;
    Ok(out)
}
