//! Codec dispatch for the compressed tar members.
//!
//! The codecs themselves come from `flate2`, `zstd`, and `xz2`. This module
//! maps a member name to a codec, normalizes codec failures into
//! [`DebError::DecompressionFailed`], and reports progress.
//!
//! Concatenated streams are accepted for every codec. Inside a tokio runtime
//! xz decoding runs on the blocking pool and is awaited as a single
//! completion, the only point where a parse can yield. Without a runtime it
//! is decoded inline like gzip and zstd.

use std::fmt;
use std::io::{self, Write};

use flate2::read::MultiGzDecoder;
use tokio::runtime::Handle;
use xz2::read::XzDecoder;

use super::error::{DebError, Result};
use super::progress::Reporter;

/// Compression codecs accepted for `control.tar*` and `data.tar*` members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Gzip,
    Zstd,
    Xz,
}

impl Codec {
    /// Pick the codec from a member name's extension.
    pub fn from_member_name(name: &str) -> Result<Self> {
        if name.ends_with(".gz") {
            Ok(Codec::Gzip)
        } else if name.ends_with(".zst") {
            Ok(Codec::Zstd)
        } else if name.ends_with(".xz") {
            Ok(Codec::Xz)
        } else {
            Err(DebError::UnsupportedCompression {
                member: name.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Codec::Gzip => "gzip",
            Codec::Zstd => "zstd",
            Codec::Xz => "xz",
        }
    }

    fn failed(self, member: &str, err: impl fmt::Display) -> DebError {
        DebError::DecompressionFailed {
            member: member.to_string(),
            codec: self.as_str(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully decompress member `member` with `codec`.
pub async fn decompress(
    data: &[u8],
    codec: Codec,
    member: &str,
    reporter: &Reporter<'_>,
) -> Result<Vec<u8>> {
    reporter.emit(&format!("Starting {codec} decompression..."));
    reporter.emit(&format!("Decompressing {codec} data..."));
    let (out, _) = decode(data, codec, member, Vec::new()).await?;
    reporter.emit("Decompression complete");
    Ok(out)
}

/// Decompress and discard, returning the decompressed length.
///
/// Used to check a member without holding its payload in memory.
pub async fn validate(
    data: &[u8],
    codec: Codec,
    member: &str,
    reporter: &Reporter<'_>,
) -> Result<u64> {
    reporter.emit(&format!("Validating {codec} stream of {member}..."));
    let (_, len) = decode(data, codec, member, io::sink()).await?;
    reporter.emit("Decompression complete");
    Ok(len)
}

async fn decode<W>(data: &[u8], codec: Codec, member: &str, mut out: W) -> Result<(W, u64)>
where
    W: Write + Send + 'static,
{
    if codec == Codec::Xz && Handle::try_current().is_ok() {
        let owned = data.to_vec();
        return tokio::task::spawn_blocking(move || {
            decode_into(&owned, codec, &mut out).map(|len| (out, len))
        })
        .await
        .map_err(|e| codec.failed(member, e))?
        .map_err(|e| codec.failed(member, e));
    }

    let len = decode_into(data, codec, &mut out).map_err(|e| codec.failed(member, e))?;
    Ok((out, len))
}

fn decode_into<W: Write>(data: &[u8], codec: Codec, out: &mut W) -> io::Result<u64> {
    match codec {
        Codec::Gzip => io::copy(&mut MultiGzDecoder::new(data), out),
        Codec::Zstd => io::copy(&mut zstd::stream::read::Decoder::new(data)?, out),
        Codec::Xz => io::copy(&mut XzDecoder::new_multi_decoder(data), out),
    }
}
