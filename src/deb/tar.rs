//! Linear scanner for decompressed tar streams.
//!
//! Only the two header fields needed to walk the archive are decoded:
//! `name` (bytes 0..100) and `size` (bytes 124..136). Every header and every
//! body is aligned to 512-byte blocks. An all-zero header block marks the
//! end of the archive.

use std::ops::Range;

use super::error::{DebError, Result};
use super::progress::Reporter;

/// Tar block size; headers occupy one block and bodies are padded to it.
pub const BLOCK_SIZE: usize = 512;

/// A located tar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TarEntry {
    pub name: String,
    pub size: u64,
    /// Body range within the decompressed buffer, `[start, end)`.
    pub byte_range: Range<usize>,
}

impl TarEntry {
    pub fn data<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        &buf[self.byte_range.clone()]
    }
}

/// Find `target` (or `./target`) in `buf` without materializing the archive.
pub fn find_entry(buf: &[u8], target: &str) -> Result<TarEntry> {
    scan_for(buf, target, &Reporter::silent())
}

pub(crate) fn scan_for(buf: &[u8], target: &str, reporter: &Reporter<'_>) -> Result<TarEntry> {
    let dotted = format!("./{target}");
    let mut offset = 0usize;
    let mut scanned = 0usize;

    reporter.emit(&format!("Scanning tar archive for {target}..."));
    // A partial trailing block is treated like the end-of-archive marker.
    while offset + BLOCK_SIZE <= buf.len() {
        let header = &buf[offset..offset + BLOCK_SIZE];
        if header.iter().all(|&b| b == 0) {
            reporter.emit("Reached end of tar archive");
            break;
        }

        let name = header_name(header);
        let size = header_size(header, offset)?;
        scanned += 1;
        reporter.emit(&format!("Examining entry {scanned}: {name}"));
        offset += BLOCK_SIZE;

        let available = buf.len() - offset;
        if name == target || name == dotted {
            if size > available as u64 {
                return Err(DebError::TruncatedEntry {
                    name,
                    offset,
                    size,
                    available,
                });
            }
            reporter.emit(&format!("Found {target}, extracting..."));
            let end = offset + size as usize;
            return Ok(TarEntry {
                name,
                size,
                byte_range: offset..end,
            });
        }

        // Bodies past the buffer end leave nothing more to scan.
        if size > available as u64 {
            break;
        }
        offset += padded(size as usize);
    }

    Err(DebError::EntryNotFound {
        name: target.to_string(),
        scanned,
    })
}

fn padded(size: usize) -> usize {
    size.div_ceil(BLOCK_SIZE) * BLOCK_SIZE
}

/// Name field with NUL padding and surrounding whitespace removed.
fn header_name(header: &[u8]) -> String {
    let field = &header[0..100];
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).trim().to_string()
}

/// Size field: octal ASCII, or GNU base-256 when the high bit of the first byte is set.
fn header_size(header: &[u8], header_offset: usize) -> Result<u64> {
    let field = &header[124..136];
    let malformed = || DebError::MalformedHeader {
        field: "tar size",
        offset: header_offset + 124,
        value: String::from_utf8_lossy(field).into_owned(),
    };

    if field[0] & 0x80 != 0 {
        // The remaining 11 bytes are a big-endian number; u64 holds the low 8.
        if field[1..4].iter().any(|&b| b != 0) {
            return Err(malformed());
        }
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&field[4..12]);
        return Ok(u64::from_be_bytes(bytes));
    }

    let text = std::str::from_utf8(field)
        .map_err(|_| malformed())?
        .trim_matches(|c: char| c == '\0' || c == ' ');
    if text.is_empty() {
        return Err(malformed());
    }
    u64::from_str_radix(text, 8).map_err(|_| malformed())
}
