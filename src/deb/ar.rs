//! Reader for the outer `ar` container of a `.deb`.
//!
//! ## Layout
//!
//! ```text
//! "!<arch>\n"                          8-byte global signature
//! [60-byte header][body][pad?] ...     one record per member
//! ```
//!
//! Header fields are space-padded ASCII at fixed offsets:
//!
//! | bytes  | field     | base    |
//! |--------|-----------|---------|
//! | 0..16  | name      | text    |
//! | 16..28 | timestamp | decimal |
//! | 28..34 | owner id  | decimal |
//! | 34..40 | group id  | decimal |
//! | 40..48 | mode      | octal   |
//! | 48..58 | size      | decimal |
//! | 58..60 | "`\n"     |         |
//!
//! A body of odd length is followed by one pad byte so that every header
//! starts on an even offset.

use std::ops::Range;

use super::error::{DebError, Result};

/// Global signature at offset 0.
pub const AR_MAGIC: &[u8; 8] = b"!<arch>\n";
/// Size of every member header.
pub const AR_HEADER_SIZE: usize = 60;

/// One member of the ar container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMember {
    pub name: String,
    pub timestamp: u64,
    pub owner_id: u32,
    pub group_id: u32,
    pub mode: u32,
    pub size: u64,
    /// Body range within the outer buffer, `[start, end)`.
    pub byte_range: Range<usize>,
}

impl ArchiveMember {
    /// Slice this member's body out of the buffer it was read from.
    pub fn data<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        &buf[self.byte_range.clone()]
    }
}

/// Lazy iterator over the members of an ar container.
///
/// Yields members in archive order. After the first error the iterator is
/// exhausted.
pub struct ArReader<'a> {
    buf: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> ArReader<'a> {
    /// Verify the global signature and position the cursor at the first header.
    pub fn new(buf: &'a [u8]) -> Result<Self> {
        if !buf.starts_with(AR_MAGIC) {
            return Err(DebError::InvalidMagic);
        }
        Ok(Self {
            buf,
            offset: AR_MAGIC.len(),
            failed: false,
        })
    }

    fn read_member(&mut self) -> Result<ArchiveMember> {
        let header_start = self.offset;
        let available = self.buf.len() - header_start;
        if available < AR_HEADER_SIZE {
            return Err(DebError::TruncatedHeader {
                offset: header_start,
                needed: AR_HEADER_SIZE,
                available,
            });
        }
        let header = &self.buf[header_start..header_start + AR_HEADER_SIZE];

        // GNU ar terminates names with '/'.
        let name = String::from_utf8_lossy(&header[0..16])
            .trim()
            .trim_end_matches('/')
            .to_string();
        let timestamp = parse_field(header, 16..28, 10, "timestamp", header_start)?;
        let owner_id = parse_field(header, 28..34, 10, "owner id", header_start)? as u32;
        let group_id = parse_field(header, 34..40, 10, "group id", header_start)? as u32;
        let mode = parse_field(header, 40..48, 8, "mode", header_start)? as u32;
        let size = parse_field(header, 48..58, 10, "size", header_start)?;

        let body_start = header_start + AR_HEADER_SIZE;
        let remaining = self.buf.len() - body_start;
        if size > remaining as u64 {
            return Err(DebError::InvalidMemberSize {
                name,
                offset: header_start,
                size,
                available: remaining,
            });
        }
        let body_end = body_start + size as usize;

        // Odd-length bodies carry one pad byte; a trailing pad may be absent.
        self.offset = (body_end + body_end % 2).min(self.buf.len());

        Ok(ArchiveMember {
            name,
            timestamp,
            owner_id,
            group_id,
            mode,
            size,
            byte_range: body_start..body_end,
        })
    }
}

impl Iterator for ArReader<'_> {
    type Item = Result<ArchiveMember>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.buf.len() {
            return None;
        }
        let member = self.read_member();
        if member.is_err() {
            self.failed = true;
        }
        Some(member)
    }
}

/// Decode a space-padded ASCII number. A blank field reads as zero.
fn parse_field(
    header: &[u8],
    range: Range<usize>,
    radix: u32,
    field: &'static str,
    header_offset: usize,
) -> Result<u64> {
    let offset = header_offset + range.start;
    let raw = &header[range];
    let malformed = || DebError::MalformedHeader {
        field,
        offset,
        value: String::from_utf8_lossy(raw).into_owned(),
    };
    let text = std::str::from_utf8(raw).map_err(|_| malformed())?.trim();
    if text.is_empty() {
        return Ok(0);
    }
    u64::from_str_radix(text, radix).map_err(|_| malformed())
}
