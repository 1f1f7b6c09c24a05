//! Error types for `.deb` parsing.
//!
//! Every failure is fatal to the parse in progress. Variants carry the
//! member or entry name and byte offsets so a report can be diagnosed
//! without re-reading the package.

/// Result type alias for operations that may return a [`DebError`].
pub type Result<T> = std::result::Result<T, DebError>;

/// Errors produced while decoding a Debian binary package.
#[derive(Debug, thiserror::Error)]
pub enum DebError {
    /// The buffer does not start with the ar signature `!<arch>\n`.
    #[error("invalid .deb file format: missing ar archive magic number")]
    InvalidMagic,

    /// Fewer bytes remain than a fixed-width header requires.
    #[error("truncated header at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedHeader {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A numeric header field holds something other than digits in its base.
    #[error("malformed {field} field at offset {offset}: {value:?}")]
    MalformedHeader {
        field: &'static str,
        offset: usize,
        value: String,
    },

    /// An ar member declares a body that runs past the end of the buffer.
    #[error("invalid size for ar member {name:?} at offset {offset}: {size} bytes declared, {available} available")]
    InvalidMemberSize {
        name: String,
        offset: usize,
        size: u64,
        available: usize,
    },

    /// A control or data member has a suffix that maps to no known codec.
    #[error("unsupported compression format in {member}")]
    UnsupportedCompression { member: String },

    /// The codec reported an error while decompressing a member.
    #[error("failed to decompress {member} ({codec} data): {message}")]
    DecompressionFailed {
        member: String,
        codec: &'static str,
        message: String,
    },

    /// The tar scan reached the end-of-archive marker without finding the entry.
    #[error("{name} not found in archive (scanned {scanned} entries)")]
    EntryNotFound { name: String, scanned: usize },

    /// A located tar entry declares more bytes than the buffer holds.
    #[error("tar entry {name:?} at offset {offset} extends beyond buffer: {size} bytes declared, {available} available")]
    TruncatedEntry {
        name: String,
        offset: usize,
        size: u64,
        available: usize,
    },

    /// No `control.tar*` member was present.
    #[error("no control.tar member found in package")]
    MissingControlFile,

    /// No `data.tar*` member was present.
    #[error("no data.tar member found in package")]
    MissingDataFile,

    /// One or more mandatory control fields are absent or empty.
    #[error("missing required control fields: {}", .0.join(", "))]
    MissingRequiredMetadata(Vec<&'static str>),
}
