//! Debian binary package (`.deb`) parsing.
//!
//! This module decodes the nested container format of a `.deb` and extracts
//! the package's control metadata.
//!
//! ## Architecture
//!
//! - [`ar`]: the outer `ar` container, read member by member
//! - [`decompress`]: codec selection by member suffix (gzip, zstd, xz)
//! - [`tar`]: linear scan of a decompressed tar stream for one entry
//! - [`control`]: `Key: value` parsing with continuation folding
//! - [`parser`]: drives the above and validates the result
//! - [`progress`]: the single hook through which progress is reported
//!
//! ## .deb Format Overview
//!
//! ```text
//! !<arch>\n
//! debian-binary          "2.0\n"
//! control.tar.{gz,xz,zst}  ./control, maintainer scripts, md5sums
//! data.tar.{gz,xz,zst}     installed files
//! ```
//!
//! ## Limitations
//!
//! - The data member is decompressed but not listed
//! - No signature verification
//! - Input must be fully loaded in memory

pub mod ar;
pub mod control;
pub mod decompress;
pub mod error;
pub mod parser;
pub mod progress;
pub mod tar;

pub use ar::{ArReader, ArchiveMember};
pub use control::{ControlMetadata, REQUIRED_FIELDS};
pub use decompress::Codec;
pub use error::DebError;
pub use parser::{DebParser, ParsedPackage, parse_deb};
pub use progress::{LogSink, ProgressSink, Reporter};
pub use self::tar::{TarEntry, find_entry};
