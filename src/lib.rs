//! # debscan
//!
//! A Rust reader for Debian binary packages (`.deb`).
//!
//! This library decodes the nested container format of a `.deb` (an `ar`
//! archive wrapping compressed tar members) and extracts the package's
//! control metadata. Parsing is a pure function of an in-memory buffer;
//! the [`io`] module supplies that buffer from a local file or an HTTP URL.
//!
//! ## Features
//!
//! - Strict `ar` container decoding with byte-offset error reporting
//! - gzip, zstd, and xz compressed control and data members
//! - Single-pass tar scan for the `control` entry
//! - Control-file parsing with continuation-line folding
//! - Optional progress narration through a [`ProgressSink`]
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use debscan::{DebParser, LocalFileSource, Source};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let buf = LocalFileSource::new(Path::new("hello_2.10-3_amd64.deb")).fetch().await?;
//!
//!     let package = DebParser::new().parse(&buf).await?;
//!     println!("{} {}", package.control.package(), package.control.version());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod deb;
pub mod io;

pub use cli::Cli;
pub use deb::{
    ArReader, ArchiveMember, Codec, ControlMetadata, DebError, DebParser, LogSink, ParsedPackage,
    ProgressSink, TarEntry, parse_deb,
};
pub use io::{HttpSource, LocalFileSource, Source};
