//! Package-level orchestration.
//!
//! Walks the ar members of a `.deb`, decodes the control metadata from the
//! `control.tar*` member, checks that a `data.tar*` member is present and
//! decompresses cleanly (streamed, not kept), and assembles a
//! [`ParsedPackage`].

use super::ar::{ArReader, ArchiveMember};
use super::control::ControlMetadata;
use super::decompress::{Codec, decompress, validate};
use super::error::{DebError, Result};
use super::progress::{ProgressSink, Reporter};
use super::tar;

/// Name of the metadata entry inside the control tar.
pub const CONTROL_ENTRY: &str = "control";

/// Placeholder recorded in [`ParsedPackage::files`] for the data member.
pub const DATA_LISTING_PLACEHOLDER: &str = "(File listing not available - compressed data)";

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPackage {
    pub control: ControlMetadata,
    /// Diagnostic only; holds a placeholder per data member, not a listing.
    pub files: Vec<String>,
    pub found_control: bool,
    pub found_data: bool,
}

/// `.deb` parser with an optional progress sink.
///
/// Holds no state between calls; one parser may be shared across tasks.
///
/// ## Example
///
/// ```no_run
/// # async fn demo(bytes: Vec<u8>) -> Result<(), debscan::DebError> {
/// let parser = debscan::DebParser::new();
/// let package = parser.parse(&bytes).await?;
/// println!("{} {}", package.control.package(), package.control.version());
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct DebParser<'s> {
    sink: Option<&'s dyn ProgressSink>,
}

impl<'s> DebParser<'s> {
    pub fn new() -> Self {
        Self { sink: None }
    }

    pub fn with_progress(sink: &'s dyn ProgressSink) -> Self {
        Self { sink: Some(sink) }
    }

    /// Parse a complete `.deb` held in memory.
    ///
    /// # Errors
    ///
    /// Fails on any structural problem in the ar container or the control
    /// tar, when either the control or the data member is missing, and when
    /// a required control field is absent or empty. No partial result is
    /// returned.
    pub async fn parse(&self, buf: &[u8]) -> Result<ParsedPackage> {
        let reporter = Reporter::new(self.sink);

        reporter.emit("Checking file format...");
        let members = ArReader::new(buf)?;

        let mut control = ControlMetadata::default();
        let mut files = Vec::new();
        let mut found_control = false;
        let mut found_data = false;

        reporter.emit("Parsing package structure...");
        for member in members {
            let member = member?;
            reporter.emit(&format!("Processing archive member: {}", member.name));

            if member.name.starts_with("control.tar") {
                reporter.emit("Found control.tar, starting extraction...");
                found_control = true;
                let text = read_control(buf, &member, &reporter).await?;

                reporter.emit("Parsing control file content...");
                control.merge_text(&text);
                reporter.emit("Control file parsed successfully");
            } else if member.name.starts_with("data.tar") {
                reporter.emit("Found data.tar archive");
                found_data = true;
                let codec = Codec::from_member_name(&member.name)?;
                validate(member.data(buf), codec, &member.name, &reporter).await?;
                files.push(DATA_LISTING_PLACEHOLDER.to_string());
            } else {
                log::trace!("skipping ar member {:?}", member.name);
            }
        }

        if !found_control {
            return Err(DebError::MissingControlFile);
        }
        if !found_data {
            return Err(DebError::MissingDataFile);
        }
        control.validate_required()?;

        reporter.emit("Analysis complete");
        Ok(ParsedPackage {
            control,
            files,
            found_control,
            found_data,
        })
    }
}

/// Decompress a control member and return its `control` entry as text.
async fn read_control(
    buf: &[u8],
    member: &ArchiveMember,
    reporter: &Reporter<'_>,
) -> Result<String> {
    let codec = Codec::from_member_name(&member.name)?;
    let tarball = decompress(member.data(buf), codec, &member.name, reporter).await?;
    let entry = tar::scan_for(&tarball, CONTROL_ENTRY, reporter)?;
    let text = String::from_utf8_lossy(entry.data(&tarball)).into_owned();
    reporter.emit("Control file extracted successfully");
    Ok(text)
}

/// Parse `buf` without a progress sink.
pub async fn parse_deb(buf: &[u8]) -> Result<ParsedPackage> {
    DebParser::new().parse(buf).await
}
