//! Main entry point for the debscan CLI application.
//!
//! Loads a `.deb` from the local filesystem or an HTTP URL and prints its
//! control metadata or its ar member table.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::Path;

use debscan::{ArReader, Cli, DebParser, HttpSource, LocalFileSource, LogSink, ParsedPackage, Source};

/// Application entry point.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp(None)
        .init();

    let buf = if cli.is_http_url() {
        let source = HttpSource::new(cli.file.clone())?;
        let buf = load(&source).await?;
        if !cli.is_quiet() {
            eprintln!(
                "Total bytes transferred from {}: {}",
                source.describe(),
                format_size(source.transferred_bytes())
            );
        }
        buf
    } else {
        load(&LocalFileSource::new(Path::new(&cli.file))).await?
    };

    if cli.list {
        return list_members(&buf);
    }

    let parser = if cli.verbose {
        DebParser::with_progress(&LogSink)
    } else {
        DebParser::new()
    };
    let package = parser.parse(&buf).await?;
    print_package(&package, &cli)
}

/// Load the whole package from `source`.
async fn load(source: &dyn Source) -> Result<Vec<u8>> {
    let buf = source
        .fetch()
        .await
        .with_context(|| format!("Cannot load package from {}", source.describe()))?;
    log::debug!("loaded {} bytes from {}", buf.len(), source.describe());
    Ok(buf)
}

/// Print the ar member table: mode, size, timestamp, name.
fn list_members(buf: &[u8]) -> Result<()> {
    println!("{:>8}  {:>10}  {:>12}  Name", "Mode", "Size", "Timestamp");
    println!("{}", "-".repeat(50));
    for member in ArReader::new(buf)? {
        let member = member?;
        println!(
            "{:>8o}  {:>10}  {:>12}  {}",
            member.mode, member.size, member.timestamp, member.name
        );
    }
    Ok(())
}

/// Print control fields in control-file form.
///
/// With `-f`, only the requested fields are printed, in the order given; an
/// unknown field is an error.
fn print_package(package: &ParsedPackage, cli: &Cli) -> Result<()> {
    if cli.fields.is_empty() {
        for (key, value) in package.control.iter() {
            println!("{}", format_field(key, value));
        }
        if !cli.is_quiet() {
            for file in &package.files {
                eprintln!("{file}");
            }
        }
        return Ok(());
    }

    for field in &cli.fields {
        match package.control.get(field) {
            Some(value) if cli.fields.len() == 1 => println!("{value}"),
            Some(value) => println!("{}", format_field(field, value)),
            None => bail!("Field not present in control file: {field}"),
        }
    }
    Ok(())
}

/// Re-fold a multi-line value with leading-space continuation lines.
fn format_field(key: &str, value: &str) -> String {
    let mut lines = value.split('\n');
    let mut out = format!("{}: {}", key, lines.next().unwrap_or_default());
    for line in lines {
        out.push_str("\n ");
        out.push_str(line);
    }
    out
}

/// Format a byte size into a human-readable string.
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
