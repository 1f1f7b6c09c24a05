mod common;

use std::future::Future;
use std::pin::pin;
use std::sync::Mutex;
use std::task::{Context, Poll, Waker};

use anyhow::bail;
use common::*;
use debscan::deb::parser::DATA_LISTING_PLACEHOLDER;
use debscan::{DebError, DebParser, ProgressSink, parse_deb};
use similar_asserts::assert_eq;

#[tokio::test]
async fn test_demo_package_gzip() {
    let buf = deb("control.tar.gz", "data.tar.gz", DEMO_CONTROL);
    let package = parse_deb(&buf).await.unwrap();

    assert!(package.found_control);
    assert!(package.found_data);
    assert_eq!(package.control.package(), "demo");
    assert_eq!(package.control.version(), "1.0.0");
    assert_eq!(package.control.architecture(), "amd64");
    assert_eq!(package.control.maintainer(), "Test <t@example.com>");
    assert_eq!(
        package.control.description(),
        "line one\nline two continuation"
    );
    assert_eq!(package.files, vec![DATA_LISTING_PLACEHOLDER.to_string()]);
}

#[tokio::test]
async fn test_all_codec_combinations() {
    for control in ["control.tar.gz", "control.tar.zst", "control.tar.xz"] {
        for data in ["data.tar.gz", "data.tar.zst", "data.tar.xz"] {
            let buf = deb(control, data, DEMO_CONTROL);
            let package = parse_deb(&buf)
                .await
                .unwrap_or_else(|e| panic!("{control} + {data}: {e}"));
            assert_eq!(package.control.package(), "demo");
        }
    }
}

#[tokio::test]
async fn test_extra_fields_are_preserved() {
    let control = format!(
        "{DEMO_CONTROL}Depends: libc6 (>= 2.34), zlib1g\nInstalled-Size: 120\n"
    );
    let buf = deb("control.tar.xz", "data.tar.xz", &control);
    let package = parse_deb(&buf).await.unwrap();
    assert_eq!(
        package.control.get("depends"),
        Some("libc6 (>= 2.34), zlib1g")
    );
    assert_eq!(package.control.get("installed-size"), Some("120"));
    assert_eq!(package.control.len(), 7);
}

#[test]
fn test_xz_package_parses_without_runtime() {
    let buf = deb("control.tar.xz", "data.tar.xz", DEMO_CONTROL);
    let mut fut = pin!(parse_deb(&buf));
    match fut.as_mut().poll(&mut Context::from_waker(Waker::noop())) {
        Poll::Ready(package) => assert_eq!(package.unwrap().control.package(), "demo"),
        Poll::Pending => panic!("parse suspended with no runtime to resume it"),
    }
}

#[tokio::test]
async fn test_invalid_magic() {
    let err = parse_deb(b"<!DOCTYPE html>\n<html>").await.unwrap_err();
    assert!(matches!(err, DebError::InvalidMagic));

    let err = parse_deb(b"").await.unwrap_err();
    assert!(matches!(err, DebError::InvalidMagic));
}

#[tokio::test]
async fn test_unsupported_control_compression() {
    let buf = ar(&[
        ("debian-binary", b"2.0\n".to_vec()),
        ("control.tar.bz2", b"BZh91AY&SY".to_vec()),
        data_member("data.tar.gz"),
    ]);
    match parse_deb(&buf).await {
        Err(DebError::UnsupportedCompression { member }) => assert_eq!(member, "control.tar.bz2"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_data_member() {
    let buf = ar(&[
        ("debian-binary", b"2.0\n".to_vec()),
        control_member("control.tar.gz", DEMO_CONTROL),
    ]);
    assert!(matches!(
        parse_deb(&buf).await,
        Err(DebError::MissingDataFile)
    ));
}

#[tokio::test]
async fn test_missing_control_member() {
    let buf = ar(&[
        ("debian-binary", b"2.0\n".to_vec()),
        data_member("data.tar.gz"),
    ]);
    assert!(matches!(
        parse_deb(&buf).await,
        Err(DebError::MissingControlFile)
    ));
}

#[tokio::test]
async fn test_missing_required_metadata() {
    let buf = deb(
        "control.tar.gz",
        "data.tar.gz",
        "Package: demo\nVersion: 1.0.0\nArchitecture:\n",
    );
    match parse_deb(&buf).await {
        Err(DebError::MissingRequiredMetadata(missing)) => {
            assert_eq!(missing, vec!["architecture", "maintainer", "description"]);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_control_entry_absent() {
    let tar = tarball(&[("./md5sums", b"")]);
    let buf = ar(&[
        ("debian-binary", b"2.0\n".to_vec()),
        ("control.tar.gz", compress_for("control.tar.gz", &tar)),
        data_member("data.tar.gz"),
    ]);
    match parse_deb(&buf).await {
        Err(DebError::EntryNotFound { name, scanned }) => {
            assert_eq!(name, "control");
            assert_eq!(scanned, 1);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_corrupt_control_member() {
    let buf = ar(&[
        ("debian-binary", b"2.0\n".to_vec()),
        ("control.tar.gz", b"\x1f\x8b garbage".to_vec()),
        data_member("data.tar.gz"),
    ]);
    match parse_deb(&buf).await {
        Err(DebError::DecompressionFailed { member, codec, .. }) => {
            assert_eq!(member, "control.tar.gz");
            assert_eq!(codec, "gzip");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_corrupt_data_member() {
    let buf = ar(&[
        ("debian-binary", b"2.0\n".to_vec()),
        control_member("control.tar.gz", DEMO_CONTROL),
        ("data.tar.xz", b"not xz".to_vec()),
    ]);
    match parse_deb(&buf).await {
        Err(err @ DebError::DecompressionFailed { .. }) => {
            assert!(err.to_string().contains("data.tar.xz"), "{err}");
            let DebError::DecompressionFailed { member, codec, .. } = err else {
                unreachable!()
            };
            assert_eq!(member, "data.tar.xz");
            assert_eq!(codec, "xz");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_odd_length_member_is_padded() {
    // "_gpgorigin" bodies are arbitrary; an odd length forces a pad byte.
    let odd = b"sig".to_vec();
    let buf = ar(&[
        ("debian-binary", b"2.0\n".to_vec()),
        ("_gpgorigin", odd),
        control_member("control.tar.gz", DEMO_CONTROL),
        data_member("data.tar.gz"),
    ]);
    let package = parse_deb(&buf).await.unwrap();
    assert_eq!(package.control.package(), "demo");
}

#[tokio::test]
async fn test_truncated_member() {
    let mut buf = deb("control.tar.gz", "data.tar.gz", DEMO_CONTROL);
    buf.truncate(buf.len() - 10);
    match parse_deb(&buf).await {
        Err(DebError::InvalidMemberSize { name, .. }) => assert_eq!(name, "data.tar.gz"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_progress_milestones() {
    let seen = Mutex::new(Vec::<String>::new());
    let sink = |s: &str| seen.lock().unwrap().push(s.to_string());
    let buf = deb("control.tar.zst", "data.tar.gz", DEMO_CONTROL);

    DebParser::with_progress(&sink).parse(&buf).await.unwrap();

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.first().map(String::as_str), Some("Checking file format..."));
    assert_eq!(seen.last().map(String::as_str), Some("Analysis complete"));
    for expected in [
        "Processing archive member: control.tar.zst",
        "Starting zstd decompression...",
        "Decompression complete",
        "Control file parsed successfully",
        "Found data.tar archive",
    ] {
        assert!(seen.iter().any(|s| s == expected), "missing {expected:?}");
    }
    assert!(seen.iter().any(|s| s.starts_with("Examining entry")));
}

struct FailingSink;

impl ProgressSink for FailingSink {
    fn report(&self, _status: &str) -> anyhow::Result<()> {
        bail!("listener went away")
    }
}

#[tokio::test]
async fn test_failing_sink_does_not_abort() {
    let buf = deb("control.tar.gz", "data.tar.gz", DEMO_CONTROL);
    let package = DebParser::with_progress(&FailingSink)
        .parse(&buf)
        .await
        .unwrap();
    assert_eq!(package.control.package(), "demo");
}

#[tokio::test]
async fn test_panicking_sink_does_not_abort() {
    let buf = deb("control.tar.gz", "data.tar.gz", DEMO_CONTROL);
    let sink = |s: &str| {
        if s.starts_with("Examining") {
            panic!("progress listener bug");
        }
    };
    let package = DebParser::with_progress(&sink).parse(&buf).await.unwrap();
    assert_eq!(package.control.package(), "demo");
}

#[tokio::test]
async fn test_multiple_control_members_are_merged() {
    let first = "Package: demo\nVersion: 1.0.0\nSection: utils\nPriority: optional\n";
    let second = "Version: 1.0.1\nSection:\nArchitecture: amd64\n\
                  Maintainer: Test <t@example.com>\nDescription: merged\n";
    let buf = ar(&[
        ("debian-binary", b"2.0\n".to_vec()),
        control_member("control.tar.gz", first),
        control_member("control.tar.xz", second),
        data_member("data.tar.zst"),
    ]);
    let package = parse_deb(&buf).await.unwrap();
    let control = &package.control;
    assert_eq!(control.package(), "demo");
    // A later non-empty value replaces the earlier one; an empty one does not.
    assert_eq!(control.version(), "1.0.1");
    assert_eq!(control.get("section"), Some("utils"));
    assert_eq!(control.get("priority"), Some("optional"));
    assert_eq!(control.architecture(), "amd64");
    assert_eq!(control.description(), "merged");
    assert_eq!(control.len(), 7);
}

#[tokio::test]
async fn test_concurrent_parses_are_independent() {
    let a = deb("control.tar.gz", "data.tar.gz", DEMO_CONTROL);
    let other = DEMO_CONTROL.replace("Package: demo", "Package: other");
    let b = deb("control.tar.xz", "data.tar.xz", &other);

    let parser = DebParser::new();
    let (pa, pb) = tokio::join!(parser.parse(&a), parser.parse(&b));
    assert_eq!(pa.unwrap().control.package(), "demo");
    assert_eq!(pb.unwrap().control.package(), "other");
}
