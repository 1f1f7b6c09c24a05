//! Fixture builders for synthetic `.deb` packages.

#![allow(dead_code)]

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::{Builder, EntryType, Header};
use xz2::write::XzEncoder;

pub const DEMO_CONTROL: &str = "Package: demo
Version: 1.0.0
Architecture: amd64
Maintainer: Test <t@example.com>
Description: line one
 line two continuation
";

/// Build an uncompressed tar holding `files`, terminated by two zero blocks.
pub fn tarball(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut builder = Builder::new(&mut out);
        for (path, content) in files {
            let mut header = Header::new_gnu();
            header.set_mode(0o644);
            header.set_uid(0);
            header.set_gid(0);
            header.set_mtime(1700000000);
            header.set_size(content.len() as u64);
            header.set_entry_type(EntryType::Regular);
            builder.append_data(&mut header, path, *content).unwrap();
        }
        builder.finish().unwrap();
    }
    out
}

/// Compress with the codec implied by a member name's extension.
pub fn compress_for(member: &str, data: &[u8]) -> Vec<u8> {
    if member.ends_with(".gz") {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    } else if member.ends_with(".zst") {
        zstd::encode_all(data, 3).unwrap()
    } else if member.ends_with(".xz") {
        let mut enc = XzEncoder::new(Vec::new(), 6);
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    } else {
        data.to_vec()
    }
}

/// Assemble an ar container, padding odd-length bodies.
pub fn ar(members: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut out = b"!<arch>\n".to_vec();
    for (name, body) in members {
        let header = format!(
            "{:<16}{:<12}{:<6}{:<6}{:<8}{:<10}`\n",
            name,
            1700000000,
            0,
            0,
            "100644",
            body.len()
        );
        assert_eq!(header.len(), 60);
        out.extend_from_slice(header.as_bytes());
        out.extend_from_slice(body);
        if body.len() % 2 == 1 {
            out.push(b'\n');
        }
    }
    out
}

pub fn control_member<'a>(name: &'a str, control: &str) -> (&'a str, Vec<u8>) {
    let tar = tarball(&[
        ("./md5sums", b"d41d8cd98f00b204e9800998ecf8427e  usr/bin/demo\n"),
        ("./control", control.as_bytes()),
        ("./postinst", b"#!/bin/sh\nexit 0\n"),
    ]);
    (name, compress_for(name, &tar))
}

pub fn data_member(name: &str) -> (&str, Vec<u8>) {
    let tar = tarball(&[("./usr/bin/demo", b"\x7fELF fake binary")]);
    (name, compress_for(name, &tar))
}

/// A well-formed package using the given member names.
pub fn deb(control_name: &str, data_name: &str, control: &str) -> Vec<u8> {
    ar(&[
        ("debian-binary", b"2.0\n".to_vec()),
        control_member(control_name, control),
        data_member(data_name),
    ])
}
