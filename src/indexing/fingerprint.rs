//! Content fingerprints for change detection.
//!
//! xxh3-128 over the full byte content, streamed in fixed-size chunks so very
//! large files are never held in memory. Not a security control.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use xxhash_rust::xxh3::{Xxh3, xxh3_128};

const CHUNK_SIZE: usize = 64 * 1024;

/// Fingerprint of an in-memory buffer.
pub fn fingerprint_bytes(content: &[u8]) -> String {
    format!("{:032x}", xxh3_128(content))
}

/// Fingerprint everything `reader` yields.
pub fn fingerprint_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Xxh3::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => hasher.update(&buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(format!("{:032x}", hasher.digest128()))
}

pub fn fingerprint_file(path: &Path) -> io::Result<String> {
    fingerprint_reader(File::open(path)?)
}
