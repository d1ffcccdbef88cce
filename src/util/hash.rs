//! Hash verification utilities
//!
//! SHA256 hash verification for downloaded files.

use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// Calculate SHA256 hash of a file as lowercase hex
pub fn sha256_file(path: &Path) -> std::io::Result<String> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];

    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Verify file hash matches expected
pub fn verify_sha256(path: &Path, expected: &str) -> std::io::Result<bool> {
    let actual = sha256_file(path)?;
    Ok(actual.eq_ignore_ascii_case(expected.trim()))
}
