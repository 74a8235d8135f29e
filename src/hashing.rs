//! Content Digest - MD5 over raw file bytes
//!
//! The digest doubles as the content address: it suffixes every generated
//! symbol, so two files with different bytes essentially never collide.

use std::fs;
use std::path::Path;

use crate::pipeline::EncodeError;

/// Compute the MD5 of raw bytes, return 32 lowercase hex characters.
pub fn md5_hex(data: &[u8]) -> String {
    format!("{:x}", md5::compute(data))
}

/// First 6 hex characters of a content hash, used for the short symbol alias.
pub fn short_id(hash: &str) -> &str {
    &hash[..6]
}

/// Read a candidate file in full, in binary mode, enforcing the size bounds.
///
/// Zero-byte and over-ceiling files are rejected from the file's metadata,
/// before any bytes are read.
pub fn read_validated(path: &Path, max_size: u64) -> Result<Vec<u8>, EncodeError> {
    let size = fs::metadata(path)?.len();
    if size == 0 {
        return Err(EncodeError::EmptyFile);
    }
    if size > max_size {
        return Err(EncodeError::Oversize {
            size,
            limit: max_size,
        });
    }
    Ok(fs::read(path)?)
}
