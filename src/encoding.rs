//! Byte Encoder - Raw Bytes to C Array Literals

use std::fmt::Write;

/// Render bytes as comma-joined `0xNN` literals, lowercase, in input order.
///
/// No leading or trailing comma; exactly one comma between adjacent pairs.
/// Output grows ~5x the input size, which the enforced size ceiling keeps
/// bounded.
pub fn byte_literal(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 5);
    for (i, byte) in data.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        // infallible for String targets
        let _ = write!(out, "0x{:02x}", byte);
    }
    out
}
