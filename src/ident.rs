//! Identifier Derivation - Filenames to Legal C Symbols
//!
//! Two names come out of every filename: the sanitized display name (kept in
//! output filenames and manifest text) and the legal identifier used for the
//! generated struct symbols. Pure string work, no I/O.

use crate::pipeline::EncodeError;

/// Characters retained by sanitization besides ASCII letters and digits.
/// Matches what both Windows and Linux allow in paths.
const ALLOWED_PUNCT: &str = "`~!@#$%^&()-_=+[]{};',. ";

/// The sanitized display name and the legal identifier derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedName {
    pub sanitized: String,
    pub identifier: String,
}

/// Derive a legal C identifier from a raw filename.
///
/// Sanitization strips every character outside the allow-list; the identifier
/// then maps every remaining non-alphanumeric, non-underscore character to an
/// underscore and prepends an underscore if the result would start with a
/// digit. Fails with `EmptyName` when sanitization strips the whole name.
pub fn derive(raw: &str) -> Result<DerivedName, EncodeError> {
    let sanitized: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || ALLOWED_PUNCT.contains(*c))
        .collect();

    if sanitized.is_empty() {
        return Err(EncodeError::EmptyName(raw.to_string()));
    }

    let mut identifier: String = sanitized
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    // C idents must not begin with a digit
    if identifier.chars().next().map_or(false, |c| c.is_ascii_digit()) {
        identifier.insert(0, '_');
    }

    Ok(DerivedName {
        sanitized,
        identifier,
    })
}
