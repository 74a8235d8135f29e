//! Template System - Placeholder Substitution Over Fixed Scaffolds
//!
//! The artifact scaffold and the runtime-support header ship with the tool;
//! both are configuration handed to the encoder, never process-wide state.

use std::collections::HashMap;

use chrono::Local;

use crate::{DEFAULT_OUT_EXT, MAX_FILE_SIZE};

/// The artifact scaffold instantiated once per resource.
pub const SCAFFOLD: &str = include_str!("../templates/scaffold.txt");

/// The runtime-support header embedded verbatim into every artifact, making
/// each generated file self-contained.
pub const NRES_HEADER: &str = include_str!("../templates/nano_res.h");

/// Replace every `%key%` occurrence in `template` with its mapped value.
///
/// Non-recursive: replacement values are never re-scanned for placeholders.
/// A placeholder with no mapping is left untouched; callers keep the map
/// complete for the fixed templates in use.
pub fn render(template: &str, replacements: &HashMap<&str, String>) -> String {
    let mut out = template.to_string();
    for (key, value) in replacements {
        out = out.replace(&format!("%{}%", key), value);
    }
    out
}

/// Per-batch encoder configuration: template texts, output extension, size
/// ceiling, and the generation timestamp stamped into every artifact.
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    pub scaffold: String,
    pub header: String,
    pub out_ext: String,
    pub max_size: u64,
    pub timestamp: String,
}

impl EncoderConfig {
    /// Built-in templates with a timestamp captured now.
    pub fn new() -> Self {
        Self::with_timestamp(Local::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string())
    }

    /// Built-in templates with a caller-supplied timestamp. Pinning the
    /// timestamp makes repeated runs byte-identical.
    pub fn with_timestamp(timestamp: String) -> Self {
        Self {
            scaffold: SCAFFOLD.to_string(),
            header: NRES_HEADER.to_string(),
            out_ext: DEFAULT_OUT_EXT.to_string(),
            max_size: MAX_FILE_SIZE,
            timestamp,
        }
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::new()
    }
}
