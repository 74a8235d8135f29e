//! Resource Encoding Pipeline - One File In, One Artifact Out
//!
//! Order matters: the identifier is derived before any bytes are read, so a
//! hopeless filename fails fast without touching the disk.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::encoding::byte_literal;
use crate::hashing::{md5_hex, read_validated, short_id};
use crate::ident;
use crate::templates::{render, EncoderConfig};

/// Per-file failures, recovered at the batch boundary.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("cannot encode a file that is 0 bytes in size")]
    EmptyFile,

    #[error("cannot encode a file of {size} bytes, over the {limit} byte ceiling; consider loading and using the resource in a different way")]
    Oversize { size: u64, limit: u64 },

    #[error("filename '{0}' has no representable characters left after sanitization")]
    EmptyName(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The result of encoding one source file, as recorded in the manifest.
#[derive(Debug, Clone, Serialize)]
pub struct EncodedResource {
    pub source_path: PathBuf,
    pub artifact_path: PathBuf,
    pub sanitized_name: String,
    pub identifier: String,
    pub content_hash: String,
    pub short_id: String,
    pub size: u64,
}

impl EncodedResource {
    /// The hash-suffixed array/struct symbol, unique per content.
    pub fn struct_name(&self) -> String {
        format!("{}_{}", self.identifier, self.content_hash)
    }

    /// The shorter public alias, suffixed with the 6-character short ID.
    pub fn short_alias(&self) -> String {
        format!("{}_{}", self.identifier, self.short_id)
    }
}

/// Encodes exactly one file into one generated artifact.
pub struct ResourceEncoder {
    config: EncoderConfig,
}

impl ResourceEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode `source` and write the artifact next to it, named
    /// `<sanitized name>.<ext>`. An existing artifact at that path is
    /// overwritten without confirmation.
    pub fn encode(&self, source: &Path) -> Result<EncodedResource, EncodeError> {
        let raw_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let derived = ident::derive(&raw_name)?;

        let data = read_validated(source, self.config.max_size)?;
        let content_hash = md5_hex(&data);
        let short = short_id(&content_hash).to_string();
        let size = data.len() as u64;
        let bytes = byte_literal(&data);

        let mut replacements: HashMap<&str, String> = HashMap::new();
        replacements.insert("date", self.config.timestamp.clone());
        replacements.insert("filenameUscore", derived.identifier.clone());
        replacements.insert("fmd5", content_hash.clone());
        replacements.insert("nresHeader", self.config.header.clone());
        replacements.insert("filesize", size.to_string());
        replacements.insert("bytes", bytes);
        replacements.insert("fshortID", short.clone());
        replacements.insert("filename", derived.sanitized.clone());

        let encoded = render(&self.config.scaffold, &replacements);

        let artifact_path = source
            .with_file_name(format!("{}.{}", derived.sanitized, self.config.out_ext));
        fs::write(&artifact_path, encoded)?;

        Ok(EncodedResource {
            source_path: source.to_path_buf(),
            artifact_path,
            sanitized_name: derived.sanitized,
            identifier: derived.identifier,
            content_hash,
            short_id: short,
            size,
        })
    }
}
