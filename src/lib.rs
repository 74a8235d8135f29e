//! NanoRes Core - Embedded Resource Compiler
//!
//! Turns arbitrary binary files into self-contained C/C++ headers.
//!
//! # Pipeline Guarantees
//! 1. Identifiers Are Always Legal
//! 2. Content Hashes Name Symbols
//! 3. Bytes Round-Trip Exactly
//! 4. Deterministic Output
//! 5. Manifests Record Every Artifact
//! 6. One Bad File Never Kills A Batch

pub mod batch;
pub mod encoding;
pub mod hashing;
pub mod ident;
pub mod pipeline;
pub mod templates;

pub use batch::{BatchError, BatchReport, BatchRunner, ManifestEntry, RunMode};
pub use hashing::{md5_hex, short_id};
pub use ident::DerivedName;
pub use pipeline::{EncodeError, EncodedResource, ResourceEncoder};
pub use templates::{render, EncoderConfig};

pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extension given to generated artifacts when none is configured.
pub const DEFAULT_OUT_EXT: &str = "nres";

/// Name of the per-run manifest file.
pub const MANIFEST_NAME: &str = "nres_manifest.txt";

/// Size ceiling for candidate files (16 MB decimal; 1 MB = 1,000,000 bytes).
pub const MAX_FILE_SIZE: u64 = 16_000_000;
