//! Batch Driver - Discovery, Sequential Encoding, Manifest
//!
//! One logical writer: files are processed strictly in order, and the manifest
//! stream plus the success/failure tally are the only cross-file state.

use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use walkdir::WalkDir;

use crate::pipeline::{EncodedResource, ResourceEncoder};
use crate::MANIFEST_NAME;

/// Batch-level failures. All of these abort the run; per-file problems never
/// surface here.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("input path '{0}' does not exist; try your entry again")]
    NotFound(PathBuf),

    #[error("input path '{0}' does not point to a directory; try your entry again")]
    NotADirectory(PathBuf),

    #[error("input path '{0}' does not point to a file; try your entry again")]
    NotAFile(PathBuf),

    #[error("directory scan failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("manifest write failed: {0}")]
    Manifest(#[source] io::Error),

    #[error("purge failed: {0}")]
    Purge(#[source] io::Error),
}

/// Whether the input path names one file or a tree to scan recursively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    SingleFile,
    Directory,
}

/// Check that a path exists and matches the kind the mode requires.
pub fn check_path(path: &Path, mode: RunMode) -> Result<(), BatchError> {
    if !path.exists() {
        return Err(BatchError::NotFound(path.to_path_buf()));
    }
    match mode {
        RunMode::Directory if !path.is_dir() => {
            Err(BatchError::NotADirectory(path.to_path_buf()))
        }
        RunMode::SingleFile if !path.is_file() => Err(BatchError::NotAFile(path.to_path_buf())),
        _ => Ok(()),
    }
}

/// One human-readable manifest block per successfully encoded resource.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestEntry {
    pub source_path: String,
    pub resource_file: String,
    pub struct_name: String,
    pub include_path: String,
    pub size: u64,
    pub md5: String,
}

impl ManifestEntry {
    fn from_resource(res: &EncodedResource) -> Self {
        Self {
            source_path: display_relative(&res.source_path),
            resource_file: res
                .artifact_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            struct_name: res.short_alias(),
            include_path: display_relative(&res.artifact_path),
            size: res.size,
            md5: res.content_hash.clone(),
        }
    }

    fn write_block<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "--| {} |--", self.source_path)?;
        writeln!(w, "\tResource file: {}", self.resource_file)?;
        writeln!(w, "\tStruct name: {}", self.struct_name)?;
        writeln!(w, "\tInclusion line: `#include \"{}\"`", self.include_path)?;
        writeln!(w, "\tFilesize (bytes): {}", self.size)?;
        writeln!(w, "\tMD5: {}", self.md5)?;
        writeln!(w)
    }
}

/// Render a path relative to the invocation root where possible.
fn display_relative(path: &Path) -> String {
    env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(&cwd).ok())
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Aggregate counts and entries for one batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub manifest_path: PathBuf,
    pub entries: Vec<ManifestEntry>,
}

/// Drives the batch: discovers the file set, runs the encoder over each file
/// in order, and writes the manifest.
pub struct BatchRunner {
    encoder: ResourceEncoder,
    quiet: bool,
}

impl BatchRunner {
    pub fn new(encoder: ResourceEncoder) -> Self {
        Self {
            encoder,
            quiet: false,
        }
    }

    /// Suppress per-file progress output.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Enumerate candidate files. Directory mode walks the tree recursively,
    /// skipping directories, previously generated artifacts, and the
    /// manifest; paths are sorted so manifests stay stable across runs.
    pub fn discover(&self, root: &Path, mode: RunMode) -> Result<Vec<PathBuf>, BatchError> {
        match mode {
            RunMode::SingleFile => Ok(vec![root.to_path_buf()]),
            RunMode::Directory => {
                let artifact_suffix = format!(".{}", self.encoder.config().out_ext);
                let mut files = Vec::new();
                for entry in WalkDir::new(root) {
                    let entry = entry?;
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let name = entry.file_name().to_string_lossy();
                    if name == MANIFEST_NAME || name.ends_with(&artifact_suffix) {
                        continue;
                    }
                    files.push(entry.into_path());
                }
                files.sort();
                Ok(files)
            }
        }
    }

    /// Process every discovered file under `root`.
    ///
    /// Per-file failures are counted and skipped; the batch always runs to
    /// the end unless the manifest stream itself fails. The manifest lands in
    /// the scan root (directory mode) or next to the file (single-file mode)
    /// and is fully overwritten each run.
    pub fn run(&self, root: &Path, mode: RunMode) -> Result<BatchReport, BatchError> {
        check_path(root, mode)?;
        let files = self.discover(root, mode)?;

        let manifest_dir = match mode {
            RunMode::Directory => root.to_path_buf(),
            RunMode::SingleFile => root
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        let manifest_path = manifest_dir.join(MANIFEST_NAME);
        let mut manifest =
            BufWriter::new(File::create(&manifest_path).map_err(BatchError::Manifest)?);

        let total = files.len();
        let mut report = BatchReport {
            manifest_path: manifest_path.clone(),
            ..Default::default()
        };

        for (idx, file) in files.iter().enumerate() {
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if !self.quiet {
                println!("[{}/{}] Processing '{}'...", idx + 1, total, name);
            }
            report.attempted += 1;

            match self.encoder.encode(file) {
                Ok(res) => {
                    let entry = ManifestEntry::from_resource(&res);
                    entry
                        .write_block(&mut manifest)
                        .map_err(BatchError::Manifest)?;
                    if !self.quiet {
                        println!(
                            "Wrote '{}' with MD5 '{}'.\nThis file can now be referenced via including it as '{}' with struct variable name '{}'\n",
                            entry.resource_file, entry.md5, entry.resource_file, entry.struct_name
                        );
                    }
                    report.entries.push(entry);
                    report.succeeded += 1;
                }
                Err(err) => {
                    if !self.quiet {
                        println!("Skipping '{}': {}\n", name, err);
                    }
                    report.failed += 1;
                }
            }
        }

        manifest.flush().map_err(BatchError::Manifest)?;
        Ok(report)
    }

    /// Delete every generated artifact under `dir`, plus the root manifest if
    /// present. Returns the number of files removed.
    pub fn purge(&self, dir: &Path) -> Result<usize, BatchError> {
        check_path(dir, RunMode::Directory)?;
        let artifact_suffix = format!(".{}", self.encoder.config().out_ext);

        let mut removed = 0;
        for entry in WalkDir::new(dir) {
            let entry = entry?;
            if entry.file_type().is_file()
                && entry.file_name().to_string_lossy().ends_with(&artifact_suffix)
            {
                fs::remove_file(entry.path()).map_err(BatchError::Purge)?;
                removed += 1;
            }
        }

        let manifest_path = dir.join(MANIFEST_NAME);
        if manifest_path.exists() {
            fs::remove_file(&manifest_path).map_err(BatchError::Purge)?;
            removed += 1;
        }

        Ok(removed)
    }
}
