//! Pipeline Invariant Tests
//!
//! These tests verify the encoding guarantees: exact byte round-trips,
//! content-addressed symbols, legal identifiers, and batches that survive
//! bad files.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use nanores_core::{
    batch::{BatchRunner, RunMode},
    hashing::read_validated,
    pipeline::{EncodeError, ResourceEncoder},
    templates::EncoderConfig,
    MANIFEST_NAME, MAX_FILE_SIZE,
};

const SCENARIO_BYTES: &[u8] = &[0xde, 0xad, 0xbe, 0xef, 0x00, 0x01, 0x02];
const SCENARIO_MD5: &str = "64d84ce6ce39790187e401ee3d568052";
const FIXED_TIMESTAMP: &str = "2023-06-14 00:00:00.000000";

fn test_encoder() -> ResourceEncoder {
    ResourceEncoder::new(EncoderConfig::with_timestamp(FIXED_TIMESTAMP.to_string()))
}

fn test_runner() -> BatchRunner {
    BatchRunner::new(test_encoder()).quiet(true)
}

fn write_file(dir: &Path, name: &str, data: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, data).unwrap();
    path
}

#[test]
fn invariant_scenario_3d_model() {
    let dir = TempDir::new().unwrap();
    let source = write_file(dir.path(), "3d model.obj", SCENARIO_BYTES);

    let res = test_encoder().encode(&source).unwrap();

    assert_eq!(res.sanitized_name, "3d model.obj");
    assert_eq!(res.identifier, "_3d_model_obj");
    assert_eq!(res.content_hash, SCENARIO_MD5);
    assert_eq!(res.short_id, "64d84c");
    assert_eq!(res.size, 7);
    assert_eq!(res.struct_name(), format!("_3d_model_obj_{}", SCENARIO_MD5));
    assert_eq!(res.short_alias(), "_3d_model_obj_64d84c");
    assert_eq!(
        res.artifact_path.file_name().unwrap().to_str().unwrap(),
        "3d model.obj.nres"
    );

    let artifact = fs::read_to_string(&res.artifact_path).unwrap();
    assert!(artifact.contains(&format!(
        "static const uint8_t _3d_model_obj_{}_bytes[7] = {{0xde,0xad,0xbe,0xef,0x00,0x01,0x02}};",
        SCENARIO_MD5
    )));
    assert!(artifact.contains("const NRes _3d_model_obj_64d84c = {"));
    // runtime-support header is embedded verbatim
    assert!(artifact.contains("NANO_RES_H_20230614"));
    assert!(artifact.contains("NRStatus nresWrite(const NRes* obj, const char* path)"));
    // no placeholder survives rendering
    assert!(!artifact.contains('%'));
}

#[test]
fn invariant_byte_array_round_trips() {
    let dir = TempDir::new().unwrap();
    let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
    let source = write_file(dir.path(), "blob.bin", &data);

    let res = test_encoder().encode(&source).unwrap();
    let artifact = fs::read_to_string(&res.artifact_path).unwrap();

    // pull the literal back out of the generated array declaration
    let start = artifact.find("_bytes[1000] = {").unwrap() + "_bytes[1000] = {".len();
    let end = artifact[start..].find('}').unwrap() + start;
    let decoded: Vec<u8> = artifact[start..end]
        .split(',')
        .map(|tok| u8::from_str_radix(tok.trim_start_matches("0x"), 16).unwrap())
        .collect();

    assert_eq!(decoded, data);
}

#[test]
fn invariant_hash_depends_on_bytes_only() {
    let dir = TempDir::new().unwrap();
    let a = write_file(dir.path(), "first.dat", b"same content");
    let b = write_file(dir.path(), "second.dat", b"same content");

    let encoder = test_encoder();
    let res_a = encoder.encode(&a).unwrap();
    let res_b = encoder.encode(&b).unwrap();

    assert_eq!(res_a.content_hash, res_b.content_hash);
    assert_ne!(res_a.identifier, res_b.identifier);
    assert_ne!(res_a.struct_name(), res_b.struct_name());
}

#[test]
fn invariant_empty_name_writes_no_artifact() {
    let dir = TempDir::new().unwrap();
    let source = write_file(dir.path(), "???", b"payload");

    let err = test_encoder().encode(&source).unwrap_err();
    assert!(matches!(err, EncodeError::EmptyName(_)));

    let artifacts: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".nres"))
        .collect();
    assert!(artifacts.is_empty());
}

#[test]
fn invariant_size_boundaries() {
    let dir = TempDir::new().unwrap();

    let empty = write_file(dir.path(), "empty.bin", &[]);
    assert!(matches!(
        read_validated(&empty, MAX_FILE_SIZE).unwrap_err(),
        EncodeError::EmptyFile
    ));

    let at_limit = write_file(dir.path(), "limit.bin", &vec![0x42; 16_000_000]);
    assert_eq!(
        read_validated(&at_limit, MAX_FILE_SIZE).unwrap().len(),
        16_000_000
    );

    let over = write_file(dir.path(), "over.bin", &vec![0x42; 16_000_001]);
    assert!(matches!(
        read_validated(&over, MAX_FILE_SIZE).unwrap_err(),
        EncodeError::Oversize {
            size: 16_000_001,
            limit: MAX_FILE_SIZE
        }
    ));
}

#[test]
fn invariant_oversize_file_skipped_by_encoder() {
    let dir = TempDir::new().unwrap();
    let source = write_file(dir.path(), "big.bin", b"nine byte");

    let mut config = EncoderConfig::with_timestamp(FIXED_TIMESTAMP.to_string());
    config.max_size = 8;
    let err = ResourceEncoder::new(config).encode(&source).unwrap_err();
    assert!(matches!(err, EncodeError::Oversize { size: 9, limit: 8 }));
}

#[test]
fn invariant_batch_survives_bad_files() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "alpha.txt", b"alpha");
    write_file(dir.path(), "beta.txt", b"beta");
    write_file(dir.path(), "hollow.bin", &[]);

    let report = test_runner().run(dir.path(), RunMode::Directory).unwrap();

    assert_eq!(report.attempted, 3);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 1);

    assert!(dir.path().join("alpha.txt.nres").exists());
    assert!(dir.path().join("beta.txt.nres").exists());

    // failed file leaves no trace in the manifest
    let manifest = fs::read_to_string(dir.path().join(MANIFEST_NAME)).unwrap();
    assert!(manifest.contains("alpha.txt"));
    assert!(manifest.contains("beta.txt"));
    assert!(!manifest.contains("hollow.bin"));
}

#[test]
fn invariant_rerun_is_idempotent() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "one.txt", b"one");
    let sub = dir.path().join("nested");
    fs::create_dir(&sub).unwrap();
    write_file(&sub, "two.txt", b"two");

    let first = test_runner().run(dir.path(), RunMode::Directory).unwrap();
    let artifact_after_first = fs::read(dir.path().join("one.txt.nres")).unwrap();
    let manifest_after_first = fs::read_to_string(dir.path().join(MANIFEST_NAME)).unwrap();

    // second run must not pick up the artifacts or manifest from the first
    let second = test_runner().run(dir.path(), RunMode::Directory).unwrap();

    assert_eq!(first.attempted, 2);
    assert_eq!(second.attempted, 2);
    assert_eq!(second.succeeded, 2);
    assert_eq!(
        fs::read(dir.path().join("one.txt.nres")).unwrap(),
        artifact_after_first
    );
    assert_eq!(
        fs::read_to_string(dir.path().join(MANIFEST_NAME)).unwrap(),
        manifest_after_first
    );
    assert!(sub.join("two.txt.nres").exists());
}

#[test]
fn invariant_manifest_block_format() {
    let dir = TempDir::new().unwrap();
    let source = write_file(dir.path(), "3d model.obj", SCENARIO_BYTES);

    test_runner().run(&source, RunMode::SingleFile).unwrap();

    let manifest_path = dir.path().join(MANIFEST_NAME);
    let manifest = fs::read_to_string(&manifest_path).unwrap();

    let source_display = source.display().to_string();
    let artifact_display = dir.path().join("3d model.obj.nres").display().to_string();
    let expected = format!(
        "--| {} |--\n\
         \tResource file: 3d model.obj.nres\n\
         \tStruct name: _3d_model_obj_64d84c\n\
         \tInclusion line: `#include \"{}\"`\n\
         \tFilesize (bytes): 7\n\
         \tMD5: {}\n\n",
        source_display, artifact_display, SCENARIO_MD5
    );
    assert_eq!(manifest, expected);
}

#[test]
fn invariant_purge_counts_artifacts_and_manifest() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.txt.nres", b"stale");
    write_file(dir.path(), "b.txt.nres", b"stale");
    let sub = dir.path().join("deep");
    fs::create_dir(&sub).unwrap();
    write_file(&sub, "c.txt.nres", b"stale");
    write_file(dir.path(), MANIFEST_NAME, b"stale manifest");
    write_file(dir.path(), "keep.txt", b"survivor");

    let removed = test_runner().purge(dir.path()).unwrap();

    assert_eq!(removed, 4);
    assert!(!dir.path().join("a.txt.nres").exists());
    assert!(!dir.path().join("b.txt.nres").exists());
    assert!(!sub.join("c.txt.nres").exists());
    assert!(!dir.path().join(MANIFEST_NAME).exists());
    assert!(dir.path().join("keep.txt").exists());
}

#[test]
fn invariant_artifact_overwritten_without_confirmation() {
    let dir = TempDir::new().unwrap();
    let source = write_file(dir.path(), "res.dat", b"v2");
    write_file(dir.path(), "res.dat.nres", b"previous generation");

    let res = test_encoder().encode(&source).unwrap();
    let artifact = fs::read_to_string(&res.artifact_path).unwrap();
    assert!(!artifact.contains("previous generation"));
    assert!(artifact.contains(&res.content_hash));
}

#[test]
fn invariant_path_kind_checked_up_front() {
    let dir = TempDir::new().unwrap();
    let file = write_file(dir.path(), "x.txt", b"x");

    let runner = test_runner();
    assert!(runner.run(&file, RunMode::Directory).is_err());
    assert!(runner.run(dir.path(), RunMode::SingleFile).is_err());
    assert!(runner
        .run(&dir.path().join("missing"), RunMode::SingleFile)
        .is_err());
}
