use gfharvest_core::{
    CrawlConfig, CrawlWarning, DirEntry, FileKind, FileRecord, HarvestState, StatRecord,
    StorageError, WarningKind, join_url,
};

fn sample_harvest() -> HarvestState {
    let mut harvest = HarvestState::new();
    harvest.record_listing("/a");
    harvest.record_file(
        FileRecord::new("/a/f1", StatRecord::file(0o644, 100).with_mtime(1_700_000_000))
            .with_checksum("ADLER32", "12ab34cd"),
    );
    harvest.record_file(FileRecord::new("/a/d1", StatRecord::directory(0o755)));
    harvest.record_listing("/a/d1");
    harvest.record_file(FileRecord::new("/a/d1/f2", StatRecord::file(0o600, 50)));
    harvest.record_warning(CrawlWarning::new(
        "/a/d1/f2",
        "checksum timed out",
        WarningKind::ChecksumError,
    ));
    harvest
}

#[test]
fn test_harvest_serialization_roundtrip() {
    let harvest = sample_harvest();

    let json = serde_json::to_string(&harvest).unwrap();
    let restored: HarvestState = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, harvest);
    assert_eq!(restored.size_so_far(), 150);
    assert_eq!(restored.files().len(), 3);
    assert_eq!(restored.errors().len(), 2);
    assert!(restored.is_consistent());
}

#[test]
fn test_file_record_json_shape() {
    let record = FileRecord::new("/a/f2", StatRecord::file(0o644, 50));
    let value = serde_json::to_value(&record).unwrap();

    assert_eq!(value["url"], "/a/f2");
    assert_eq!(value["fstat"]["size"], 50);
    assert_eq!(value["fstat"]["mode"], 0o100_644);
    assert!(value.get("checksums").is_none());

    let with_sum = record.with_checksum("ADLER32", "deadbeef");
    let value = serde_json::to_value(&with_sum).unwrap();
    assert_eq!(value["checksums"]["ADLER32"], "deadbeef");
}

#[test]
fn test_harvest_append_only_order() {
    let harvest = sample_harvest();
    let urls: Vec<_> = harvest.files().iter().map(|f| f.url.as_str()).collect();
    assert_eq!(urls, ["/a/f1", "/a/d1", "/a/d1/f2"]);

    let ledger: Vec<_> = harvest.errors().iter().map(|e| e.url.as_str()).collect();
    assert_eq!(ledger, ["/a", "/a/d1"]);
}

#[test]
fn test_inconsistent_harvest_detected() {
    let json = r#"{
        "size_so_far": 999,
        "files": [{"url": "/a/f1", "fstat": {"mode": 33188, "nlink": 1, "uid": 0, "gid": 0, "size": 1, "mtime": 0}}],
        "errors": [],
        "start_time": "2024-01-01T00:00:00Z"
    }"#;
    let harvest: HarvestState = serde_json::from_str(json).unwrap();
    assert!(!harvest.is_consistent());
    assert!(harvest.warnings().is_empty());
}

#[test]
fn test_stat_kind_detection() {
    assert_eq!(StatRecord::directory(0o755).kind(), FileKind::Directory);
    assert_eq!(StatRecord::file(0o644, 0).kind(), FileKind::Regular);

    let link = StatRecord {
        mode: 0o120_777,
        ..StatRecord::default()
    };
    assert!(link.is_symlink());
    assert!(!link.is_dir());
}

#[test]
fn test_dir_entry_end_marker() {
    assert!(DirEntry::new("", StatRecord::default()).is_end_marker());
    assert!(!DirEntry::new("f1", StatRecord::default()).is_end_marker());
}

#[test]
fn test_storage_error_display() {
    let err = StorageError::list("/pnfs/missing", "No such file or directory");
    assert_eq!(
        err.to_string(),
        "unable to list /pnfs/missing: No such file or directory"
    );
    assert_eq!(err.kind(), WarningKind::ListError);
}

#[test]
fn test_config_serde_defaults() {
    let config: CrawlConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, CrawlConfig::default());
}

#[test]
fn test_join_url_nested() {
    let dir = join_url("/pnfs/data", "run1");
    assert_eq!(join_url(&dir, "f.root"), "/pnfs/data/run1/f.root");
}
