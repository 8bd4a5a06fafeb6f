use chrono::{TimeDelta, Utc};
use gfharvest_core::{CrawlWarning, FileRecord, HarvestState, StatRecord, WarningKind};
use gfharvest_report::{HarvestReport, ReportError, read_report, write_report};
use tempfile::TempDir;

fn sample_harvest() -> HarvestState {
    let mut harvest = HarvestState::new();
    harvest.record_listing("/a");
    harvest.record_file(FileRecord::new("/a/f1", StatRecord::file(0o644, 100).with_mtime(1_600_000_000)));
    harvest.record_file(FileRecord::new("/a/d1", StatRecord::directory(0o755)));
    harvest.record_listing("/a/d1");
    harvest.record_file(
        FileRecord::new("/a/d1/f2", StatRecord::file(0o644, 50)).with_checksum("ADLER32", "01020304"),
    );
    harvest
}

#[test]
fn test_write_then_read_roundtrip() {
    let temp = TempDir::new().unwrap();
    let harvest = sample_harvest();
    let finished = harvest.start_time() + TimeDelta::seconds(3);
    let report = HarvestReport::new("/a", harvest.clone(), finished);

    let path = write_report(temp.path(), &report).unwrap();
    assert!(path.exists());
    assert_eq!(path.file_name().unwrap().to_string_lossy(), report.file_name());

    let restored = read_report(&path).unwrap();
    assert_eq!(restored.harvest, harvest);
    assert_eq!(restored.harvest.files(), harvest.files());
    assert_eq!(restored.harvest.errors(), harvest.errors());
    assert_eq!(restored.harvest.size_so_far(), 150);
    assert_eq!(restored.url, "/a");
    assert!((restored.elapsed_seconds - 3.0).abs() < 1e-9);
    assert!((restored.start_timestamp - report.start_timestamp).abs() < 1e-6);
}

#[test]
fn test_failed_crawl_still_written() {
    let temp = TempDir::new().unwrap();
    let mut harvest = HarvestState::new();
    harvest.record_warning(CrawlWarning::new(
        "/gone",
        "unable to list /gone: No such file or directory",
        WarningKind::ListError,
    ));

    let report = HarvestReport::new("/gone", harvest, Utc::now());
    let path = write_report(temp.path(), &report).unwrap();

    let restored = read_report(&path).unwrap();
    assert!(restored.harvest.files().is_empty());
    assert!(restored.harvest.errors().is_empty());
    assert_eq!(restored.harvest.warnings().len(), 1);
}

#[test]
fn test_report_json_layout() {
    let report = HarvestReport::new("/a", sample_harvest(), Utc::now());
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["url"], "/a");
    assert_eq!(value["harvest"]["size_so_far"], 150);
    assert_eq!(value["harvest"]["files"][0]["fstat"]["size"], 100);
    assert_eq!(value["harvest"]["errors"][1]["url"], "/a/d1");
    assert!(value["harvest"]["files"][0].get("checksums").is_none());
    assert_eq!(value["harvest"]["files"][2]["checksums"]["ADLER32"], "01020304");
    assert!(value["elapsed_seconds"].is_f64());
}

#[test]
fn test_collected_in_alias() {
    let report = HarvestReport::new("/a", sample_harvest(), Utc::now());
    let mut value = serde_json::to_value(&report).unwrap();
    let object = value.as_object_mut().unwrap();
    let elapsed = object.remove("elapsed_seconds").unwrap();
    object.insert("collected_in".to_string(), elapsed);

    let restored: HarvestReport = serde_json::from_value(value).unwrap();
    assert_eq!(restored.harvest, report.harvest);
}

#[test]
fn test_write_into_missing_directory() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("not-there");
    let report = HarvestReport::new("/a", HarvestState::new(), Utc::now());

    let err = write_report(&missing, &report).unwrap_err();
    assert!(matches!(err, ReportError::Io { .. }));
}

#[test]
fn test_read_garbage() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(read_report(&path), Err(ReportError::Json(_))));
}
