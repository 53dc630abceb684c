use iamsync_fs::{ConfigStore, Error, NormalizedPath};
use serde::Deserialize;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Deserialize, PartialEq)]
struct Sample {
    name: String,
    #[serde(default)]
    enabled: bool,
}

fn write(temp: &TempDir, file: &str, content: &str) -> NormalizedPath {
    let path = temp.path().join(file);
    fs::write(&path, content).unwrap();
    NormalizedPath::new(path)
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "c.toml", "name = \"a\"\nenabled = true\n");
    let sample: Sample = ConfigStore::new().load(&path).unwrap();
    assert_eq!(sample, Sample { name: "a".into(), enabled: true });
}

#[test]
fn test_load_json() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "c.json", r#"{"name": "b"}"#);
    let sample: Sample = ConfigStore::new().load(&path).unwrap();
    assert_eq!(sample.name, "b");
    assert!(!sample.enabled);
}

#[test]
fn test_load_yml() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "c.yml", "name: c\nenabled: true\n");
    let sample: Sample = ConfigStore::new().load(&path).unwrap();
    assert_eq!(sample.name, "c");
}

#[test]
fn test_load_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "c.ini", "name=c");
    let result: Result<Sample, _> = ConfigStore::new().load(&path);
    assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
}

#[test]
fn test_load_malformed_reports_format() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "c.toml", "name = ");
    let result: Result<Sample, _> = ConfigStore::new().load(&path);
    match result {
        Err(Error::ConfigParse { format, .. }) => assert_eq!(format, "TOML"),
        other => panic!("expected ConfigParse, got {:?}", other),
    }
}
