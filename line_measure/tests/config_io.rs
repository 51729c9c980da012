use assert_fs::prelude::*;
use line_measure::config::{read_config_json, write_config_json, EngineConfig};
use line_measure::geodesy::BearingConvention;
use predicates::prelude::*;

#[test]
fn write_then_read_config() {
    let file = assert_fs::NamedTempFile::new("engine.json").unwrap();
    let mut cfg = EngineConfig::default();
    cfg.bearing = BearingConvention::Signed;
    cfg.overlay.id = "bearings".to_string();
    write_config_json(file.path().to_str().unwrap(), &cfg).unwrap();

    file.assert(predicate::str::contains("\"signed\""));
    let loaded = read_config_json(file.path().to_str().unwrap()).unwrap();
    assert_eq!(loaded, cfg);
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = assert_fs::TempDir::new().unwrap();
    let path = dir.child("missing.json");
    let err = read_config_json(path.path().to_str().unwrap()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}
