//! Integration tests for configuration and roster file loading

mod common;

use alumni::prelude::*;
use std::fs;
use tempfile::TempDir;

const ROSTER_JSON: &str = r#"[
    {"id": 1, "name": "Samantha Carter", "batch": 2015, "company": "Stargate Command",
     "location": "Colorado Springs", "industry": "Aerospace & Defense",
     "skills": ["Astrophysics"], "profilePic": "https://placehold.co/100x100"},
    {"id": 2, "name": "John Sheppard", "batch": 2004, "company": "Atlantis Expedition",
     "location": "Pegasus Galaxy", "industry": "Exploration"}
]"#;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_config_file_resolves_relative_roster_path() {
    let dir = TempDir::new().unwrap();
    write(&dir, "alumni.json", ROSTER_JSON);
    let config_path = write(
        &dir,
        "portal.yaml",
        r#"
directory:
  roster_path: alumni.json
  default_sort: batch-desc
"#,
    );

    let config = PortalConfig::from_yaml_file(&config_path).unwrap();
    let roster_path = config.directory.roster_path.clone().unwrap();
    assert_eq!(roster_path, dir.path().join("alumni.json"));

    let roster = Roster::from_file(&roster_path).unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(
        roster.get(1).unwrap().profile_pic.as_deref(),
        Some("https://placehold.co/100x100")
    );
}

#[test]
fn test_absent_sections_use_defaults() {
    let dir = TempDir::new().unwrap();
    let config_path = write(&dir, "portal.yaml", "server:\n  bind: \"0.0.0.0:8080\"\n");

    let config = PortalConfig::from_yaml_file(&config_path).unwrap();

    assert_eq!(config.server.bind, "0.0.0.0:8080");
    assert!(config.server.cors);
    assert_eq!(config.directory.default_sort().unwrap(), SortSpec::default());
    assert!(config.directory.roster_path.is_none());
    assert!(config.donations.campaigns.is_empty());
}

#[test]
fn test_missing_config_file() {
    let err = PortalConfig::from_yaml_file("/definitely/not/here.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::IoError { .. }));
}

#[test]
fn test_invalid_yaml_reports_file() {
    let dir = TempDir::new().unwrap();
    let config_path = write(&dir, "portal.yaml", "directory: [unclosed");

    match PortalConfig::from_yaml_file(&config_path).unwrap_err() {
        ConfigError::ParseError { file, .. } => assert!(file.unwrap().ends_with("portal.yaml")),
        other => panic!("expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_zero_page_size_rejected() {
    let err = PortalConfig::from_yaml_str("directory:\n  max_page_size: 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn test_roster_duplicate_ids_rejected() {
    let mut alumni = common::sample_alumni();
    alumni[1].id = alumni[0].id;

    let err = Roster::new(alumni).unwrap_err();
    assert!(matches!(err, RosterError::DuplicateId { id: 1 }));
}

#[test]
fn test_roster_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "alumni.csv", "id,name");

    let err = Roster::from_file(&path).unwrap_err();
    assert!(matches!(err, RosterError::UnsupportedFormat { .. }));
}

#[test]
fn test_demo_data_loads() {
    let config_path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data/portal.yaml");
    let config = PortalConfig::from_yaml_file(config_path).unwrap();

    let roster = Roster::from_file(config.directory.roster_path.as_ref().unwrap()).unwrap();
    assert_eq!(roster.len(), 8);
    assert_eq!(config.donations.campaigns.len(), 4);
    assert_eq!(config.directory.max_page_size, 50);
}
