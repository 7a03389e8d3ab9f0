use std::collections::HashMap;
use std::path::PathBuf;

use wildfire_core::config::{
    DEFAULT_FIRES_PATH, DEFAULT_STATES_PATH, FIRES_PATH_ENV, STATES_PATH_ENV,
};
use wildfire_core::{PipelineConfig, PipelineError};

#[test]
fn defaults_point_at_data_directory() {
    let config = PipelineConfig::default();
    assert_eq!(config.fires_path, PathBuf::from(DEFAULT_FIRES_PATH));
    assert_eq!(config.states_path, PathBuf::from(DEFAULT_STATES_PATH));
}

#[test]
fn toml_overrides_only_named_fields() {
    let config = PipelineConfig::from_toml_str(r#"fires_path = "/srv/fires.csv""#).unwrap();
    assert_eq!(config.fires_path, PathBuf::from("/srv/fires.csv"));
    assert_eq!(config.states_path, PathBuf::from(DEFAULT_STATES_PATH));
}

#[test]
fn unknown_toml_keys_are_rejected() {
    let err = PipelineConfig::from_toml_str("fire_path = \"typo.csv\"").unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));
}

#[test]
fn config_file_is_read_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wildfire.toml");
    std::fs::write(
        &path,
        "fires_path = \"a.csv\"\nstates_path = \"b.csv\"\n",
    )
    .unwrap();

    let config = PipelineConfig::from_file(&path).unwrap();
    assert_eq!(config, PipelineConfig::new("a.csv", "b.csv"));

    let missing = PipelineConfig::from_file(&dir.path().join("none.toml")).unwrap_err();
    assert!(matches!(missing, PipelineError::Io(_)));
}

#[test]
fn environment_overrides_skip_blank_values() {
    let env: HashMap<&str, &str> = [(FIRES_PATH_ENV, "/env/fires.csv"), (STATES_PATH_ENV, "  ")]
        .into_iter()
        .collect();
    let config = PipelineConfig::default()
        .with_overrides_from(|key| env.get(key).map(|value| value.to_string()));

    assert_eq!(config.fires_path, PathBuf::from("/env/fires.csv"));
    assert_eq!(config.states_path, PathBuf::from(DEFAULT_STATES_PATH));
}
