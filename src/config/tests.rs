//! Tests for the config module

use super::loader::with_env_overrides;
use super::types::*;
use super::PROJECT_CONFIG;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_settings_default() {
    let settings = Settings::default();

    assert_eq!(settings.workdir.mode, WorkdirMode::Ephemeral);
    assert_eq!(settings.sandbox.parent_dir, PathBuf::from(".virtualenvs"));
    assert_eq!(settings.sandbox.index_url, None);
    assert_eq!(settings.sandbox.builder, vec!["virtualenv"]);
    assert_eq!(settings.sandbox.installer, vec!["pip"]);
    assert_eq!(settings.database.env_var, "PGDATABASE");
    assert_eq!(settings.database.create, vec!["createdb"]);
    assert_eq!(settings.database.drop, vec!["dropdb"]);
    assert_eq!(settings.execution.interpreter, vec!["python"]);
    assert_eq!(settings.store.root, None);
}

#[test]
fn test_settings_parse_toml() {
    let toml = r#"
[workdir]
mode = "in_place"
path = "/tmp/replay-work"

[sandbox]
parent_dir = "/var/cache/replay"
index_url = "file:///srv/pypi/simple"
installer = ["python3", "-m", "pip"]

[database]
user = "ci"

[execution]
interpreter = ["python3", "-u"]
"#;

    let settings: Settings = toml::from_str(toml).unwrap();

    assert_eq!(settings.workdir.mode, WorkdirMode::InPlace);
    assert_eq!(
        settings.workdir.path,
        Some(PathBuf::from("/tmp/replay-work"))
    );
    assert_eq!(
        settings.sandbox.parent_dir,
        PathBuf::from("/var/cache/replay")
    );
    assert_eq!(
        settings.sandbox.index_url.as_deref(),
        Some("file:///srv/pypi/simple")
    );
    assert_eq!(settings.sandbox.installer, vec!["python3", "-m", "pip"]);
    // untouched keys keep their defaults
    assert_eq!(settings.sandbox.builder, vec!["virtualenv"]);
    assert_eq!(settings.database.user.as_deref(), Some("ci"));
    assert_eq!(settings.database.env_var, "PGDATABASE");
    assert_eq!(settings.execution.interpreter, vec!["python3", "-u"]);
}

#[test]
fn test_load_with_warnings_reports_unknown_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[sandbox]
index_ulr = "file:///srv/pypi"
"#,
    )
    .unwrap();

    let (settings, warnings) = Settings::load_with_warnings(&path).unwrap();

    assert_eq!(settings.sandbox.index_url, None);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "index_ulr");
    assert_eq!(warnings[0].line, Some(3));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("index_url"));
}

#[test]
fn test_unknown_key_points_at_its_own_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[store]\nroot = \"/srv/store\"\n\n[execution]\nroot = \"/srv/other\"\n",
    )
    .unwrap();

    let (settings, warnings) = Settings::load_with_warnings(&path).unwrap();

    assert_eq!(settings.store.root, Some(PathBuf::from("/srv/store")));
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "root");
    assert_eq!(warnings[0].line, Some(5));
    assert_eq!(warnings[0].suggestion, None);
}

#[test]
fn test_load_invalid_toml_is_config_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[workdir]\nmode = \"sideways\"\n").unwrap();

    let err = Settings::load(&path).unwrap_err();

    assert!(matches!(err, crate::error::ReplayError::Config { .. }));
}

#[test]
fn test_load_or_default_prefers_project_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join(PROJECT_CONFIG);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(
        &config_path,
        r#"
[database]
env_var = "SCRATCH_DB"

[execution]
interpreter = ["python3"]
"#,
    )
    .unwrap();

    let settings = Settings::load_or_default(Some(dir.path()));

    assert_eq!(settings.database.env_var, "SCRATCH_DB");
    assert_eq!(settings.execution.interpreter, vec!["python3"]);
}

#[test]
fn test_env_overrides() {
    std::env::set_var("REPLAY_WORKDIR", "/srv/replay/work");
    std::env::set_var("REPLAY_INDEX_URL", "");
    let mut settings = Settings::default();
    settings.sandbox.index_url = Some("https://pypi.example/simple".to_string());

    let settings = with_env_overrides(settings);

    std::env::remove_var("REPLAY_WORKDIR");
    std::env::remove_var("REPLAY_INDEX_URL");

    assert_eq!(settings.workdir.mode, WorkdirMode::InPlace);
    assert_eq!(
        settings.workdir.path,
        Some(PathBuf::from("/srv/replay/work"))
    );
    assert_eq!(settings.sandbox.index_url, None);
}
