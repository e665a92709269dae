//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ReplayError, ReplayResult};

use super::types::{Settings, WorkdirMode};

/// Project-level configuration file, relative to the project root
pub const PROJECT_CONFIG: &str = ".replay/config.toml";

/// Non-fatal configuration warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Keys each table accepts; the empty name is the top level
const KNOWN_KEYS: &[(&str, &[&str])] = &[
    ("", &["workdir", "sandbox", "database", "execution", "store"]),
    ("workdir", &["mode", "path"]),
    ("sandbox", &["parent_dir", "index_url", "builder", "installer"]),
    ("database", &["env_var", "user", "create", "drop"]),
    ("execution", &["interpreter"]),
    ("store", &["root"]),
];

/// Largest edit distance still offered as a suggestion
const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ReplayResult<(Settings, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut ignored = Vec::new();
    let settings: Settings =
        serde_ignored::deserialize(toml::de::Deserializer::new(&content), |unknown| {
            ignored.push(unknown.to_string());
        })
        .map_err(|e| ReplayError::Config {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let warnings = ignored
        .iter()
        .map(String::as_str)
        .map(|dotted| {
            let (section, key) = dotted.rsplit_once('.').unwrap_or(("", dotted));
            ConfigWarning {
                key: key.to_string(),
                file: path.to_path_buf(),
                line: key_line(&content, section, key),
                suggestion: suggest_key(section, key),
            }
        })
        .collect();

    Ok((settings, warnings))
}

/// Load from project config, user config, or defaults
pub fn load_or_default(project_root: Option<&Path>) -> Settings {
    let user_config = dirs::config_dir().map(|dir| dir.join("replay/config.toml"));
    let candidates = project_root
        .map(|root| root.join(PROJECT_CONFIG))
        .into_iter()
        .chain(user_config);

    for candidate in candidates {
        if !candidate.exists() {
            continue;
        }
        match load_with_warnings(&candidate) {
            Ok((settings, warnings)) => {
                for warning in warnings {
                    warn!(
                        key = %warning.key,
                        file = %warning.file.display(),
                        suggestion = ?warning.suggestion,
                        "unknown configuration key"
                    );
                }
                debug!(file = %candidate.display(), "loaded configuration");
                return with_env_overrides(settings);
            }
            Err(e) => warn!(file = %candidate.display(), error = %e, "ignoring configuration"),
        }
    }

    with_env_overrides(Settings::default())
}

/// Apply environment variable overrides (REPLAY_* prefix)
pub fn with_env_overrides(mut settings: Settings) -> Settings {
    // REPLAY_SANDBOX_DIR
    if let Ok(dir) = std::env::var("REPLAY_SANDBOX_DIR") {
        if !dir.is_empty() {
            settings.sandbox.parent_dir = PathBuf::from(dir);
        }
    }

    // REPLAY_INDEX_URL (empty disables)
    if let Ok(url) = std::env::var("REPLAY_INDEX_URL") {
        settings.sandbox.index_url = Some(url).filter(|u| !u.is_empty());
    }

    // REPLAY_WORKDIR: "ephemeral" or a directory for in-place runs
    if let Ok(workdir) = std::env::var("REPLAY_WORKDIR") {
        match workdir.as_str() {
            "" => {}
            "ephemeral" => settings.workdir.mode = WorkdirMode::Ephemeral,
            path => {
                settings.workdir.mode = WorkdirMode::InPlace;
                settings.workdir.path = Some(PathBuf::from(path));
            }
        }
    }

    // REPLAY_STORE_ROOT
    if let Ok(root) = std::env::var("REPLAY_STORE_ROOT") {
        if !root.is_empty() {
            settings.store.root = Some(PathBuf::from(root));
        }
    }

    settings
}

/// 1-based line where `key` is set inside `[section]`
fn key_line(content: &str, section: &str, key: &str) -> Option<usize> {
    let mut table = "";
    content.lines().enumerate().find_map(|(index, line)| {
        let line = line.trim();
        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            table = header.trim();
            return (section.is_empty() && table == key).then_some(index + 1);
        }
        let assigned = line.split_once('=').map(|(name, _)| name.trim());
        (table == section && assigned == Some(key)).then_some(index + 1)
    })
}

/// Closest known key of the same table
fn suggest_key(section: &str, key: &str) -> Option<String> {
    let (_, known) = KNOWN_KEYS.iter().find(|(name, _)| *name == section)?;
    known
        .iter()
        .map(|candidate| (edit_distance(key, candidate), *candidate))
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min()
        .map(|(_, candidate)| candidate.to_string())
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = (above + 1)
                .min(row[j] + 1)
                .min(diagonal + usize::from(ca != cb));
            diagonal = above;
        }
    }
    row[b.len()]
}
