//! Root configuration type and loading.

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::leader::LeaderConfig;
use super::tiling::{AnimationsConfig, TilingConfig};

/// Errors raised while locating or parsing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error(
        "no configuration file found, expected ~/.config/concertina/config.jsonc or config.json"
    )]
    NotFound,

    /// The configuration file exists but could not be read.
    #[error("failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The configuration file contains invalid JSON.
    #[error("failed to parse configuration file: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// The complete configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ConcertinaConfig {
    /// Optional JSON schema reference for editor support.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Layout, spacing and window rule settings.
    pub tiling: TilingConfig,

    /// Window transition settings.
    pub animations: AnimationsConfig,

    /// Leader-key settings.
    pub leader: LeaderConfig,
}

impl ConcertinaConfig {
    /// Applies load-time clamping and caching. Called by every loader.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.tiling.normalize();
        self
    }
}

/// Configuration file names, in priority order.
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

const APP_DIR: &str = "concertina";

/// Returns the possible configuration file paths in priority order.
///
/// 1. `$XDG_CONFIG_HOME/concertina/` when the variable is set
/// 2. `~/.config/concertina/`
/// 3. The platform configuration directory
///    (`~/Library/Application Support/concertina/` on macOS)
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut dirs_in_order = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        dirs_in_order.push(PathBuf::from(xdg_config).join(APP_DIR));
    }
    if let Some(home) = dirs::home_dir() {
        dirs_in_order.push(home.join(".config").join(APP_DIR));
    }
    if let Some(config_dir) = dirs::config_dir() {
        dirs_in_order.push(config_dir.join(APP_DIR));
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for dir in dirs_in_order {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }
    paths
}

/// Loads the configuration from the first existing config file.
///
/// # Errors
///
/// [`ConfigError::NotFound`] when no candidate exists, or the error from
/// [`load_config_from_path`].
pub fn load_config() -> Result<(ConcertinaConfig, PathBuf), ConfigError> {
    config_paths()
        .into_iter()
        .find(|path| path.exists())
        .ok_or(ConfigError::NotFound)
        .and_then(|path| load_config_from_path(&path))
}

/// Loads a JSONC configuration file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed.
pub fn load_config_from_path(path: &Path) -> Result<(ConcertinaConfig, PathBuf), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }
    let file = fs::File::open(path)?;
    let reader = json_comments::StripComments::new(file);
    let config: ConcertinaConfig = serde_json::from_reader(reader)?;
    Ok((config.normalized(), path.to_path_buf()))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::tiling::state::LayoutId;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".jsonc").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_loads_jsonc_with_comments() {
        let file = write_config(
            r#"{
                // spacing
                "tiling": { "margin": 12, "accordionOffset": 2, "defaultLayout": "columns-3" },
                /* animations */
                "animations": { "duration": 150, "easing": "linear" }
            }"#,
        );

        let (config, path) = load_config_from_path(file.path()).unwrap();

        assert_eq!(path, file.path());
        assert_eq!(config.tiling.margin, 12.0);
        assert_eq!(config.tiling.accordion_offset, 4.0);
        assert_eq!(config.tiling.default_layout, LayoutId::Columns3);
        assert_eq!(config.animations.duration, 150);
        assert_eq!(config.tiling.padding, 8.0);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_from_path(&dir.path().join("nope.jsonc"));
        assert!(matches!(result, Err(ConfigError::NotFound)));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let file = write_config("{ \"tiling\": { \"margin\": \"wide\" } }");
        assert!(matches!(load_config_from_path(file.path()), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_config_paths_prefer_jsonc() {
        let paths = config_paths();
        if let Some(first) = paths.first() {
            assert_eq!(first.file_name().and_then(|n| n.to_str()), Some("config.jsonc"));
        }
        assert!(paths.iter().all(|p| p.parent().is_some_and(|d| d.ends_with(APP_DIR))));
    }

    #[test]
    fn test_rules_are_prepared_on_load() {
        let file = write_config(r#"{ "tiling": { "floating": [{ "appName": "Calculator" }] } }"#);
        let (config, _) = load_config_from_path(file.path()).unwrap();
        assert_eq!(config.tiling.floating[0].app_name_lowercase(), Some("calculator"));
    }
}
