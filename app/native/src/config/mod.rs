//! Configuration module for Concertina.
//!
//! Provides the configuration types, loading, the shared [`ConfigStore`]
//! snapshot and file watching for hot reload.
//!
//! The configuration file supports JSONC format (JSON with comments). Both
//! single-line (`//`) and multi-line (`/* */`) comments are allowed.

pub mod types;
mod watcher;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
pub use types::{
    AnimationsConfig, ConcertinaConfig, ConfigError, EasingType, LeaderBinding, LeaderConfig,
    TilingConfig, WindowRule, config_paths, load_config, load_config_from_path,
};
pub use watcher::{CONFIG_DEBOUNCE_MS, watch_config_file};

/// Holds the active configuration snapshot.
///
/// Readers take an `Arc` snapshot and keep using it for the rest of their
/// pass; a reload only affects snapshots taken afterwards.
#[derive(Debug)]
pub struct ConfigStore {
    current: RwLock<Arc<ConcertinaConfig>>,
    path: RwLock<Option<PathBuf>>,
}

impl Default for ConfigStore {
    fn default() -> Self { Self::new(ConcertinaConfig::default()) }
}

impl ConfigStore {
    /// Creates a store holding `config`, not backed by any file.
    #[must_use]
    pub fn new(config: ConcertinaConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config.normalized())),
            path: RwLock::new(None),
        }
    }

    /// Loads from `custom_path`, or from the first default location.
    ///
    /// # Errors
    ///
    /// Returns the loader's error, including [`ConfigError::NotFound`].
    pub fn load(custom_path: Option<&Path>) -> Result<Self, ConfigError> {
        let (config, path) = match custom_path {
            Some(path) => load_config_from_path(path)?,
            None => load_config()?,
        };
        tracing::info!(path = %path.display(), "configuration loaded");
        let store = Self::new(config);
        *store.path.write() = Some(path);
        Ok(store)
    }

    /// Like [`Self::load`], falling back to defaults on any error.
    #[must_use]
    pub fn load_or_default(custom_path: Option<&Path>) -> Self {
        match Self::load(custom_path) {
            Ok(store) => store,
            Err(ConfigError::NotFound) => {
                tracing::debug!("no configuration file found, using defaults");
                Self::default()
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load configuration, using defaults");
                Self::default()
            }
        }
    }

    /// The current configuration.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ConcertinaConfig> { Arc::clone(&self.current.read()) }

    /// Path of the file backing this store, if any.
    #[must_use]
    pub fn path(&self) -> Option<PathBuf> { self.path.read().clone() }

    /// Installs a new configuration.
    pub fn replace(&self, config: ConcertinaConfig) {
        *self.current.write() = Arc::new(config.normalized());
    }

    /// Re-reads the backing file. The previous snapshot stays active on error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] when the store has no backing file,
    /// or the loader's error.
    pub fn reload(&self) -> Result<Arc<ConcertinaConfig>, ConfigError> {
        let path = self.path().ok_or(ConfigError::NotFound)?;
        let (config, _) = load_config_from_path(&path)?;
        let snapshot = Arc::new(config);
        *self.current.write() = Arc::clone(&snapshot);
        Ok(snapshot)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_snapshots_are_isolated_from_reloads() {
        let mut file = tempfile::Builder::new().suffix(".jsonc").tempfile().unwrap();
        write!(file, r#"{{ "tiling": {{ "margin": 4 }} }}"#).unwrap();

        let store = ConfigStore::load(Some(file.path())).unwrap();
        let before = store.snapshot();
        assert_eq!(before.tiling.margin, 4.0);

        std::fs::write(file.path(), r#"{ "tiling": { "margin": 16 } }"#).unwrap();
        store.reload().unwrap();

        assert_eq!(before.tiling.margin, 4.0);
        assert_eq!(store.snapshot().tiling.margin, 16.0);
    }

    #[test]
    fn test_failed_reload_keeps_previous_snapshot() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{}}").unwrap();
        let store = ConfigStore::load(Some(file.path())).unwrap();

        std::fs::write(file.path(), "{ not json").unwrap();
        assert!(store.reload().is_err());
        assert_eq!(store.snapshot().tiling.margin, 8.0);
    }

    #[test]
    fn test_default_store_has_no_path() {
        let store = ConfigStore::default();
        assert!(store.path().is_none());
        assert!(matches!(store.reload(), Err(ConfigError::NotFound)));
    }

    #[test]
    fn test_replace_normalizes() {
        let store = ConfigStore::default();
        let mut config = ConcertinaConfig::default();
        config.tiling.accordion_offset = 0.0;
        store.replace(config);
        assert_eq!(store.snapshot().tiling.accordion_offset, 4.0);
    }
}
