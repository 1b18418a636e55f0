//! Configuration file watcher for hot reload.
//!
//! Watches the configuration file's parent directory (editors often save by
//! writing a temp file and renaming it) and reloads the [`ConfigStore`] once
//! events have been quiet for [`CONFIG_DEBOUNCE_MS`].

use std::sync::Arc;
use std::sync::mpsc::RecvTimeoutError;
use std::thread::JoinHandle;
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use super::{ConcertinaConfig, ConfigStore};

/// Quiet period before a burst of file events triggers a reload (ms).
pub const CONFIG_DEBOUNCE_MS: u64 = 200;

/// Starts watching the store's backing file.
///
/// `on_reload` runs on the watcher thread after every successful reload.
/// Returns `None` when the store has no backing file or the watcher could
/// not be created.
pub fn watch_config_file<F>(store: Arc<ConfigStore>, on_reload: F) -> Option<JoinHandle<()>>
where
    F: Fn(&Arc<ConcertinaConfig>) + Send + 'static,
{
    let config_path = store.path()?;
    let config_filename = config_path.file_name()?.to_os_string();
    let watch_path = config_path.parent().map(std::path::Path::to_path_buf)?;

    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher: RecommendedWatcher = match notify::recommended_watcher(tx) {
        Ok(watcher) => watcher,
        Err(err) => {
            tracing::warn!(error = %err, "failed to create config watcher");
            return None;
        }
    };
    if let Err(err) = watcher.watch(&watch_path, RecursiveMode::NonRecursive) {
        tracing::warn!(error = %err, path = %watch_path.display(), "failed to watch config file");
        return None;
    }

    let debounce = Duration::from_millis(CONFIG_DEBOUNCE_MS);
    let affects_config = move |event: &notify::Event| {
        event.paths.iter().any(|p| p.file_name().is_some_and(|name| name == config_filename))
    };

    let handle = std::thread::spawn(move || {
        // Dropping the watcher closes the channel, so it lives on this thread.
        let _watcher = watcher;

        loop {
            match rx.recv() {
                Ok(Ok(event)) if affects_config(&event) => {}
                Ok(Ok(_)) => continue,
                Ok(Err(err)) => {
                    tracing::warn!(error = %err, "config watch error");
                    continue;
                }
                Err(_) => break,
            }

            // Wait for the burst to settle.
            loop {
                match rx.recv_timeout(debounce) {
                    Ok(_) => {}
                    Err(RecvTimeoutError::Timeout) => break,
                    Err(RecvTimeoutError::Disconnected) => return,
                }
            }

            match store.reload() {
                Ok(snapshot) => {
                    tracing::info!("configuration reloaded");
                    on_reload(&snapshot);
                }
                Err(err) => tracing::warn!(error = %err, "config reload failed, keeping previous"),
            }
        }
    });

    Some(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_debounce_duration_is_reasonable() {
        const { assert!(CONFIG_DEBOUNCE_MS >= 100) };
        const { assert!(CONFIG_DEBOUNCE_MS <= 1000) };
    }

    #[test]
    fn test_store_without_file_is_not_watched() {
        let store = Arc::new(ConfigStore::default());
        assert!(watch_config_file(store, |_| {}).is_none());
    }
}
