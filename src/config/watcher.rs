//! Hot reload of the tracer configuration file.
//!
//! The `notify` callback only signals that the file changed. Loading happens
//! on the async side in [`ReloadStream::next_config`], after a quiet period so
//! an editor's multi-step save produces a single reload. Configs that fail to
//! load or validate are logged and skipped; the registry keeps what it has.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::apply::{ApplySummary, ConfigApplier};
use crate::config::loader::load_config;
use crate::config::schema::TracerConfig;
use crate::registry::TraceRegistry;

/// Quiet period after the last file event before reloading.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Builder for a file watch on a tracer config.
#[derive(Debug, Clone)]
pub struct ConfigWatcher {
    path: PathBuf,
    debounce: Duration,
}

impl ConfigWatcher {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Start watching. The watch stops when the returned stream is dropped.
    pub fn spawn(self) -> Result<ReloadStream, notify::Error> {
        let (change_tx, change_rx) = mpsc::unbounded_channel();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                let _ = change_tx.send(());
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "Tracer config watch error"),
        })?;
        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %self.path.display(), debounce_ms = self.debounce.as_millis() as u64, "Tracer config watch started");
        let mut stream = ReloadStream::from_signals(&self.path, self.debounce, change_rx);
        stream.watcher = Some(watcher);
        Ok(stream)
    }
}

/// Validated configurations produced by file changes.
pub struct ReloadStream {
    path: PathBuf,
    debounce: Duration,
    changes: mpsc::UnboundedReceiver<()>,
    watcher: Option<RecommendedWatcher>,
}

impl ReloadStream {
    /// Stream driven by an arbitrary change signal instead of a file watch.
    pub fn from_signals(path: &Path, debounce: Duration, changes: mpsc::UnboundedReceiver<()>) -> Self {
        Self {
            path: path.to_path_buf(),
            debounce,
            changes,
            watcher: None,
        }
    }

    /// Wait for the next change burst and load the file.
    ///
    /// Returns `None` once the change signal is closed.
    pub async fn next_config(&mut self) -> Option<TracerConfig> {
        loop {
            self.changes.recv().await?;
            let mut coalesced = 1u32;
            while let Ok(Some(())) = tokio::time::timeout(self.debounce, self.changes.recv()).await {
                coalesced += 1;
            }

            match load_config(&self.path) {
                Ok(config) => {
                    tracing::debug!(path = %self.path.display(), events = coalesced, "Tracer config reloaded");
                    return Some(config);
                }
                Err(e) => tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "Rejected tracer config reload, keeping current configuration"
                ),
            }
        }
    }

    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }
}

/// Apply every reloaded config to `registry` until the stream ends.
///
/// `on_applied` runs after each successful apply. Returns the number of
/// successful applies.
pub async fn apply_updates<F>(
    registry: &TraceRegistry,
    applier: &ConfigApplier,
    stream: &mut ReloadStream,
    mut on_applied: F,
) -> usize
where
    F: FnMut(&ApplySummary),
{
    let mut applied = 0;
    while let Some(config) = stream.next_config().await {
        match applier.apply(registry, &config) {
            Ok(summary) => {
                applied += 1;
                on_applied(&summary);
            }
            Err(e) => tracing::error!(error = %e, "Failed to apply reloaded tracer config"),
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SourceLevel;

    fn temp_config(tag: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("tracer_watch_{}_{}.toml", tag, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_burst_of_changes_applies_once() {
        let path = temp_config("burst", "[[sources]]\nname = \"app\"\nlevel = \"error\"\n");
        let registry = TraceRegistry::default();
        let applier = ConfigApplier::new();

        let (tx, rx) = mpsc::unbounded_channel();
        let mut stream = ReloadStream::from_signals(&path, Duration::from_millis(20), rx);
        for _ in 0..3 {
            tx.send(()).unwrap();
        }
        drop(tx);

        let mut summaries = Vec::new();
        let applied = apply_updates(&registry, &applier, &mut stream, |s| summaries.push(*s)).await;

        assert_eq!(applied, 1);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].levels_set, 1);
        assert_eq!(registry.configured_level("app"), Some(SourceLevel::Error));
        assert!(!stream.is_watching());

        // Cleanup
        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[tokio::test]
    async fn test_invalid_reload_is_skipped() {
        let path = temp_config("invalid", "[[sources]]\nname = \"app\"\nlisteners = [\"ghost\"]\n");
        let registry = TraceRegistry::default();
        let applier = ConfigApplier::new();

        let (tx, rx) = mpsc::unbounded_channel();
        let mut stream = ReloadStream::from_signals(&path, Duration::from_millis(5), rx);
        tx.send(()).unwrap();
        drop(tx);

        assert_eq!(apply_updates(&registry, &applier, &mut stream, |_| {}).await, 0);
        assert_eq!(registry.configured_level("app"), None);

        // Cleanup
        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[tokio::test]
    async fn test_file_change_produces_config() {
        let path = temp_config("notify", "");
        let mut stream = ConfigWatcher::new(&path)
            .with_debounce(Duration::from_millis(50))
            .spawn()
            .unwrap();
        assert!(stream.is_watching());

        tokio::time::sleep(Duration::from_millis(200)).await;
        std::fs::write(&path, "[[sources]]\nname = \"app\"\nlevel = \"error\"\n").unwrap();

        let update = tokio::time::timeout(Duration::from_secs(10), async {
            loop {
                match stream.next_config().await {
                    Some(config) if !config.sources.is_empty() => return Some(config),
                    Some(_) => continue,
                    None => return None,
                }
            }
        })
        .await
        .expect("no reload within timeout")
        .expect("watch closed");

        assert_eq!(update.sources[0].level, Some(SourceLevel::Error));

        // Cleanup
        std::fs::remove_file(&path).unwrap_or_default();
    }
}
