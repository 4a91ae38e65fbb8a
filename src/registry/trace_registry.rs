//! The trace source registry.
//!
//! # Responsibilities
//! - Cache one composite per identity and one channel per name
//! - Apply pending levels and listeners to channels as they are created
//! - Push level and listener changes onto channels that already exist
//!
//! # Locking
//! Composite and channel caches are `DashMap`s: `get` is the hit path,
//! `entry` (composites) or the pending mutex (channels) is the exclusive
//! re-check before creating. Lock order is always
//! composite shard → pending → channel shard.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::TraceResult;
use crate::listeners::SharedListener;
use crate::observability::metrics;
use crate::registry::channel::{Channel, ChannelFactory, DefaultChannelFactory};
use crate::registry::composite::CompositeSource;
use crate::registry::identity::SourceIdentity;
use crate::registry::level::SourceLevel;

/// Settings fixed at registry construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrySettings {
    /// Runtime tracing switch. When false every composite is a no-op.
    pub enabled: bool,
    /// Threshold of channels that have no pending level.
    pub default_level: SourceLevel,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            default_level: SourceLevel::Information,
        }
    }
}

/// Configuration recorded by name, applied when a channel of that name is created.
#[derive(Default)]
struct PendingConfig {
    listeners: HashMap<String, Vec<SharedListener>>,
    levels: HashMap<String, SourceLevel>,
}

/// Cache of composite trace sources with retroactive configuration.
pub struct TraceRegistry {
    settings: RegistrySettings,
    factory: Box<dyn ChannelFactory>,
    sources: DashMap<SourceIdentity, Arc<CompositeSource>>,
    channels: DashMap<String, Arc<Channel>>,
    pending: Mutex<PendingConfig>,
}

impl std::fmt::Debug for TraceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceRegistry")
            .field("settings", &self.settings)
            .field("sources", &self.sources.len())
            .field("channels", &self.channels.len())
            .finish()
    }
}

impl Default for TraceRegistry {
    fn default() -> Self {
        Self::new(RegistrySettings::default())
    }
}

impl TraceRegistry {
    pub fn new(settings: RegistrySettings) -> Self {
        Self::with_factory(settings, DefaultChannelFactory)
    }

    /// Registry whose channels are built by `factory`.
    pub fn with_factory<F>(settings: RegistrySettings, factory: F) -> Self
    where
        F: ChannelFactory + 'static,
    {
        Self {
            settings,
            factory: Box::new(factory),
            sources: DashMap::new(),
            channels: DashMap::new(),
            pending: Mutex::new(PendingConfig::default()),
        }
    }

    pub fn settings(&self) -> RegistrySettings {
        self.settings
    }

    pub fn is_enabled(&self) -> bool {
        crate::TRACE_ENABLED && self.settings.enabled
    }

    /// Get the composite for `identity`, creating it and its channels on first use.
    ///
    /// Repeated calls return the same `Arc`. If the channel factory fails the
    /// error is returned and nothing is cached, so a later call retries.
    pub fn get_source_for(&self, identity: &SourceIdentity) -> TraceResult<Arc<CompositeSource>> {
        if let Some(existing) = self.sources.get(identity) {
            return Ok(Arc::clone(existing.value()));
        }

        match self.sources.entry(identity.clone()) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(slot) => {
                let mut channels = Vec::with_capacity(identity.segments().len());
                for name in identity.cumulative_names() {
                    channels.push(self.channel_or_create(&name)?);
                }

                let source = Arc::new(CompositeSource::new(
                    identity.clone(),
                    channels,
                    self.settings.enabled,
                ));
                slot.insert(Arc::clone(&source));

                metrics::record_source_created();
                tracing::debug!(identity = %identity, channels = source.channels().len(), "Created trace source");
                Ok(source)
            }
        }
    }

    /// Composite for type `T`.
    pub fn source_for<T: ?Sized>(&self) -> TraceResult<Arc<CompositeSource>> {
        self.get_source_for(&SourceIdentity::of::<T>())
    }

    /// Composite for a qualifying name such as `A.B.Component`.
    pub fn source_named(&self, qualifying_name: &str) -> TraceResult<Arc<CompositeSource>> {
        self.get_source_for(&SourceIdentity::new(qualifying_name))
    }

    /// Attach `listener` to the channel named exactly `channel_name`, now and
    /// for a channel created later under that name.
    ///
    /// Channels whose names merely start with `channel_name` are not affected.
    pub fn add_listener(&self, channel_name: &str, listener: SharedListener) {
        let mut pending = self.lock_pending();
        if let Some(channel) = self.channels.get(channel_name) {
            channel.add_listener(Arc::clone(&listener));
        }
        tracing::info!(channel = %channel_name, listener = %listener.name(), "Trace listener added");
        pending
            .listeners
            .entry(channel_name.to_string())
            .or_default()
            .push(listener);
    }

    /// Set the threshold of the channel named `channel_name`, now and for a
    /// channel created later under that name.
    pub fn set_logging_level(&self, channel_name: &str, level: SourceLevel) {
        let mut pending = self.lock_pending();
        if let Some(channel) = self.channels.get(channel_name) {
            channel.set_level(level);
        }
        tracing::info!(channel = %channel_name, level = %level, "Trace level changed");
        pending.levels.insert(channel_name.to_string(), level);
    }

    /// The cached channel named `name`, if one was created.
    pub fn channel(&self, name: &str) -> Option<Arc<Channel>> {
        self.channels.get(name).map(|c| Arc::clone(c.value()))
    }

    /// Names of every created channel, sorted.
    pub fn channel_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.channels.iter().map(|c| c.key().clone()).collect();
        names.sort();
        names
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Level recorded for `name` by `set_logging_level`, if any.
    pub fn configured_level(&self, name: &str) -> Option<SourceLevel> {
        self.lock_pending().levels.get(name).copied()
    }

    /// Flush the listeners of every created channel.
    pub fn flush_all(&self) {
        let channels: Vec<Arc<Channel>> = self.channels.iter().map(|c| Arc::clone(c.value())).collect();
        for channel in channels {
            channel.flush();
        }
    }

    fn channel_or_create(&self, name: &str) -> TraceResult<Arc<Channel>> {
        if let Some(existing) = self.channels.get(name) {
            return Ok(Arc::clone(existing.value()));
        }

        let pending = self.lock_pending();
        if let Some(existing) = self.channels.get(name) {
            return Ok(Arc::clone(existing.value()));
        }

        let level = pending
            .levels
            .get(name)
            .copied()
            .unwrap_or(self.settings.default_level);
        let channel = Arc::new(self.factory.create(name, level)?);
        if let Some(listeners) = pending.listeners.get(name) {
            for listener in listeners {
                channel.add_listener(Arc::clone(listener));
            }
        }
        self.channels.insert(name.to_string(), Arc::clone(&channel));
        drop(pending);

        metrics::record_channel_created();
        tracing::debug!(channel = %name, level = %level, listeners = channel.listener_count(), "Created trace channel");
        Ok(channel)
    }

    // Guarded state is append-only, so a poisoned lock is still consistent.
    fn lock_pending(&self) -> MutexGuard<'_, PendingConfig> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
