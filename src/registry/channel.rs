//! Named log channels.
//!
//! # Responsibilities
//! - Hold a threshold that can be changed at any time
//! - Hold the ordered list of attached listeners
//! - Deliver events that pass the threshold to every listener, in attachment order
//!
//! Channels are only constructed through a [`ChannelFactory`]; the registry
//! caches them by name so every composite sharing a name shares the instance.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::error::TraceResult;
use crate::listeners::SharedListener;
use crate::registry::level::{EventType, SourceLevel};
use crate::registry::record::{TracePayload, TraceRecord};

/// A named sink with its own threshold and listeners.
pub struct Channel {
    name: String,
    /// Current threshold, stored as `SourceLevel as u8`.
    level: AtomicU8,
    listeners: RwLock<Vec<SharedListener>>,
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl Channel {
    pub fn new(name: &str, level: SourceLevel) -> Self {
        Self {
            name: name.to_string(),
            level: AtomicU8::new(level as u8),
            listeners: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> SourceLevel {
        SourceLevel::from(self.level.load(Ordering::Acquire))
    }

    pub fn set_level(&self, level: SourceLevel) {
        self.level.store(level as u8, Ordering::Release);
    }

    pub fn should_trace(&self, event_type: EventType) -> bool {
        self.level().allows(event_type)
    }

    /// Attach a listener. There is no way to detach it again.
    pub fn add_listener(&self, listener: SharedListener) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Snapshot of the attached listeners, in attachment order.
    pub fn listeners(&self) -> Vec<SharedListener> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Emit an event through this channel.
    pub fn emit(&self, event_type: EventType, id: i32, payload: TracePayload) {
        let record = TraceRecord::new(&self.name, event_type, id, payload);
        self.deliver(record);
    }

    /// Emit a prepared record; its `source` is replaced with this channel's name.
    pub fn emit_record(&self, template: &TraceRecord) {
        if !self.should_trace(template.event_type) {
            return;
        }
        let mut record = template.clone();
        record.source.clone_from(&self.name);
        self.deliver(record);
    }

    fn deliver(&self, record: TraceRecord) {
        if !self.should_trace(record.event_type) {
            return;
        }
        // Listeners run without the lock held so they may reconfigure the registry.
        for listener in self.listeners() {
            listener.trace(&record);
        }
    }

    pub fn flush(&self) {
        for listener in self.listeners() {
            listener.flush();
        }
    }
}

/// Constructs channels by name.
///
/// This is the seam for the underlying logging primitive. A failure here
/// propagates out of `TraceRegistry::get_source_for` and is not cached.
pub trait ChannelFactory: Send + Sync {
    fn create(&self, name: &str, level: SourceLevel) -> TraceResult<Channel>;
}

/// Factory producing plain in-process channels. Never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultChannelFactory;

impl ChannelFactory for DefaultChannelFactory {
    fn create(&self, name: &str, level: SourceLevel) -> TraceResult<Channel> {
        Ok(Channel::new(name, level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::MemoryListener;
    use std::sync::Arc;

    #[test]
    fn test_threshold_filters_events() {
        let channel = Channel::new("A", SourceLevel::Warning);
        let memory = Arc::new(MemoryListener::new("mem"));
        channel.add_listener(memory.clone());

        channel.emit(EventType::Information, 1, TracePayload::Message("dropped".into()));
        channel.emit(EventType::Error, 2, TracePayload::Message("kept".into()));
        assert_eq!(memory.len(), 1);
        assert_eq!(memory.records()[0].id, 2);
        assert_eq!(memory.records()[0].source, "A");

        channel.set_level(SourceLevel::Verbose);
        channel.emit(EventType::Information, 3, TracePayload::Empty);
        assert_eq!(memory.len(), 2);
    }

    #[test]
    fn test_listeners_fire_in_attachment_order() {
        let channel = Channel::new("A", SourceLevel::All);
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        for name in ["first", "second", "third"] {
            let order = order.clone();
            channel.add_listener(Arc::new(crate::listeners::FnListener::new(name, move |_| {
                order.lock().unwrap().push(name);
            })));
        }

        channel.emit(EventType::Verbose, 0, TracePayload::Empty);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_emit_record_rewrites_source() {
        let channel = Channel::new("A.B", SourceLevel::Information);
        let memory = Arc::new(MemoryListener::new("mem"));
        channel.add_listener(memory.clone());

        let template = TraceRecord::new("", EventType::Warning, 7, TracePayload::Message("m".into()));
        channel.emit_record(&template);
        assert_eq!(memory.records()[0].source, "A.B");
    }
}
