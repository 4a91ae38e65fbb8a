//! Composite trace sources.
//!
//! A composite holds one channel per namespace level of its identity, root
//! first. Every emission fans out to all of them in that order, so a listener
//! on `A` sees events from `A.B.C.Component` before a listener on `A.B` does.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::observability::metrics;
use crate::registry::channel::Channel;
use crate::registry::identity::SourceIdentity;
use crate::registry::level::EventType;
use crate::registry::record::{TracePayload, TraceRecord};

/// Per-identity aggregate of channels, root to leaf.
#[derive(Debug)]
pub struct CompositeSource {
    identity: SourceIdentity,
    channels: Vec<Arc<Channel>>,
    enabled: bool,
}

impl CompositeSource {
    pub(crate) fn new(identity: SourceIdentity, channels: Vec<Arc<Channel>>, enabled: bool) -> Self {
        Self {
            identity,
            channels,
            enabled,
        }
    }

    pub fn identity(&self) -> &SourceIdentity {
        &self.identity
    }

    /// Underlying channels, root to leaf.
    pub fn channels(&self) -> &[Arc<Channel>] {
        &self.channels
    }

    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.name()).collect()
    }

    /// False when tracing is compiled out or disabled for the registry.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        crate::TRACE_ENABLED && self.enabled
    }

    fn fan_out(&self, record: TraceRecord) {
        metrics::record_event_emitted(record.event_type.as_str());
        for channel in &self.channels {
            channel.emit_record(&record);
        }
    }

    fn emit(&self, event_type: EventType, id: i32, payload: TracePayload) {
        if !self.is_enabled() {
            return;
        }
        self.fan_out(TraceRecord::new("", event_type, id, payload));
    }

    pub fn trace_event(&self, event_type: EventType, id: i32) {
        self.emit(event_type, id, TracePayload::Empty);
    }

    pub fn trace_event_message(&self, event_type: EventType, id: i32, message: &str) {
        self.emit(event_type, id, TracePayload::Message(message.to_string()));
    }

    /// Format variant. Arguments are only rendered when tracing is enabled.
    pub fn trace_event_args(&self, event_type: EventType, id: i32, args: fmt::Arguments<'_>) {
        if !self.is_enabled() {
            return;
        }
        self.emit(event_type, id, TracePayload::Message(fmt::format(args)));
    }

    pub fn trace_data(&self, event_type: EventType, id: i32, data: serde_json::Value) {
        self.emit(event_type, id, TracePayload::Data(vec![data]));
    }

    pub fn trace_data_many(&self, event_type: EventType, id: i32, data: &[serde_json::Value]) {
        if !self.is_enabled() {
            return;
        }
        self.emit(event_type, id, TracePayload::Data(data.to_vec()));
    }

    pub fn trace_information(&self, message: &str) {
        self.trace_event_message(EventType::Information, 0, message);
    }

    pub fn trace_information_args(&self, args: fmt::Arguments<'_>) {
        self.trace_event_args(EventType::Information, 0, args);
    }

    pub fn trace_warning(&self, message: &str) {
        self.trace_event_message(EventType::Warning, 0, message);
    }

    pub fn trace_warning_args(&self, args: fmt::Arguments<'_>) {
        self.trace_event_args(EventType::Warning, 0, args);
    }

    /// Emits `message`, a newline and the error with its source chain, as an error event.
    pub fn trace_error(&self, error: &(dyn Error + 'static), message: &str) {
        if !self.is_enabled() {
            return;
        }
        let text = format!("{}\n{}", message, error_text(error));
        self.emit(EventType::Error, 0, TracePayload::Message(text));
    }

    pub fn trace_error_args(&self, error: &(dyn Error + 'static), args: fmt::Arguments<'_>) {
        if !self.is_enabled() {
            return;
        }
        let text = format!("{}\n{}", args, error_text(error));
        self.emit(EventType::Error, 0, TracePayload::Message(text));
    }

    pub fn trace_transfer(&self, id: i32, message: &str, related_activity: Uuid) {
        if !self.is_enabled() {
            return;
        }
        let record = TraceRecord::new(
            "",
            EventType::Transfer,
            id,
            TracePayload::Message(message.to_string()),
        )
        .with_related_activity(related_activity);
        self.fan_out(record);
    }

    pub fn flush(&self) {
        if !self.is_enabled() {
            return;
        }
        for channel in &self.channels {
            channel.flush();
        }
    }
}

/// `Display` of the error followed by every `source()` as `caused by: ...`.
pub fn error_text(error: &(dyn Error + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str("\ncaused by: ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
