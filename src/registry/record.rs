//! Trace records delivered to listeners.

use crate::registry::activity::current_activity;
use crate::registry::level::EventType;
use serde::Serialize;
use std::fmt;
use std::time::SystemTime;
use uuid::Uuid;

/// Payload carried by a trace record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum TracePayload {
    /// `trace_event(type, id)` with no message.
    Empty,
    /// Plain or already formatted message.
    Message(String),
    /// Structured data (`trace_data`).
    Data(Vec<serde_json::Value>),
}

impl fmt::Display for TracePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TracePayload::Empty => Ok(()),
            TracePayload::Message(m) => f.write_str(m),
            TracePayload::Data(values) => {
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                Ok(())
            }
        }
    }
}

/// A single event as seen by one channel's listeners.
#[derive(Debug, Clone, Serialize)]
pub struct TraceRecord {
    /// Name of the channel that delivered the event.
    pub source: String,
    pub event_type: EventType,
    pub id: i32,
    pub payload: TracePayload,
    /// Activity current on the emitting thread.
    pub activity_id: Option<Uuid>,
    /// Set for transfers.
    pub related_activity: Option<Uuid>,
    pub timestamp: SystemTime,
    /// Emitting thread (name if set, otherwise its id).
    pub thread: String,
}

impl TraceRecord {
    pub fn new(source: &str, event_type: EventType, id: i32, payload: TracePayload) -> Self {
        let current = std::thread::current();
        let thread = match current.name() {
            Some(name) => name.to_string(),
            None => format!("{:?}", current.id()),
        };

        Self {
            source: source.to_string(),
            event_type,
            id,
            payload,
            activity_id: current_activity(),
            related_activity: None,
            timestamp: SystemTime::now(),
            thread,
        }
    }

    pub fn with_related_activity(mut self, activity: Uuid) -> Self {
        self.related_activity = Some(activity);
        self
    }

    /// Message text, or the rendered data for structured payloads.
    pub fn message(&self) -> String {
        self.payload.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::activity::ActivityScope;

    #[test]
    fn test_record_captures_current_activity() {
        let outside = TraceRecord::new("A", EventType::Information, 0, TracePayload::Empty);
        assert_eq!(outside.activity_id, None);

        let scope = ActivityScope::start();
        let inside = TraceRecord::new("A", EventType::Information, 0, TracePayload::Empty);
        assert_eq!(inside.activity_id, Some(scope.id()));
    }
}
