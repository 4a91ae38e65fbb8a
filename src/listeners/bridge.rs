//! Bridge from trace records to the `tracing` subscriber.

use crate::listeners::TraceListener;
use crate::registry::level::EventType;
use crate::registry::record::TraceRecord;

/// Re-emits records as `tracing` events.
///
/// Critical and error map to `ERROR`, warning to `WARN`, information to
/// `INFO`, verbose to `DEBUG` and activity events to `TRACE`.
#[derive(Debug, Clone)]
pub struct TracingListener {
    name: String,
}

impl TracingListener {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Default for TracingListener {
    fn default() -> Self {
        Self::new("tracing")
    }
}

impl TraceListener for TracingListener {
    fn name(&self) -> &str {
        &self.name
    }

    fn trace(&self, record: &TraceRecord) {
        let message = record.message();
        let channel = record.source.as_str();
        let event_id = record.id;
        match record.event_type {
            EventType::Critical | EventType::Error => {
                tracing::error!(
                    channel,
                    event_id,
                    event_type = %record.event_type,
                    activity = ?record.activity_id,
                    "{}",
                    message
                )
            }
            EventType::Warning => tracing::warn!(channel, event_id, "{}", message),
            EventType::Information => tracing::info!(channel, event_id, "{}", message),
            EventType::Verbose => tracing::debug!(channel, event_id, "{}", message),
            _ => tracing::trace!(
                channel,
                event_id,
                event_type = %record.event_type,
                activity = ?record.activity_id,
                related_activity = ?record.related_activity,
                "{}",
                message
            ),
        }
    }
}
