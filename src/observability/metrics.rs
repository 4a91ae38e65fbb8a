//! Tracer metrics.
//!
//! # Metrics
//! - `tracer_channels_created_total` (counter)
//! - `tracer_sources_created_total` (counter)
//! - `tracer_events_emitted_total` (counter): by `event_type`, counted once per composite emission

use metrics::counter;

pub fn record_channel_created() {
    counter!("tracer_channels_created_total").increment(1);
}

pub fn record_source_created() {
    counter!("tracer_sources_created_total").increment(1);
}

pub fn record_event_emitted(event_type: &'static str) {
    counter!("tracer_events_emitted_total", "event_type" => event_type).increment(1);
}
