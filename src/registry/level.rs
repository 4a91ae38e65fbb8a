//! Severity thresholds and event types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Threshold of a channel.
///
/// Ordered from most restrictive to most permissive. Severity events pass when
/// the threshold is at least as permissive as the event; activity events
/// (start, stop, transfer, ...) only pass at [`SourceLevel::All`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLevel {
    Off = 0,
    Critical = 1,
    Error = 2,
    Warning = 3,
    Information = 4,
    Verbose = 5,
    All = 6,
}

impl Default for SourceLevel {
    fn default() -> Self {
        SourceLevel::Information
    }
}

impl From<u8> for SourceLevel {
    fn from(val: u8) -> Self {
        match val {
            0 => SourceLevel::Off,
            1 => SourceLevel::Critical,
            2 => SourceLevel::Error,
            3 => SourceLevel::Warning,
            4 => SourceLevel::Information,
            5 => SourceLevel::Verbose,
            _ => SourceLevel::All,
        }
    }
}

impl SourceLevel {
    /// Whether an event of the given type passes this threshold.
    pub fn allows(self, event_type: EventType) -> bool {
        match event_type.severity() {
            Some(required) => self >= required,
            None => self == SourceLevel::All,
        }
    }
}

impl fmt::Display for SourceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceLevel::Off => "off",
            SourceLevel::Critical => "critical",
            SourceLevel::Error => "error",
            SourceLevel::Warning => "warning",
            SourceLevel::Information => "information",
            SourceLevel::Verbose => "verbose",
            SourceLevel::All => "all",
        };
        f.write_str(s)
    }
}

impl FromStr for SourceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(SourceLevel::Off),
            "critical" => Ok(SourceLevel::Critical),
            "error" => Ok(SourceLevel::Error),
            "warning" | "warn" => Ok(SourceLevel::Warning),
            "information" | "info" => Ok(SourceLevel::Information),
            "verbose" | "debug" => Ok(SourceLevel::Verbose),
            "all" => Ok(SourceLevel::All),
            other => Err(format!("unknown source level '{}'", other)),
        }
    }
}

/// Kind of a traced event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Critical,
    Error,
    Warning,
    Information,
    Verbose,
    Start,
    Stop,
    Suspend,
    Resume,
    Transfer,
}

impl EventType {
    /// Minimum threshold for severity events; `None` for activity events.
    pub fn severity(self) -> Option<SourceLevel> {
        match self {
            EventType::Critical => Some(SourceLevel::Critical),
            EventType::Error => Some(SourceLevel::Error),
            EventType::Warning => Some(SourceLevel::Warning),
            EventType::Information => Some(SourceLevel::Information),
            EventType::Verbose => Some(SourceLevel::Verbose),
            EventType::Start
            | EventType::Stop
            | EventType::Suspend
            | EventType::Resume
            | EventType::Transfer => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Critical => "critical",
            EventType::Error => "error",
            EventType::Warning => "warning",
            EventType::Information => "information",
            EventType::Verbose => "verbose",
            EventType::Start => "start",
            EventType::Stop => "stop",
            EventType::Suspend => "suspend",
            EventType::Resume => "resume",
            EventType::Transfer => "transfer",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "critical" => Ok(EventType::Critical),
            "error" => Ok(EventType::Error),
            "warning" | "warn" => Ok(EventType::Warning),
            "information" | "info" => Ok(EventType::Information),
            "verbose" | "debug" => Ok(EventType::Verbose),
            "start" => Ok(EventType::Start),
            "stop" => Ok(EventType::Stop),
            "suspend" => Ok(EventType::Suspend),
            "resume" => Ok(EventType::Resume),
            "transfer" => Ok(EventType::Transfer),
            other => Err(format!("unknown event type '{}'", other)),
        }
    }
}
