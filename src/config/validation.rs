//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (sources reference declared listeners)
//! - Detect duplicate listener names and incomplete listener definitions
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TracerConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use thiserror::Error;

use crate::config::schema::{ListenerKind, TracerConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener name must not be empty")]
    EmptyListenerName,

    #[error("listener '{0}' is declared more than once")]
    DuplicateListener(String),

    #[error("file listener '{0}' has no path")]
    MissingPath(String),

    #[error("source name must not be empty")]
    EmptySourceName,

    #[error("source '{source_name}' references unknown listener '{listener}'")]
    UnknownListener { source_name: String, listener: String },
}

/// Check `config` and report every problem found.
pub fn validate_config(config: &TracerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for listener in &config.listeners {
        if listener.name.trim().is_empty() {
            errors.push(ValidationError::EmptyListenerName);
        } else if !seen.insert(listener.name.as_str()) {
            errors.push(ValidationError::DuplicateListener(listener.name.clone()));
        }
        if listener.kind == ListenerKind::File && listener.path.is_none() {
            errors.push(ValidationError::MissingPath(listener.name.clone()));
        }
    }

    for source in &config.sources {
        if source.name.trim().is_empty() {
            errors.push(ValidationError::EmptySourceName);
        }
        for listener in &source.listeners {
            if !seen.contains(listener.as_str()) {
                errors.push(ValidationError::UnknownListener {
                    source_name: source.name.clone(),
                    listener: listener.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
