//! Error types for trace registry operations.

use thiserror::Error;

/// Errors that can occur while building or configuring trace sources.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The channel factory refused to construct a channel.
    #[error("Failed to create trace channel '{name}': {reason}")]
    ChannelCreation { name: String, reason: String },

    /// A listener definition cannot be built as written.
    #[error("Invalid listener '{name}': {reason}")]
    InvalidListener { name: String, reason: String },

    /// A listener could not open its output.
    #[error("Listener I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `install_global` was called after the process-wide registry was initialized.
    #[error("Global trace registry already initialized")]
    GlobalAlreadyInstalled,
}

/// Result type for trace registry operations.
pub type TraceResult<T> = Result<T, TraceError>;
