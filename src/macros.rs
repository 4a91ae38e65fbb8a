//! Emission macros.
//!
//! Unlike the `trace_*_args` methods these check [`TRACE_ENABLED`](crate::TRACE_ENABLED)
//! and the source's runtime switch before the format arguments are touched,
//! so expressions passed to them are not evaluated when tracing is off.

/// Emit a formatted event of the given type and id.
#[macro_export]
macro_rules! trace_event {
    ($source:expr, $event_type:expr, $id:expr, $($arg:tt)+) => {{
        let source = &$source;
        if $crate::TRACE_ENABLED && source.is_enabled() {
            source.trace_event_args($event_type, $id, ::std::format_args!($($arg)+));
        }
    }};
}

/// Emit a formatted information event.
#[macro_export]
macro_rules! trace_info {
    ($source:expr, $($arg:tt)+) => {{
        let source = &$source;
        if $crate::TRACE_ENABLED && source.is_enabled() {
            source.trace_information_args(::std::format_args!($($arg)+));
        }
    }};
}

/// Emit a formatted warning event.
#[macro_export]
macro_rules! trace_warn {
    ($source:expr, $($arg:tt)+) => {{
        let source = &$source;
        if $crate::TRACE_ENABLED && source.is_enabled() {
            source.trace_warning_args(::std::format_args!($($arg)+));
        }
    }};
}

/// Emit a formatted error event followed by the error chain.
#[macro_export]
macro_rules! trace_error {
    ($source:expr, $error:expr, $($arg:tt)+) => {{
        let source = &$source;
        if $crate::TRACE_ENABLED && source.is_enabled() {
            source.trace_error_args(&$error, ::std::format_args!($($arg)+));
        }
    }};
}

/// Emit a structured data event. The value expression is skipped when tracing is off.
#[macro_export]
macro_rules! trace_data {
    ($source:expr, $event_type:expr, $id:expr, $data:expr $(,)?) => {{
        let source = &$source;
        if $crate::TRACE_ENABLED && source.is_enabled() {
            source.trace_data($event_type, $id, $data);
        }
    }};
}

/// Emit a transfer to `related` (a `Uuid`) with a formatted message.
#[macro_export]
macro_rules! trace_transfer {
    ($source:expr, $id:expr, $related:expr, $($arg:tt)+) => {{
        let source = &$source;
        if $crate::TRACE_ENABLED && source.is_enabled() {
            source.trace_transfer($id, &::std::format!($($arg)+), $related);
        }
    }};
}

/// Composite source of the calling module, from the process-wide registry.
#[macro_export]
macro_rules! module_source {
    () => {
        $crate::global().get_source_for(&$crate::SourceIdentity::from_module(::std::module_path!()))
    };
}
