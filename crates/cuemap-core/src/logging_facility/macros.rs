//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use cuemap_core::log_op_start;
/// log_op_start!("analyze_structure");
/// log_op_start!("analyze_structure", container_count = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {{
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    }};
    ($op:expr, $($field:tt)*) => {{
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    }};
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use cuemap_core::log_op_end;
/// log_op_end!("analyze_structure", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {{
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    }};
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    }};
}

/// Log an operation error
///
/// # Example
///
/// ```
/// # use cuemap_core::log_op_error;
/// # use cuemap_core::errors::{CueError, CueErrorKind};
/// let err = CueError::new(CueErrorKind::NotFound);
/// log_op_error!("read_container_map", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let cue_err: $crate::errors::CueError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?cue_err.kind(),
            err_code = cue_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let cue_err: $crate::errors::CueError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?cue_err.kind(),
            err_code = cue_err.code(),
            $($field)*
        );
    }};
}
