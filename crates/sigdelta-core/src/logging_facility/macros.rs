//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use sigdelta_core::log_op_start;
/// log_op_start!("resolve");
/// log_op_start!("resolve", target_version = "8.3");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::sigdelta_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::sigdelta_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use sigdelta_core::log_op_end;
/// log_op_end!("resolve", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::sigdelta_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::sigdelta_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into `ExError` (including `SigDeltaError`).
///
/// # Example
///
/// ```
/// # use sigdelta_core::{log_op_error, errors::SigDeltaError};
/// # use sigdelta_core::Version;
/// let err = SigDeltaError::UnknownVersion { version: Version::new(7, 4) };
/// log_op_error!("resolve", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::sigdelta_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::sigdelta_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            $($field)*
        );
    }};
}
