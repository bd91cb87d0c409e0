pub mod diff;
pub mod resolve;
pub mod validate;

use std::time::Instant;

use serde::Serialize;
use sigdelta_core::errors::{ExError, ExErrorKind};

/// Print a value as pretty JSON on stdout
fn print_json<T: Serialize>(operation: &str, value: &T) -> Result<(), ExError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op(operation)
            .with_message(e.to_string())
    })?;
    println!("{}", json);
    Ok(())
}

/// Error for a setting given neither as a flag nor in the config file
fn missing_setting(operation: &str, flag: &str, key: &str) -> ExError {
    ExError::new(ExErrorKind::Config)
        .with_op(operation)
        .with_message(format!(
            "{} is not set (pass {} or set {} in sigdelta.toml)",
            key, flag, key
        ))
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
