//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_ROUTINE: &str = "routine";
pub const FIELD_TRANSITION: &str = "transition";
pub const FIELD_TARGET_VERSION: &str = "target_version";
pub const FIELD_BASELINE_VERSION: &str = "baseline_version";

// Collection sizes
pub const FIELD_TABLE_LEN: &str = "table_len";
pub const FIELD_CHAIN_LEN: &str = "chain_len";
pub const FIELD_DELTA_LEN: &str = "delta_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
