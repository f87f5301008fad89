//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Domain identifiers
pub const FIELD_CONTAINER: &str = "container";
pub const FIELD_CUE_NAME: &str = "cue_name";
pub const FIELD_PATH: &str = "path";

// Collection sizes
pub const FIELD_CONTAINER_COUNT: &str = "container_count";
pub const FIELD_EVENT_COUNT: &str = "event_count";
pub const FIELD_ENTRY_COUNT: &str = "entry_count";
pub const FIELD_DIAGNOSTIC_COUNT: &str = "diagnostic_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
