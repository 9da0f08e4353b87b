//! Story point snapping and historical data cleaning.

mod cleaner;
mod fibonacci;

pub use cleaner::{
    ACTUAL_TIME_COLUMN, MISSING_TEXT, REQUIRED_COLUMNS, SchemaError, clean, load_history,
    load_history_bytes, try_parse_number,
};
pub use fibonacci::{REFERENCE_SEQUENCE, reference_sequence_label, snap_to_fibonacci};
