//! User interface module - console reporting.

pub mod formatter;

pub use formatter::{
    display_components, display_error, display_outcome, display_status, display_success,
};
