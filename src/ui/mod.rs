//! User interface module - terminal formatting for the CLI.

pub mod formatter;

pub use formatter::{
    display_error, display_status, display_success, display_variables, format_summary,
    format_variables,
};
