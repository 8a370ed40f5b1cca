//! Utility functions for formatting and media link parsing.

pub mod format;
pub mod youtube;

pub use format::{age_display, format_timestamp, truncate_string};
pub use youtube::extract_youtube_id;
