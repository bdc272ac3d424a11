//! Shared helpers

pub mod display;
pub mod lists;

pub use display::{Color, ColorOutput, ReportFormatter};
pub use lists::chunk_when;
