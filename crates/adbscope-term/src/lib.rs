//! Terminal output for adbscope
//!
//! This crate maps line styles to terminal colors and writes styled
//! lines to stdout.

mod printer;
mod theme;

pub use printer::Printer;
pub use theme::Theme;
