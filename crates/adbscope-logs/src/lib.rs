//! Log processing for adbscope
//!
//! This crate provides line filtering, style classification, the
//! temporary filter program and logcat streaming.

mod classify;
mod filter;
mod program;
mod stream;

pub use classify::{LineClassifier, StyleRule};
pub use filter::{LineFilter, MatchMode};
pub use program::{FilterProgram, ProgramError, ProgramFile};
pub use stream::LogcatStream;

// Re-export types used in our public API
pub use adbscope_types::{LineStyle, StyledLine};
