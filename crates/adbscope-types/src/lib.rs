//! Shared types for adbscope
//!
//! This crate contains data structures used across multiple adbscope crates.

use serde::{Deserialize, Serialize};

// ============================================================================
// Defaults
// ============================================================================

/// Filter used when none is given on the command line
pub const DEFAULT_FILTER: &str = "location";

/// Loopback device the bridge connects to
pub const DEFAULT_TARGET: &str = "localhost";

/// adb executable looked up on PATH
pub const DEFAULT_ADB: &str = "adb";

/// Severity marker of an error-level logcat line
pub const ERROR_MARKER: &str = " E ";

// ============================================================================
// Log Types
// ============================================================================

/// Display style of a log line that passed the filter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Red,
    Green,
    Yellow,
    #[default]
    Default,
}

/// A log line paired with the style it is displayed in
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledLine {
    /// Original line, without the trailing newline
    pub text: String,

    /// Chosen style
    pub style: LineStyle,
}

impl StyledLine {
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        assert_eq!(LineStyle::default(), LineStyle::Default);
    }

    #[test]
    fn test_style_serializes_lowercase() {
        let rule: std::collections::HashMap<String, LineStyle> =
            toml::from_str("style = \"yellow\"").unwrap();
        assert_eq!(rule["style"], LineStyle::Yellow);
    }
}
