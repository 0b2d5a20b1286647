use crossterm::style::Color;

use adbscope_types::LineStyle;

/// Color theme for log lines
pub struct Theme;

impl Theme {
    // Line colors
    pub const ERROR: Color = Color::Red;
    pub const TRUE: Color = Color::Green;
    pub const FALSE: Color = Color::Yellow;

    /// Foreground color for a style, `None` keeps the terminal default
    pub fn color(style: LineStyle) -> Option<Color> {
        match style {
            LineStyle::Red => Some(Self::ERROR),
            LineStyle::Green => Some(Self::TRUE),
            LineStyle::Yellow => Some(Self::FALSE),
            LineStyle::Default => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_colors() {
        assert_eq!(Theme::color(LineStyle::Red), Some(Color::Red));
        assert_eq!(Theme::color(LineStyle::Green), Some(Color::Green));
        assert_eq!(Theme::color(LineStyle::Yellow), Some(Color::Yellow));
        assert_eq!(Theme::color(LineStyle::Default), None);
    }
}
