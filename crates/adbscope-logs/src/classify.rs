use serde::{Deserialize, Serialize};

use adbscope_types::{ERROR_MARKER, LineStyle, StyledLine};

use crate::LineFilter;

/// A token and the style of lines containing it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRule {
    pub token: String,
    pub style: LineStyle,
}

impl StyleRule {
    pub fn new(token: impl Into<String>, style: LineStyle) -> Self {
        Self {
            token: token.into(),
            style,
        }
    }

    /// Rules in precedence order: error marker, "true", "false"
    pub fn defaults() -> Vec<StyleRule> {
        vec![
            StyleRule::new(ERROR_MARKER, LineStyle::Red),
            StyleRule::new("true", LineStyle::Green),
            StyleRule::new("false", LineStyle::Yellow),
        ]
    }
}

/// Decides whether a line is shown and in which style.
///
/// Holds no per-line state, so classifying the same sequence twice
/// yields the same result.
#[derive(Clone, Debug)]
pub struct LineClassifier {
    filter: LineFilter,
    rules: Vec<StyleRule>,
}

impl LineClassifier {
    /// Classifier with the default rules
    pub fn new(filter: LineFilter) -> Self {
        Self::with_rules(filter, StyleRule::defaults())
    }

    /// Classifier with custom rules, first match wins
    pub fn with_rules(filter: LineFilter, rules: Vec<StyleRule>) -> Self {
        Self { filter, rules }
    }

    /// Style for a line, or `None` if the filter hides it
    pub fn classify(&self, line: &str) -> Option<LineStyle> {
        if !self.filter.matches(line) {
            return None;
        }

        let style = self
            .rules
            .iter()
            .find(|rule| line.contains(rule.token.as_str()))
            .map(|rule| rule.style)
            .unwrap_or_default();

        Some(style)
    }

    /// Pair a line with its style if it is shown
    pub fn style(&self, line: &str) -> Option<StyledLine> {
        self.classify(line).map(|style| StyledLine::new(line, style))
    }

    /// Lazily classify a sequence of lines, dropping hidden ones
    pub fn styled<'a, I, S>(&'a self, lines: I) -> impl Iterator<Item = StyledLine> + 'a
    where
        I: IntoIterator<Item = S> + 'a,
        I::IntoIter: 'a,
        S: AsRef<str> + 'a,
    {
        lines
            .into_iter()
            .filter_map(move |line| self.style(line.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(filter: &str) -> LineClassifier {
        LineClassifier::new(LineFilter::literal(filter))
    }

    #[test]
    fn test_lines_without_filter_are_hidden() {
        let c = classifier("location");
        assert_eq!(c.classify("I/ActivityManager: Start proc 1234"), None);
        assert_eq!(c.classify(" E location true false"), Some(LineStyle::Red));
    }

    #[test]
    fn test_error_marker_wins() {
        let c = classifier("location");
        let line = "10-16 12:00:00.000  1000  1000 E GnssLocationProvider: location lost, ok=true";
        assert_eq!(c.classify(line), Some(LineStyle::Red));
    }

    #[test]
    fn test_true_beats_false() {
        let c = classifier("location");
        assert_eq!(
            c.classify("location enabled=true fallback=false"),
            Some(LineStyle::Green)
        );
    }

    #[test]
    fn test_false_is_yellow() {
        let c = classifier("location");
        assert_eq!(c.classify("location enabled=false"), Some(LineStyle::Yellow));
    }

    #[test]
    fn test_plain_match_is_default_and_unmodified() {
        let c = classifier("location");
        let line = "D/Fused: location request accepted";
        let styled = c.style(line).unwrap();
        assert_eq!(styled.style, LineStyle::Default);
        assert_eq!(styled.text, line);
    }

    #[test]
    fn test_error_marker_needs_surrounding_spaces() {
        let c = classifier("location");
        assert_eq!(c.classify("E/location: boom"), Some(LineStyle::Default));
    }

    #[test]
    fn test_case_sensitive_examples() {
        assert_eq!(
            classifier("location").classify("D/LocationManager: lastKnownLocation=true"),
            None
        );
        assert_eq!(
            classifier("gps").classify("E/GpsLocationProvider: fix failed"),
            None
        );

        let insensitive =
            LineClassifier::new(LineFilter::literal("location").case_insensitive().unwrap());
        assert_eq!(
            insensitive.classify("D/LocationManager: lastKnownLocation=true"),
            Some(LineStyle::Green)
        );
    }

    #[test]
    fn test_styled_is_idempotent() {
        let c = classifier("location");
        let lines = [
            "location a",
            "nothing here",
            "location true",
            " E location",
            "location false",
        ];

        let first: Vec<_> = c.styled(lines).collect();
        let second: Vec<_> = c.styled(lines).collect();

        assert_eq!(first, second);
        let styles: Vec<_> = first.iter().map(|l| l.style).collect();
        assert_eq!(
            styles,
            [
                LineStyle::Default,
                LineStyle::Green,
                LineStyle::Red,
                LineStyle::Yellow
            ]
        );
    }
}
