use regex::Regex;
use serde::{Deserialize, Serialize};

/// How the filter pattern is interpreted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Plain substring
    #[default]
    Literal,
    /// Regular expression
    Regex,
}

/// Compiled line filter
#[derive(Clone)]
pub struct LineFilter {
    /// Regex used when the plain substring check is not enough
    regex: Option<Regex>,

    /// Original pattern string
    pattern: String,

    /// How the pattern is interpreted
    mode: MatchMode,

    /// Case sensitivity
    case_insensitive: bool,
}

impl LineFilter {
    /// Case-sensitive substring filter
    pub fn literal(pattern: &str) -> Self {
        Self {
            regex: None,
            pattern: pattern.to_string(),
            mode: MatchMode::Literal,
            case_insensitive: false,
        }
    }

    /// Case-sensitive regex filter
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Self::new(pattern, MatchMode::Regex, false)
    }

    /// Create a filter from its parts
    pub fn new(
        pattern: &str,
        mode: MatchMode,
        case_insensitive: bool,
    ) -> Result<Self, regex::Error> {
        let source = match mode {
            MatchMode::Literal => regex::escape(pattern),
            MatchMode::Regex => pattern.to_string(),
        };

        let regex = match (mode, case_insensitive) {
            (MatchMode::Literal, false) => None,
            // Prepend (?i) for case insensitive matching
            (_, true) => Some(Regex::new(&format!("(?i){}", source))?),
            (MatchMode::Regex, false) => Some(Regex::new(&source)?),
        };

        Ok(Self {
            regex,
            pattern: pattern.to_string(),
            mode,
            case_insensitive,
        })
    }

    /// Make this filter case insensitive
    pub fn case_insensitive(self) -> Result<Self, regex::Error> {
        Self::new(&self.pattern, self.mode, true)
    }

    /// Check if a line passes this filter
    pub fn matches(&self, line: &str) -> bool {
        match &self.regex {
            Some(re) => re.is_match(line),
            None => line.contains(&self.pattern),
        }
    }
}

impl std::fmt::Debug for LineFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineFilter")
            .field("pattern", &self.pattern)
            .field("mode", &self.mode)
            .field("case_insensitive", &self.case_insensitive)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_filter_is_case_sensitive() {
        let filter = LineFilter::literal("location");
        assert!(filter.matches("I/GnssHal: location fix"));
        assert!(!filter.matches("D/LocationManager: lastKnownLocation=true"));
    }

    #[test]
    fn test_literal_filter_ignores_regex_syntax() {
        let filter = LineFilter::literal("a.b");
        assert!(filter.matches("x a.b y"));
        assert!(!filter.matches("x axb y"));
    }

    #[test]
    fn test_case_insensitive_literal() {
        let filter = LineFilter::literal("gps").case_insensitive().unwrap();
        assert!(filter.matches("E/GpsLocationProvider: fix failed"));
    }

    #[test]
    fn test_regex_filter() {
        let filter = LineFilter::regex(r"loc\w+=").unwrap();
        assert!(filter.matches("lastlocation=1"));
        assert!(!filter.matches("location"));
        assert!(LineFilter::regex("(").is_err());
    }
}
