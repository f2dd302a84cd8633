//! Message-based kind detection.
//!
//! Failures raised without a transport status can still say what went wrong
//! in their message ("service is under maintenance", "request timed out").
//! The detector scans such messages with an ordered list of regex patterns.
//! It is opt-in: the default classifier leaves status-less failures as
//! `unknown`.

use regex::Regex;

use super::ErrorKind;

/// Default patterns in priority order: (pattern, kind, description).
const DEFAULT_PATTERNS: &[(&str, ErrorKind, &str)] = &[
    (
        r"(?i)\b(under\s+)?maintenance\b",
        ErrorKind::Maintenance,
        "Scheduled maintenance",
    ),
    (
        r"(?i)timed?\s*out|\btimeout\b",
        ErrorKind::Timeout,
        "Request timeout",
    ),
    (
        r"(?i)\bunauthori[sz]ed\b|not\s+(signed|logged)\s+in",
        ErrorKind::Unauthorized,
        "Missing or expired session",
    ),
    (
        r"(?i)\bforbidden\b|permission\s+denied|access\s+denied",
        ErrorKind::Forbidden,
        "Insufficient permissions",
    ),
    (
        r"(?i)not\s+found|does\s+not\s+exist",
        ErrorKind::NotFound,
        "Missing resource",
    ),
    (
        r"(?i)service\s+unavailable|temporarily\s+unavailable",
        ErrorKind::ServiceUnavailable,
        "Service unavailable",
    ),
];

/// A pattern that assigns a kind to matching messages.
#[derive(Debug, Clone)]
pub struct KindPattern {
    regex: Regex,
    kind: ErrorKind,
    description: String,
}

impl KindPattern {
    /// Compiles a new pattern.
    ///
    /// # Errors
    ///
    /// Returns the regex error when `pattern` is not a valid expression.
    pub fn new(
        pattern: &str,
        kind: ErrorKind,
        description: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self::with_regex(Regex::new(pattern)?, kind, description))
    }

    /// Creates a pattern from a pre-compiled regex.
    pub fn with_regex(regex: Regex, kind: ErrorKind, description: impl Into<String>) -> Self {
        Self {
            regex,
            kind,
            description: description.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Ordered list of [`KindPattern`]s; the first match wins.
#[derive(Debug, Clone)]
pub struct MessageDetector {
    patterns: Vec<KindPattern>,
}

impl Default for MessageDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageDetector {
    /// Creates a detector with the built-in patterns.
    pub fn new() -> Self {
        let patterns = DEFAULT_PATTERNS
            .iter()
            .filter_map(|(pattern, kind, description)| {
                KindPattern::new(pattern, *kind, *description).ok()
            })
            .collect();
        Self { patterns }
    }

    /// Creates a detector with custom patterns.
    pub fn with_patterns(patterns: Vec<KindPattern>) -> Self {
        Self { patterns }
    }

    /// Appends a pattern with the lowest priority.
    pub fn push(&mut self, pattern: KindPattern) {
        self.patterns.push(pattern);
    }

    pub fn patterns(&self) -> &[KindPattern] {
        &self.patterns
    }

    /// Returns the kind of the first pattern matching `message`.
    pub fn detect(&self, message: &str) -> Option<ErrorKind> {
        self.patterns
            .iter()
            .find(|pattern| pattern.matches(message))
            .map(KindPattern::kind)
    }
}
