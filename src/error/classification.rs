//! Error taxonomy types for the recovery boundary.
//!
//! A caught failure is reduced to an [`ErrorMetadata`] value: a closed
//! [`ErrorKind`], the transport status when known, a retryability flag and a
//! [`Severity`]. Kinds carry the human-readable copy shown on the recovery
//! surface.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context key holding the endpoint that produced the failure.
pub const CONTEXT_ENDPOINT: &str = "endpoint";

/// Context key holding the request id attached to the failure.
pub const CONTEXT_REQUEST_ID: &str = "request_id";

/// The classified category of a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// The requested resource does not exist (HTTP 404).
    NotFound,
    /// The caller is not signed in (HTTP 401).
    Unauthorized,
    /// The caller lacks permission (HTTP 403).
    Forbidden,
    /// Server-side failure (HTTP 500).
    ServerError,
    /// Service temporarily unavailable (HTTP 503).
    ServiceUnavailable,
    /// Planned downtime.
    Maintenance,
    /// The request timed out (HTTP 408).
    Timeout,
    /// The resource was removed permanently (HTTP 410).
    Gone,
    /// The request was malformed (HTTP 400).
    BadRequest,
    /// Anything the classifier could not recognize.
    Unknown,
}

impl ErrorKind {
    /// Every kind, in taxonomy order.
    pub const ALL: [ErrorKind; 10] = [
        ErrorKind::NotFound,
        ErrorKind::Unauthorized,
        ErrorKind::Forbidden,
        ErrorKind::ServerError,
        ErrorKind::ServiceUnavailable,
        ErrorKind::Maintenance,
        ErrorKind::Timeout,
        ErrorKind::Gone,
        ErrorKind::BadRequest,
        ErrorKind::Unknown,
    ];

    /// Maps a transport status code to a kind. Unmapped codes are `Unknown`.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::BadRequest,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            408 => ErrorKind::Timeout,
            410 => ErrorKind::Gone,
            500 => ErrorKind::ServerError,
            503 => ErrorKind::ServiceUnavailable,
            _ => ErrorKind::Unknown,
        }
    }

    /// Whether a retry is appropriate when no status override applies.
    pub fn default_retryable(self) -> bool {
        matches!(
            self,
            ErrorKind::ServerError | ErrorKind::ServiceUnavailable | ErrorKind::Timeout
        )
    }

    /// Default severity of the kind.
    pub fn severity(self) -> Severity {
        match self {
            ErrorKind::ServerError | ErrorKind::ServiceUnavailable => Severity::Critical,
            ErrorKind::Unauthorized | ErrorKind::Forbidden | ErrorKind::Unknown => Severity::Error,
            ErrorKind::NotFound
            | ErrorKind::Maintenance
            | ErrorKind::Timeout
            | ErrorKind::Gone
            | ErrorKind::BadRequest => Severity::Warning,
        }
    }

    /// Whether displaying this kind is worth an analytics event.
    ///
    /// Not-found pages are excluded: stale links and crawlers make them noise.
    pub fn is_tracked(self) -> bool {
        !matches!(self, ErrorKind::NotFound)
    }

    /// Stable kebab-case identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not-found",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::ServerError => "server-error",
            ErrorKind::ServiceUnavailable => "service-unavailable",
            ErrorKind::Maintenance => "maintenance",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Gone => "gone",
            ErrorKind::BadRequest => "bad-request",
            ErrorKind::Unknown => "unknown",
        }
    }

    /// Parses the kebab-case identifier produced by [`ErrorKind::as_str`].
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
    }

    /// Short heading shown on the recovery surface.
    pub fn title(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "Page not found",
            ErrorKind::Unauthorized => "Sign in required",
            ErrorKind::Forbidden => "Access denied",
            ErrorKind::ServerError => "Something went wrong",
            ErrorKind::ServiceUnavailable => "Service unavailable",
            ErrorKind::Maintenance => "Down for maintenance",
            ErrorKind::Timeout => "Request timed out",
            ErrorKind::Gone => "Page no longer available",
            ErrorKind::BadRequest => "Invalid request",
            ErrorKind::Unknown => "Unexpected error",
        }
    }

    /// Longer explanation shown under the title.
    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::NotFound => {
                "The page you are looking for does not exist or may have been moved."
            }
            ErrorKind::Unauthorized => "You need to sign in to view this content.",
            ErrorKind::Forbidden => "You do not have permission to view this content.",
            ErrorKind::ServerError => {
                "Our servers hit a problem while handling your request. Please try again."
            }
            ErrorKind::ServiceUnavailable => {
                "The service is temporarily unavailable. Please try again in a moment."
            }
            ErrorKind::Maintenance => {
                "We are performing scheduled maintenance and will be back shortly."
            }
            ErrorKind::Timeout => "The request took too long to complete.",
            ErrorKind::Gone => "This content has been permanently removed.",
            ErrorKind::BadRequest => "The request could not be understood.",
            ErrorKind::Unknown => "An unexpected error occurred.",
        }
    }

    /// Document title used by the page boundary when SEO titles are enabled.
    pub fn document_title(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "404 - Page Not Found",
            ErrorKind::Unauthorized => "401 - Sign In Required",
            ErrorKind::Forbidden => "403 - Access Denied",
            ErrorKind::ServerError => "500 - Server Error",
            ErrorKind::ServiceUnavailable => "503 - Service Unavailable",
            ErrorKind::Maintenance => "Maintenance",
            ErrorKind::Timeout => "408 - Request Timeout",
            ErrorKind::Gone => "410 - Gone",
            ErrorKind::BadRequest => "400 - Bad Request",
            ErrorKind::Unknown => "Error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal severity of a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        };
        f.write_str(name)
    }
}

/// Classification result for one caught failure.
///
/// Created once by the classifier and never mutated; a new failure or a
/// reset replaces it wholesale.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMetadata {
    pub kind: ErrorKind,
    pub status_code: Option<u16>,
    pub retryable: bool,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    /// Endpoint and request id when the failure carried them.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, String>,
}

impl ErrorMetadata {
    /// Capture time in milliseconds since the Unix epoch.
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    pub fn description(&self) -> &'static str {
        self.kind.description()
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.context.get(CONTEXT_ENDPOINT).map(String::as_str)
    }

    pub fn request_id(&self) -> Option<&str> {
        self.context.get(CONTEXT_REQUEST_ID).map(String::as_str)
    }
}
