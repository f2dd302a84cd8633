//! The value a guarded child raises when it cannot render.

use std::any::Any;
use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

/// Status attached to transport timeouts that carry no HTTP status.
const TIMEOUT_STATUS: u16 = 408;

/// A failure raised by a guarded child.
///
/// Only `message` is required. When `status` is present it drives
/// classification; `endpoint` and `request_id` are surfaced in the details
/// panel and copied into the metadata context.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct Failure {
    message: String,
    status: Option<u16>,
    endpoint: Option<String>,
    request_id: Option<String>,
    type_name: Option<String>,
    #[source]
    source: Option<Arc<dyn StdError + Send + Sync + 'static>>,
}

impl Failure {
    /// Creates a failure with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            endpoint: None,
            request_id: None,
            type_name: None,
            source: None,
        }
    }

    /// Creates a failure carrying a transport status code.
    pub fn with_status_code(status: u16, message: impl Into<String>) -> Self {
        Self::new(message).with_status(status)
    }

    /// Wraps an arbitrary error, keeping it as the source.
    pub fn from_error<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let mut failure = Self::new(error.to_string());
        failure.type_name = Some(std::any::type_name::<E>().to_string());
        failure.source = Some(Arc::new(error));
        failure
    }

    /// Converts a panic payload caught from a child render.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "render panicked".to_string()
        };
        Self::new(message).with_type_name("panic")
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }
}

impl From<reqwest::Error> for Failure {
    fn from(error: reqwest::Error) -> Self {
        let status = error
            .status()
            .map(|status| status.as_u16())
            .or_else(|| error.is_timeout().then_some(TIMEOUT_STATUS));
        let endpoint = error.url().map(|url| url.path().to_string());

        let mut failure = Failure::from_error(error);
        failure.status = status;
        failure.endpoint = endpoint;
        failure
    }
}

impl From<std::io::Error> for Failure {
    fn from(error: std::io::Error) -> Self {
        Failure::from_error(error)
    }
}

impl From<&str> for Failure {
    fn from(message: &str) -> Self {
        Failure::new(message)
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Failure::new(message)
    }
}
