//! Completion failures
//!
//! Every failure reaches the trainee as the same generic notice. The kind
//! only decides how loudly the operator hears about it.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct LlmError {
    pub kind: LlmErrorKind,
    pub message: String,
    /// HTTP status of the endpoint's answer, when there was one
    pub status: Option<u16>,
}

impl LlmError {
    pub fn new(kind: LlmErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn missing_credential() -> Self {
        Self::new(
            LlmErrorKind::MissingCredential,
            "LLM_API_KEY is not configured",
        )
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Unavailable, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Malformed, message)
    }

    /// Classify a non-success answer from the endpoint
    pub fn from_status(status: u16, body: &str) -> Self {
        let kind = match status {
            401 | 403 => LlmErrorKind::Rejected,
            429 | 500..=599 => LlmErrorKind::Unavailable,
            _ => LlmErrorKind::BadRequest,
        };
        Self {
            kind,
            message: format!("HTTP {status}: {body}"),
            status: Some(status),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// No key configured; nothing was sent
    MissingCredential,
    /// The endpoint refused the key (401, 403)
    Rejected,
    /// The endpoint refused the payload or model (other 4xx)
    BadRequest,
    /// Network trouble, rate limiting or 5xx
    Unavailable,
    /// A 2xx answer without usable reply text
    Malformed,
}

impl LlmErrorKind {
    /// Failures that repeat on every turn until the deployment is changed
    pub fn needs_operator(self) -> bool {
        matches!(
            self,
            Self::MissingCredential | Self::Rejected | Self::BadRequest
        )
    }
}
