//! Error taxonomy for catalog operations.

use thiserror::Error;

/// Failure of a catalog operation. Every variant is terminal for the invocation
/// that produced it; nothing is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The request never produced a usable HTTP response (network, timeout).
    #[error("network error: {0}")]
    Transport(String),
    /// The service answered `success: false`; the message is shown verbatim.
    #[error("{0}")]
    Service(String),
    /// Input rejected before any network call.
    #[error("{0}")]
    Validation(String),
    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl CatalogError {
    /// Construct a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether the failure happened before reaching the service.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<wallvault_api_models::ConfigValidationError> for CatalogError {
    fn from(value: wallvault_api_models::ConfigValidationError) -> Self {
        Self::Validation(value.to_string())
    }
}
