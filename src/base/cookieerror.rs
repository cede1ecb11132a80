use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CookieError {
    /// No document cookie surface in the current execution context.
    #[error("Document cookie store is not available")]
    EnvironmentUnavailable,

    /// Stored object value could not be percent-decoded or JSON-parsed.
    #[error("Failed to decode cookie value: {reason}")]
    DecodeFailure { reason: String },

    /// Object value could not be serialized to JSON.
    #[error("Failed to encode cookie value: {reason}")]
    EncodeFailure { reason: String },

    /// Cookie name is not an RFC 6265 token.
    #[error("Invalid cookie name: {name:?}")]
    InvalidName { name: String },

    #[error("Unknown SameSite policy: {value:?}")]
    InvalidSameSite { value: String },
}

impl CookieError {
    pub fn decode_failure(reason: impl Into<String>) -> Self {
        CookieError::DecodeFailure {
            reason: reason.into(),
        }
    }

    pub fn encode_failure(reason: impl Into<String>) -> Self {
        CookieError::EncodeFailure {
            reason: reason.into(),
        }
    }

    pub fn invalid_name(name: impl Into<String>) -> Self {
        CookieError::InvalidName { name: name.into() }
    }

    pub fn invalid_same_site(value: impl Into<String>) -> Self {
        CookieError::InvalidSameSite {
            value: value.into(),
        }
    }
}

/// Result type alias for cookie operations.
pub type CookieResult<T> = Result<T, CookieError>;
