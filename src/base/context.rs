//! Ergonomic error context helpers.
//!
//! Provides extension traits for adding context to `Result` types,
//! converting serialization errors into context-rich `CookieError` variants.

use crate::base::cookieerror::CookieError;

/// Extension trait for adding cookie context to serde_json Results.
pub trait JsonResultExt<T> {
    /// Add decode context to a JSON error.
    ///
    /// # Example
    /// ```ignore
    /// use docjar::base::context::JsonResultExt;
    ///
    /// let value: Value = serde_json::from_str(&raw).decode_context("prefs")?;
    /// // Error: "Failed to decode cookie value: prefs: expected value at line 1 column 1"
    /// ```
    fn decode_context(self, name: &str) -> Result<T, CookieError>;

    /// Add encode context to a JSON error.
    fn encode_context(self, name: &str) -> Result<T, CookieError>;
}

impl<T> JsonResultExt<T> for Result<T, serde_json::Error> {
    fn decode_context(self, name: &str) -> Result<T, CookieError> {
        self.map_err(|e| CookieError::decode_failure(format!("{}: {}", name, e)))
    }

    fn encode_context(self, name: &str) -> Result<T, CookieError> {
        self.map_err(|e| CookieError::encode_failure(format!("{}: {}", name, e)))
    }
}
