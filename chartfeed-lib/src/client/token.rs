use core::fmt::{Debug, Formatter};
use reqwest::header::HeaderValue;

/// Opaque bearer token, valid for one load operation.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the `Authorization` header value for this token.
    pub(crate) fn bearer_header(&self) -> crate::Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.0))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}
