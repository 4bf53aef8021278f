use core::fmt::{Debug, Formatter};
use serde::Serialize;

/// Identifier and secret exchanged for a bearer token.
#[derive(Clone)]
pub struct Credentials {
    identifier: String,
    secret: String,
}

impl Credentials {
    #[must_use]
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub(crate) fn login_request(&self, keep_logged_in: bool) -> LoginRequest<'_> {
        LoginRequest {
            email: &self.identifier,
            password: &self.secret,
            keep_me_logged_in: keep_logged_in,
        }
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// JSON body posted to the login endpoint
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
    keep_me_logged_in: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("someone@example.com", "hunter2");
        let debug = format!("{creds:?}");
        assert!(debug.contains("someone@example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_login_request_wire_format() {
        let creds = Credentials::new("someone@example.com", "hunter2");
        let body = serde_json::to_value(creds.login_request(false)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "email": "someone@example.com",
                "password": "hunter2",
                "keep_me_logged_in": false
            })
        );
    }

    #[test]
    fn test_login_request_keep_logged_in() {
        let creds = Credentials::new("a", "b");
        let body = serde_json::to_value(creds.login_request(true)).unwrap();
        assert_eq!(body["keep_me_logged_in"], serde_json::json!(true));
    }
}
