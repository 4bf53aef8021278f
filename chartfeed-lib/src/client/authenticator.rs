use super::{Credentials, Token};
use crate::LoadError;
use crate::config::Config;
use ohno::EnrichableExt;
use serde::Deserialize;
use url::Url;

const LOG_TARGET: &str = "      auth";

/// Source of fresh bearer tokens.
///
/// The metrics fetcher calls this at most once per load to replace a rejected token.
pub trait TokenSource: Send + Sync {
    fn authenticate(&self) -> impl Future<Output = Result<Token, LoadError>> + Send;
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    data: Option<LoginData>,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    token: Option<String>,
}

/// Exchanges credentials for a bearer token at the login endpoint.
///
/// Makes exactly one request per call. Whether to try again is the caller's decision.
#[derive(Debug, Clone)]
pub struct Authenticator {
    client: reqwest::Client,
    login_url: Url,
    credentials: Credentials,
    keep_logged_in: bool,
}

impl Authenticator {
    #[must_use]
    pub fn new(client: reqwest::Client, config: &Config, credentials: Credentials) -> Self {
        Self {
            client,
            login_url: config.login_url.clone(),
            credentials,
            keep_logged_in: config.keep_logged_in,
        }
    }

    /// Obtain a new token from the login endpoint.
    pub async fn authenticate(&self) -> Result<Token, LoadError> {
        log::info!(target: LOG_TARGET, "Signing in to '{}' as '{}'", self.login_url, self.credentials.identifier());

        let response = self
            .client
            .post(self.login_url.clone())
            .json(&self.credentials.login_request(self.keep_logged_in))
            .send()
            .await
            .map_err(|e| LoadError::from_transport(e, &format!("sending login request to {}", self.login_url)))?;

        let status = response.status();
        if !status.is_success() {
            log::debug!(target: LOG_TARGET, "Login endpoint answered with HTTP {status}");
            return Err(LoadError::auth(format!("login endpoint answered with HTTP {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LoadError::from_transport(e, "reading login response body"))?;

        extract_token(&body)
    }
}

impl TokenSource for Authenticator {
    fn authenticate(&self) -> impl Future<Output = Result<Token, LoadError>> + Send {
        Self::authenticate(self)
    }
}

/// Pull the token out of a login response body.
fn extract_token(body: &[u8]) -> Result<Token, LoadError> {
    let parsed: LoginResponse =
        serde_json::from_slice(body).map_err(|e| LoadError::Auth(ohno::AppError::new(e).enrich("parsing login response")))?;

    match parsed.data.and_then(|data| data.token) {
        Some(token) if !token.is_empty() => {
            log::debug!(target: LOG_TARGET, "Received a token ({} bytes)", token.len());
            Ok(Token::new(token))
        }
        _ => Err(LoadError::auth("token not found in login response")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token() {
        let token = extract_token(br#"{"data": {"token": "abc", "user": {"id": 1}}}"#).unwrap();
        assert_eq!(token.as_str(), "abc");
    }

    #[test]
    fn test_extract_token_missing_data() {
        let err = extract_token(br#"{"message": "ok"}"#).unwrap_err();
        assert!(matches!(err, LoadError::Auth(_)));
    }

    #[test]
    fn test_extract_token_missing_token() {
        let err = extract_token(br#"{"data": {}}"#).unwrap_err();
        assert!(matches!(err, LoadError::Auth(_)));
    }

    #[test]
    fn test_extract_token_null_token() {
        let err = extract_token(br#"{"data": {"token": null}}"#).unwrap_err();
        assert!(matches!(err, LoadError::Auth(_)));
    }

    #[test]
    fn test_extract_token_empty_token() {
        let err = extract_token(br#"{"data": {"token": ""}}"#).unwrap_err();
        assert!(matches!(err, LoadError::Auth(_)));
    }

    #[test]
    fn test_extract_token_not_json() {
        let err = extract_token(b"<html>maintenance</html>").unwrap_err();
        assert!(matches!(err, LoadError::Auth(_)));
    }

    #[test]
    fn test_extract_token_wrong_type() {
        let err = extract_token(br#"{"data": {"token": 17}}"#).unwrap_err();
        assert!(matches!(err, LoadError::Auth(_)));
    }
}
