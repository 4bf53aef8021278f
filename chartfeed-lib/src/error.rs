use ohno::EnrichableExt;
use reqwest::StatusCode;
use strum::{Display, IntoStaticStr};

/// Classified failure of a load operation.
///
/// Every failure below [`LoadOrchestrator`](crate::LoadOrchestrator) is wrapped into one of
/// these variants so the presentation layer can pick its wording from [`LoadError::kind`]
/// without inspecting the underlying cause.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The login endpoint rejected the credentials, answered with a malformed body,
    /// or a freshly issued token was rejected by the metrics endpoint.
    #[error("authentication failed: {0:#}")]
    Auth(ohno::AppError),

    /// The metrics endpoint answered with a non-success status that is not retried.
    #[error("metrics request failed with HTTP status {status}")]
    Http { status: StatusCode },

    /// The response payload is missing fields or its series are inconsistent.
    #[error("unexpected data shape: {0:#}")]
    DataShape(ohno::AppError),

    /// The caller cancelled the operation.
    #[error("operation cancelled")]
    Cancelled,

    /// Transport-level failure (DNS, connect, timeout, broken body stream).
    #[error("network failure: {0:#}")]
    Network(ohno::AppError),
}

/// The class of a [`LoadError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum LoadErrorKind {
    Auth,
    Http,
    DataShape,
    Cancelled,
    Network,
}

impl LoadError {
    #[must_use]
    pub const fn kind(&self) -> LoadErrorKind {
        match self {
            Self::Auth(_) => LoadErrorKind::Auth,
            Self::Http { .. } => LoadErrorKind::Http,
            Self::DataShape(_) => LoadErrorKind::DataShape,
            Self::Cancelled => LoadErrorKind::Cancelled,
            Self::Network(_) => LoadErrorKind::Network,
        }
    }

    pub(crate) fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(ohno::AppError::new(msg.into()))
    }

    pub(crate) fn data_shape(msg: impl Into<String>) -> Self {
        Self::DataShape(ohno::AppError::new(msg.into()))
    }

    /// Classify a transport error reported by `reqwest`.
    ///
    /// Errors raised while decoding a body are shape problems; everything else means the
    /// exchange never completed.
    pub(crate) fn from_transport(err: reqwest::Error, context: &str) -> Self {
        if err.is_decode() {
            Self::DataShape(ohno::AppError::new(err).enrich(context.to_string()))
        } else {
            Self::Network(ohno::AppError::new(err).enrich(context.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(LoadError::auth("nope").kind(), LoadErrorKind::Auth);
        assert_eq!(
            LoadError::Http {
                status: StatusCode::INTERNAL_SERVER_ERROR
            }
            .kind(),
            LoadErrorKind::Http
        );
        assert_eq!(LoadError::data_shape("bad").kind(), LoadErrorKind::DataShape);
        assert_eq!(LoadError::Cancelled.kind(), LoadErrorKind::Cancelled);
        assert_eq!(LoadError::Network(ohno::app_err!("dns")).kind(), LoadErrorKind::Network);
    }

    #[test]
    fn test_kind_display_is_snake_case() {
        assert_eq!(LoadErrorKind::DataShape.to_string(), "data_shape");
        let name: &'static str = LoadErrorKind::Cancelled.into();
        assert_eq!(name, "cancelled");
    }

    #[test]
    fn test_http_error_message_includes_status() {
        let err = LoadError::Http {
            status: StatusCode::BAD_GATEWAY,
        };
        assert!(err.to_string().contains("502"), "got: {err}");
    }

    #[test]
    fn test_auth_error_message_includes_cause() {
        let err = LoadError::auth("token not found in login response");
        assert!(err.to_string().contains("token not found"), "got: {err}");
    }
}
