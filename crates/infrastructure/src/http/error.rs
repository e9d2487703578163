//! API-call error type.

use autoglue_application::UnauthorizedError;
use thiserror::Error;

/// Error produced by calls against the AutoGlue API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Human-readable message extracted from the response body.
        message: String,
        /// The decoded JSON body, when the server sent one.
        body: Option<serde_json::Value>,
    },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Builds a [`ApiError::Status`] from a status code and raw body,
    /// extracting the server's `error` or `message` field when present.
    #[must_use]
    pub fn from_status(status: u16, raw_body: &[u8]) -> Self {
        let body: Option<serde_json::Value> = serde_json::from_slice(raw_body).ok();
        let message = body
            .as_ref()
            .and_then(|value| {
                value
                    .get("error")
                    .or_else(|| value.get("message"))
                    .and_then(serde_json::Value::as_str)
            })
            .map(ToString::to_string)
            .or_else(|| {
                let text = String::from_utf8_lossy(raw_body).trim().to_string();
                (!text.is_empty()).then_some(text)
            })
            .unwrap_or_else(|| format!("HTTP {status}"));

        Self::Status {
            status,
            message,
            body,
        }
    }

    /// Returns the HTTP status code, when the server produced one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(error) => error.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }
}

impl UnauthorizedError for ApiError {
    fn is_unauthorized(&self) -> bool {
        if self.status() == Some(401) {
            return true;
        }
        // reqwest sometimes surfaces the failing exchange as a nested
        // source rather than on the top-level error.
        if let Self::Network(error) = self {
            let mut source = std::error::Error::source(error);
            while let Some(cause) = source {
                if let Some(nested) = cause.downcast_ref::<reqwest::Error>()
                    && nested.status() == Some(reqwest::StatusCode::UNAUTHORIZED)
                {
                    return true;
                }
                source = cause.source();
            }
        }
        false
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_message_extracted_from_error_field() {
        let error = ApiError::from_status(422, br#"{"error":"hostname already taken"}"#);
        assert_eq!(error.to_string(), "HTTP 422: hostname already taken");
    }

    #[test]
    fn test_message_falls_back_to_message_field() {
        let error = ApiError::from_status(400, br#"{"message":"invalid payload"}"#);
        assert_eq!(error.to_string(), "HTTP 400: invalid payload");
    }

    #[test]
    fn test_non_json_body_becomes_the_message() {
        let error = ApiError::from_status(502, b"upstream unavailable");
        assert_eq!(error.to_string(), "HTTP 502: upstream unavailable");
    }

    #[test]
    fn test_empty_body_yields_generic_message() {
        let error = ApiError::from_status(500, b"");
        assert_eq!(error.to_string(), "HTTP 500: HTTP 500");
    }

    #[test]
    fn test_unauthorized_detection() {
        assert!(ApiError::from_status(401, b"").is_unauthorized());
        assert!(!ApiError::from_status(403, b"").is_unauthorized());
        assert!(!ApiError::Decode("bad json".to_string()).is_unauthorized());
    }
}
