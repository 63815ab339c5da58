//! Error taxonomy and the result envelope

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for the precondition channel
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors raised before any network call is attempted.
///
/// These represent caller mistakes (missing credentials, missing
/// identifiers, invalid upload input). Network- and server-origin failures
/// never appear here; they are always delivered inside an [`ApiResponse`].
#[derive(Error, Debug)]
pub enum ClientError {
    /// Secret key missing at construction
    #[error("Missing secret key. Pass it to RestashClient::new(secret_key).")]
    MissingSecretKey,

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Neither id nor key given for a lookup
    #[error("No id or key provided.")]
    MissingIdentifier,

    /// Upload exceeds the single-request size ceiling
    #[error("File size exceeds 4MB. Use the resumable upload API for larger files.")]
    FileTooLarge { size: u64 },

    /// Upload source could not be read
    #[error("Unreadable upload source: {0}")]
    UnreadableFile(#[from] std::io::Error),

    /// Upload input could not be encoded
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
}

/// API error codes returned by the service.
///
/// Closed set: an error body carrying any other code is treated as
/// malformed and replaced by [`ErrorResponse::fallback`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    RateLimitExceeded,
    InternalServerError,
}

impl ErrorCode {
    /// HTTP status the code maps to
    pub fn status(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::RateLimitExceeded => 429,
            Self::InternalServerError => 500,
        }
    }
}

/// A normalized API error
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Symbolic error code
    pub code: ErrorCode,
    /// Human-readable description
    pub message: String,
}

impl ErrorResponse {
    /// The generic error substituted whenever a server error body cannot be
    /// classified, or the request never produced a response at all.
    pub fn fallback() -> Self {
        Self {
            code: ErrorCode::InternalServerError,
            message: "An internal server error occurred. Please try again later.".to_string(),
        }
    }
}

/// Wire shape of a non-2xx response body
#[derive(Deserialize)]
struct WireError {
    error: ErrorResponse,
}

/// Classify a non-2xx response body.
///
/// A body matching `{"error": {"code", "message"}}` with a known code and a
/// non-empty message is returned verbatim. A body that is not JSON at all
/// yields the fallback code with the parse failure's own message as the
/// diagnostic; JSON of any other shape yields the fallback unchanged.
pub(crate) fn classify_error_body(body: &str) -> ErrorResponse {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) => {
            return ErrorResponse {
                code: ErrorCode::InternalServerError,
                message: err.to_string(),
            }
        }
    };

    match serde_json::from_value::<WireError>(value) {
        Ok(wire) if !wire.error.message.is_empty() => wire.error,
        _ => ErrorResponse::fallback(),
    }
}

/// The `{data, error}` envelope every network operation resolves to.
///
/// Exactly one of the two fields is populated; the constructors are the
/// only way to build one, so the invariant cannot be broken from outside.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse<T> {
    data: Option<T>,
    error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    pub(crate) fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub(crate) fn failure(error: ErrorResponse) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    /// Whether the operation succeeded
    pub fn is_success(&self) -> bool {
        self.data.is_some()
    }

    /// The parsed response body, when the operation succeeded
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// The normalized API error, when the operation failed
    pub fn error(&self) -> Option<&ErrorResponse> {
        self.error.as_ref()
    }

    /// Convert the envelope into a plain `Result` for use with `?`.
    pub fn into_result(self) -> std::result::Result<T, ErrorResponse> {
        match (self.data, self.error) {
            (Some(data), _) => Ok(data),
            (None, Some(error)) => Err(error),
            (None, None) => Err(ErrorResponse::fallback()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ErrorCode::BadRequest.status(), 400);
        assert_eq!(ErrorCode::Unauthorized.status(), 401);
        assert_eq!(ErrorCode::Forbidden.status(), 403);
        assert_eq!(ErrorCode::NotFound.status(), 404);
        assert_eq!(ErrorCode::Conflict.status(), 409);
        assert_eq!(ErrorCode::RateLimitExceeded.status(), 429);
        assert_eq!(ErrorCode::InternalServerError.status(), 500);
    }

    #[test]
    fn classify_well_formed_body() {
        let body = r#"{"error":{"code":"not_found","message":"File not found"}}"#;

        let error = classify_error_body(body);
        assert_eq!(error.code, ErrorCode::NotFound);
        assert_eq!(error.message, "File not found");
    }

    #[test]
    fn classify_unknown_code_falls_back() {
        let body = r#"{"error":{"code":"teapot","message":"I'm a teapot"}}"#;
        assert_eq!(classify_error_body(body), ErrorResponse::fallback());
    }

    #[test]
    fn classify_empty_message_falls_back() {
        let body = r#"{"error":{"code":"not_found","message":""}}"#;
        assert_eq!(classify_error_body(body), ErrorResponse::fallback());
    }

    #[test]
    fn classify_missing_fields_falls_back() {
        assert_eq!(classify_error_body("{}"), ErrorResponse::fallback());
        assert_eq!(
            classify_error_body(r#"{"error":{}}"#),
            ErrorResponse::fallback()
        );
    }

    #[test]
    fn classify_non_json_keeps_fallback_code() {
        let error = classify_error_body("<html>502 Bad Gateway</html>");
        assert_eq!(error.code, ErrorCode::InternalServerError);
        assert!(!error.message.is_empty());

        let error = classify_error_body("");
        assert_eq!(error.code, ErrorCode::InternalServerError);
    }

    #[test]
    fn envelope_holds_exactly_one_side() {
        let ok = ApiResponse::success(42);
        assert!(ok.is_success());
        assert_eq!(ok.data(), Some(&42));
        assert!(ok.error().is_none());

        let err = ApiResponse::<i32>::failure(ErrorResponse::fallback());
        assert!(!err.is_success());
        assert!(err.data().is_none());
        assert_eq!(err.error(), Some(&ErrorResponse::fallback()));
    }

    #[test]
    fn envelope_into_result() {
        assert_eq!(ApiResponse::success(1).into_result(), Ok(1));
        assert_eq!(
            ApiResponse::<i32>::failure(ErrorResponse::fallback()).into_result(),
            Err(ErrorResponse::fallback())
        );
    }
}
