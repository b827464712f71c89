use http::StatusCode;
use serde::Serialize;

/// Domain errors that know how to present themselves over HTTP
///
/// Feature crates implement this for their error enums so the
/// envelope format stays the same across every route.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;

    /// Whether the caller is at fault
    fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Uniform error envelope returned to callers
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub message: String,
    pub r#type: String,
    pub code: u16,
}

impl ErrorResponse {
    /// Build the envelope for any [`HttpError`]
    pub fn from_error<E: HttpError + ?Sized>(error: &E) -> Self {
        Self {
            error: ErrorDetails {
                message: error.client_message(),
                r#type: error.error_type().to_owned(),
                code: error.status_code().as_u16(),
            },
        }
    }
}
