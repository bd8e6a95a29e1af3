use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::{self, Debug};

use crate::db::StoreError;
use crate::validation::Violation;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    RidesNotFoundError,
    ServerError,
}

impl ErrorCode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::RidesNotFoundError => "RIDES_NOT_FOUND_ERROR",
            Self::ServerError => "SERVER_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure reported by every ride operation.
///
/// The error code travels in the response body and the transport status stays
/// 200, so clients detect failure by the presence of `error_code`.
#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
}

impl Error {
    pub fn is_validation_error(&self) -> bool {
        self.code == ErrorCode::ValidationError
    }

    pub fn is_rides_not_found_error(&self) -> bool {
        self.code == ErrorCode::RidesNotFoundError
    }

    pub fn is_server_error(&self) -> bool {
        self.code == ErrorCode::ServerError
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

impl From<Violation> for Error {
    fn from(violation: Violation) -> Self {
        validation_error(violation.message())
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        database_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error_code": self.code,
            "message": self.message,
        }));

        (StatusCode::OK, body).into_response()
    }
}

pub fn validation_error(message: impl Into<String>) -> Error {
    Error {
        code: ErrorCode::ValidationError,
        message: message.into(),
    }
}

pub fn rides_not_found_error() -> Error {
    Error {
        code: ErrorCode::RidesNotFoundError,
        message: "Could not find any rides".into(),
    }
}

pub fn server_error() -> Error {
    Error {
        code: ErrorCode::ServerError,
        message: "Unknown error".into(),
    }
}

pub fn database_error<T: Debug>(err: T) -> Error {
    tracing::error!(error = ?err, "store operation failed");
    server_error()
}

#[test]
fn error_codes_serialize_as_taxonomy_names() {
    for code in [
        ErrorCode::ValidationError,
        ErrorCode::RidesNotFoundError,
        ErrorCode::ServerError,
    ] {
        assert_eq!(serde_json::to_value(code).unwrap(), json!(code.name()));
    }
}

#[test]
fn server_error_hides_cause() {
    let err: Error = StoreError::MissingRow(1).into();

    assert!(err.is_server_error());
    assert_eq!(err.message, "Unknown error");
}

#[test]
fn envelope_is_sent_with_ok_status() {
    let response = rides_not_found_error().into_response();

    assert_eq!(response.status(), StatusCode::OK);
}
