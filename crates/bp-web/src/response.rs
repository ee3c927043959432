//! Response bodies and the HTTP error taxonomy.
//!
//! Every error renders as `{"error": true, "msg": ...}`. Backend failures
//! always render the same fixed message; their cause is only logged.

use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::error;

/// Message sent for every backend failure.
pub const INTERNAL_ERROR_MSG: &str = "Internal server error.";

/// Error responses the API can produce.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    UnprocessableEntity(String),

    #[error("Internal server error.")]
    Internal,

    #[error("{0}")]
    NotImplemented(String),

    #[error("{0}")]
    ServiceUnavailable(String),
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self::UnprocessableEntity(msg.into())
    }

    /// Log `err` and return the opaque 500. The cause never reaches the body.
    pub fn internal(err: impl Display) -> Self {
        let detail = format!("{:#}", err);
        error!(%detail, "Backend failure");
        Self::Internal
    }

    pub fn not_implemented(msg: impl Into<String>) -> Self {
        Self::NotImplemented(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::ServiceUnavailable(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: true,
            msg: self.to_string(),
        }
    }
}

impl From<bp_core::CoreError> for ApiError {
    fn from(err: bp_core::CoreError) -> Self {
        Self::internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: bool,
    pub msg: String,
}

/// Successful statement result: `{"msg": "OK", "data": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryOk {
    pub msg: String,
    pub data: Vec<Value>,
}

impl QueryOk {
    pub fn new(data: Vec<Value>) -> Self {
        Self {
            msg: "OK".to_string(),
            data,
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::OK
    }

    /// Column value from the first row, if any.
    pub fn first(&self, column: &str) -> Option<&Value> {
        self.data.first()?.get(column).filter(|v| !v.is_null())
    }
}

impl IntoResponse for QueryOk {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
