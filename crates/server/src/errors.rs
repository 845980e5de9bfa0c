use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use models::errors::{describe, FieldError};
use service::errors::ServiceError;

/// Error returned by every handler and by the request extractors below.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {}", describe(.0))]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn rejected(field: &str, message: String) -> Self {
        ApiError::Validation(vec![FieldError::new(field, message)])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(fields) => json!({ "detail": fields }),
            ApiError::NotFound(msg) => json!({ "detail": msg }),
            ApiError::Internal(msg) => {
                // storage detail stays in the log
                error!(error = %msg, "request failed");
                json!({ "detail": "Internal Server Error" })
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        if let Some(fields) = e.field_errors() {
            return ApiError::Validation(fields.to_vec());
        }
        match e {
            ServiceError::NotFound(msg) => ApiError::NotFound(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self {
        match r {
            JsonRejection::JsonDataError(e) => {
                let (field, message) = json_data_field(&e.body_text());
                ApiError::Validation(vec![FieldError::new(field, message)])
            }
            other => Self::rejected("body", other.body_text()),
        }
    }
}

/// Split axum's data-error text into the offending field and serde's message.
///
/// A bad value reads `<prefix>: <path>: <message>`, an absent one
/// ``<prefix>: missing field `<name>` ...``; anything else stays on `body`.
fn json_data_field(text: &str) -> (String, String) {
    let detail = text.split_once(": ").map_or(text, |(_, d)| d);
    if let Some(rest) = detail.strip_prefix("missing field `") {
        if let Some((name, _)) = rest.split_once('`') {
            return (name.to_string(), detail.to_string());
        }
    }
    if let Some((path, message)) = detail.split_once(": ") {
        let is_path = !path.is_empty()
            && path != "."
            && path.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
        if is_path {
            return (path.to_string(), message.to_string());
        }
    }
    ("body".to_string(), detail.to_string())
}

impl From<QueryRejection> for ApiError {
    fn from(r: QueryRejection) -> Self { Self::rejected("query", r.body_text()) }
}

impl From<PathRejection> for ApiError {
    fn from(r: PathRejection) -> Self { Self::rejected("path", r.body_text()) }
}

/// `axum::Json` whose rejection is reported as a 422 validation error.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database setup failed: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
