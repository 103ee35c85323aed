use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::repository::RepoError;

/// The wire envelope every endpoint returns: `{flag, message, data}`.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub flag: bool,
    pub message: String,
    pub data: Value,
}

impl Envelope {
    fn success(message: impl Into<String>, data: impl Serialize) -> Self {
        Self {
            flag: true,
            message: message.into(),
            data: serde_json::to_value(data).unwrap_or(Value::Null),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            flag: false,
            message: message.into(),
            data: Value::Null,
        }
    }
}

pub fn ok(message: impl Into<String>, data: impl Serialize) -> Response {
    (StatusCode::OK, Json(Envelope::success(message, data))).into_response()
}

pub fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(Envelope::failure(message))).into_response()
}

pub fn not_found(message: impl Into<String>) -> Response {
    (StatusCode::NOT_FOUND, Json(Envelope::failure(message))).into_response()
}

/// Repository failures carry their HTTP status with them; database faults are
/// logged and surfaced as a generic 500.
pub fn repo_error(e: RepoError) -> Response {
    match e {
        RepoError::NotFound { .. } => not_found(e.to_string()),
        RepoError::Conflict(_) | RepoError::DependentsExist { .. } => bad_request(e.to_string()),
        RepoError::Db(inner) => {
            error!("database error: {}", inner);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Envelope::failure("Something went wrong")),
            )
                .into_response()
        }
    }
}
