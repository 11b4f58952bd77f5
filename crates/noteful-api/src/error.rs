//! HTTP error mapping.

use axum::{http::StatusCode, response::IntoResponse, Json};

/// Errors returned from HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    Database(noteful_core::Error),
    NotFound(String),
    BadRequest(String),
    Conflict(String),
}

impl ApiError {
    /// A required body field was absent or empty.
    pub fn missing_field(field: &str) -> Self {
        ApiError::BadRequest(format!("Missing `{}` in request body", field))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

impl From<noteful_core::Error> for ApiError {
    fn from(err: noteful_core::Error) -> Self {
        match &err {
            noteful_core::Error::Database(sqlx_err) => {
                if err.is_unique_violation() {
                    return ApiError::Conflict("The name already exists".to_string());
                }
                if err.is_foreign_key_violation() {
                    return ApiError::BadRequest(format!(
                        "Referenced folder or tag does not exist: {}",
                        sqlx_err
                    ));
                }
                ApiError::Database(err)
            }
            _ => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match self {
            ApiError::Database(err) => {
                tracing::error!(subsystem = "api", error = %err, "Request failed");
                err.to_string()
            }
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) | ApiError::Conflict(msg) => {
                tracing::warn!(subsystem = "api", status = status.as_u16(), "{}", msg);
                msg
            }
        };

        let body = Json(serde_json::json!({
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": message,
        }));

        (status, body).into_response()
    }
}
