use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// API error taxonomy. Handlers and services return these; transport status
/// codes are derived from the variant, never from message text.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid or missing credentials")]
    Authentication,
    #[error("Not authorized to modify this resource")]
    Authorization,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Authentication => StatusCode::UNAUTHORIZED,
            ApiError::Authorization => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Translates a sqlx error from an insert/update, mapping unique-constraint
/// violations to `Conflict` so driver detail never reaches the client.
pub fn on_constraint(conflict_msg: &str) -> impl Fn(sqlx::Error) -> ApiError + '_ {
    move |e| match &e {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            ApiError::Conflict(conflict_msg.to_string())
        }
        _ => ApiError::Database(e),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 5xx details are logged, not surfaced.
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_map_to_expected_status_codes() {
        assert_eq!(
            ApiError::validation("missing title").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Authentication.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Authorization.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::NotFound("Post").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Conflict("Email already registered".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_message_names_the_resource() {
        assert_eq!(ApiError::NotFound("Post").to_string(), "Post not found");
    }

    #[test]
    fn authentication_message_is_uniform() {
        // One message for every failure cause; clients never learn whether a
        // token was missing, malformed, tampered or expired.
        assert_eq!(
            ApiError::Authentication.to_string(),
            "Invalid or missing credentials"
        );
    }
}
