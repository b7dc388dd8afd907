use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::error;

/// JSON body shared by every error response: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Everything the onboarding resource can answer with besides 200.
///
/// The Display strings are the wire format; clients match on them.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required.")]
    AuthRequired,

    #[error("Onboarding already completed.")]
    AlreadyCompleted,

    #[error("Invalid JSON format.")]
    MalformedBody,

    #[error("Request body must contain a 'steps' array.")]
    InvalidShape,

    #[error("Each item in 'steps' must be an object with 'name' and 'value'.")]
    InvalidItem,

    #[error("Invalid field name: {0}")]
    UnknownField(String),

    #[error("Field '{name}' must be a {expected}.")]
    TypeMismatch {
        name: String,
        expected: &'static str,
    },

    #[error("Failed to save data to the database: {0}")]
    Persistence(String),

    #[error("An unexpected server error occurred.")]
    Unexpected,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::AuthRequired => StatusCode::UNAUTHORIZED,
            ApiError::AlreadyCompleted => StatusCode::FORBIDDEN,
            ApiError::MalformedBody
            | ApiError::InvalidShape
            | ApiError::InvalidItem
            | ApiError::UnknownField(_)
            | ApiError::TypeMismatch { .. } => StatusCode::BAD_REQUEST,
            ApiError::Persistence(_) | ApiError::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Log an internal fault and collapse it to the opaque 500 answer.
    pub fn unexpected<E: std::fmt::Display>(err: E) -> Self {
        error!(error = %err, "unexpected server error");
        ApiError::Unexpected
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_the_taxonomy() {
        assert_eq!(ApiError::AuthRequired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::AlreadyCompleted.status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::MalformedBody.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidShape.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidItem.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::UnknownField("age".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Persistence("pool timed out".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Unexpected.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn messages_are_the_documented_wire_strings() {
        assert_eq!(
            ApiError::AuthRequired.to_string(),
            "Authentication required."
        );
        assert_eq!(
            ApiError::AlreadyCompleted.to_string(),
            "Onboarding already completed."
        );
        assert_eq!(ApiError::MalformedBody.to_string(), "Invalid JSON format.");
        assert_eq!(
            ApiError::InvalidShape.to_string(),
            "Request body must contain a 'steps' array."
        );
        assert_eq!(
            ApiError::UnknownField("age".into()).to_string(),
            "Invalid field name: age"
        );
        assert_eq!(
            ApiError::TypeMismatch {
                name: "receiveUpdates".into(),
                expected: "boolean",
            }
            .to_string(),
            "Field 'receiveUpdates' must be a boolean."
        );
        assert_eq!(
            ApiError::Persistence("connection reset".into()).to_string(),
            "Failed to save data to the database: connection reset"
        );
    }

    #[test]
    fn error_body_serializes_to_the_error_key() {
        let body = ErrorBody::new("nope");
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"error":"nope"}"#);
    }
}
