use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::envelope::Failure;
use thiserror::Error;

use crate::shared::query::error::QueryError;
use crate::shared::query::grouper::GroupError;
use crate::shared::query::view::ViewDef;

/// Ошибка на границе обработчика: превращается в failure-конверт
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}: {error}")]
    Validation { message: String, error: String },

    #[error("{message}: {error}")]
    NotFound { message: String, error: String },

    #[error("{message}: {error}")]
    Upstream { message: String, error: String },
}

impl ApiError {
    pub fn validation(message: impl Into<String>, error: impl std::fmt::Display) -> Self {
        ApiError::Validation {
            message: message.into(),
            error: error.to_string(),
        }
    }

    pub fn not_found(message: impl Into<String>, error: impl std::fmt::Display) -> Self {
        ApiError::NotFound {
            message: message.into(),
            error: error.to_string(),
        }
    }

    pub fn upstream(message: impl Into<String>, error: impl std::fmt::Display) -> Self {
        ApiError::Upstream {
            message: message.into(),
            error: error.to_string(),
        }
    }

    /// Map an inner query error with the entity as context
    pub fn from_query(view: &ViewDef, err: QueryError) -> Self {
        match err {
            QueryError::Invalid(_) | QueryError::InvalidId(_) => {
                Self::validation(format!("Invalid {} query", view.entity), err)
            }
            QueryError::UnknownLookup(_) => {
                Self::not_found(format!("{} lookup not supported", view.entity), err)
            }
            QueryError::TypeMismatch { .. } | QueryError::EmptyKeySet => {
                Self::upstream(format!("Failed to build {} query", view.entity), err)
            }
        }
    }

    pub fn from_group(view: &ViewDef, err: GroupError) -> Self {
        Self::upstream(format!("Failed to retrieve {} records", view.entity), err)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short tag for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation_error",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Upstream { .. } => "upstream_error",
        }
    }

    pub fn failure(&self) -> Failure {
        match self {
            ApiError::Validation { message, error }
            | ApiError::NotFound { message, error }
            | ApiError::Upstream { message, error } => Failure::new(message.clone(), error.clone()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.failure())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::validation("bad", "limit").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::not_found("none", "id=1").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::upstream("db", "ORA-01017").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_failure_carries_message_only() {
        let f = ApiError::upstream("Failed to retrieve Branch records", "connection reset").failure();
        assert!(!f.success);
        assert_eq!(f.message, "Failed to retrieve Branch records");
        assert_eq!(f.error, "connection reset");
    }
}
