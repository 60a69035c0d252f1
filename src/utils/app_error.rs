use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use thiserror::Error;

use crate::utils::api_response::ResponseBuilder;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing, blank or oversized field
    #[error("{0}")]
    Validation(String),

    /// Path or query identifier that is not a positive integer
    #[error("{0}")]
    InvalidId(String),

    #[error("{0}")]
    NotFound(String),

    /// Rename onto a name another tag already holds
    #[error("{0}")]
    TagExists(String),

    #[error("storage error: {0}")]
    Storage(#[from] DbErr),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidId(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::TagExists(_) => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidId(_) => "INVALID_ID",
            Self::NotFound(_) => "NOT_FOUND",
            Self::TagExists(_) => "TAG_EXISTS",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        match self {
            Self::Storage(err) => {
                tracing::error!(error = %err, "storage operation failed");
                ResponseBuilder::error::<()>(status, code, "Internal server error").into_response()
            }
            other => ResponseBuilder::error::<()>(status, code, &other.to_string()).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_to_status_codes() {
        assert_eq!(AppError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::InvalidId("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::TagExists("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::from(DbErr::Custom("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn each_case_has_its_own_code() {
        assert_eq!(AppError::Validation("x".into()).code(), "VALIDATION_ERROR");
        assert_eq!(AppError::InvalidId("x".into()).code(), "INVALID_ID");
        assert_eq!(AppError::NotFound("x".into()).code(), "NOT_FOUND");
        assert_eq!(AppError::TagExists("x".into()).code(), "TAG_EXISTS");
    }

    #[test]
    fn storage_errors_hide_details() {
        let response = AppError::from(DbErr::Custom("secret table".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
