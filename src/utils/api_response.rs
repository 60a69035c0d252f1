use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Envelope used for every failure body.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Serialize)]
pub struct ValidationErrorDetail {
    pub field: String,
    pub title: String,   // validator code (e.g. "is_required", "length")
    pub message: String, // Human readable
}

/// Acknowledgement returned by the write endpoints, e.g. `{"id": 3, "message": "created"}`.
#[derive(Debug, Serialize)]
pub struct WriteAck {
    pub id: i32,
    pub message: &'static str,
}

impl WriteAck {
    pub fn created(id: i32) -> Self {
        Self { id, message: "created" }
    }

    pub fn updated(id: i32) -> Self {
        Self { id, message: "updated" }
    }

    pub fn exists(id: i32) -> Self {
        Self { id, message: "exists" }
    }
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn new(status: &str, code: &str, message: &str, data: Option<T>) -> Self {
        Self {
            status: status.to_string(),
            code: code.to_string(),
            message: message.to_string(),
            data,
        }
    }
}

// Wrapper to combine StatusCode and the Body
pub struct ApiResponseResult<T>(pub StatusCode, pub T);

impl<T> IntoResponse for ApiResponseResult<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (self.0, Json(self.1)).into_response()
    }
}

pub struct ResponseBuilder;

impl ResponseBuilder {
    pub fn success<T: Serialize>(data: T) -> ApiResponseResult<T> {
        ApiResponseResult(StatusCode::OK, data)
    }

    pub fn created<T: Serialize>(data: T) -> ApiResponseResult<T> {
        ApiResponseResult(StatusCode::CREATED, data)
    }

    pub fn no_content() -> Response {
        StatusCode::NO_CONTENT.into_response()
    }

    pub fn error<T: Serialize>(
        status_code: StatusCode,
        code: &str,
        message: &str,
    ) -> ApiResponseResult<ApiResponse<T>> {
        ApiResponseResult(status_code, ApiResponse::new("error", code, message, None))
    }

    pub fn fail_with_data<T: Serialize>(
        status_code: StatusCode,
        code: &str,
        message: &str,
        data: T,
    ) -> ApiResponseResult<ApiResponse<T>> {
        ApiResponseResult(status_code, ApiResponse::new("error", code, message, Some(data)))
    }
}
