use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use validator::{Validate, ValidationErrors};
use crate::utils::api_response::{ResponseBuilder, ValidationErrorDetail};

/// Validated request body.
///
/// `application/x-www-form-urlencoded` bodies are decoded as forms; everything
/// else, including requests without a `Content-Type`, is parsed as JSON.
pub struct ValidatedBody<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedBody<T>
where
    T: serde::de::DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        // 1. Body extraction
        let payload = if is_form {
            let Form(payload) = Form::<T>::from_request(req, state)
                .await
                .map_err(|err| invalid_body(&err.body_text()))?;
            payload
        } else {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|err| invalid_body(&err.body_text()))?;
            serde_json::from_slice::<T>(&bytes).map_err(|err| invalid_body(&err.to_string()))?
        };

        // 2. Field validation
        if let Err(e) = payload.validate() {
            let error_list = map_validation_errors(e);

            return Err(ResponseBuilder::fail_with_data(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Validation failed",
                error_list,
            )
            .into_response());
        }

        Ok(ValidatedBody(payload))
    }
}

fn invalid_body(reason: &str) -> Response {
    let message = format!("Invalid request body: {}", reason);
    ResponseBuilder::error::<()>(StatusCode::BAD_REQUEST, "INVALID_BODY", &message).into_response()
}

// Convert validator errors to our custom struct list
fn map_validation_errors(errors: ValidationErrors) -> Vec<ValidationErrorDetail> {
    let mut details = Vec::new();

    for (field, error_kind) in errors.field_errors() {
        for err in error_kind {
            details.push(ValidationErrorDetail {
                field: field.to_string(),
                title: err.code.to_string(),
                message: err.message.clone().map(|m| m.to_string()).unwrap_or_else(|| "Invalid value".to_string()),
            });
        }
    }

    details
}
