pub mod post_handler;
pub mod tag_handler;

use axum::response::IntoResponse;
use chrono::Utc;
use crate::utils::api_response::ResponseBuilder;

pub async fn health_check_handler() -> impl IntoResponse {
    ResponseBuilder::success(serde_json::json!({
        "status": "up",
        "server_time": Utc::now().to_rfc3339(),
    }))
}
