use axum::{routing::{get, put}, Router};
use crate::config::AppState;
use crate::handlers::tag_handler::*;

pub fn tag_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tags_handler).post(create_tag_handler))
        .route("/{id}", put(update_tag_handler).delete(delete_tag_handler))
}
