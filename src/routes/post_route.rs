use axum::{routing::get, Router};
use crate::config::AppState;
use crate::handlers::post_handler::*;

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts_handler).post(create_post_handler))
        .route("/{id}", get(get_post_handler).put(update_post_handler).delete(delete_post_handler))
}
