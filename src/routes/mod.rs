use crate::config::AppState;
use crate::handlers::health_check_handler;
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod post_route;
pub mod tag_route;

pub fn create_routes() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/posts", post_route::post_routes())
        .nest("/api/tags", tag_route::tag_routes())
        .route("/api/health", get(health_check_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
