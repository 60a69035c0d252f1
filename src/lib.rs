pub mod config;
pub mod database;
pub mod entities;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

use axum::Router;
use config::AppState;

/// The full HTTP application over an open database.
pub fn app(state: AppState) -> Router {
    routes::create_routes().with_state(state)
}
