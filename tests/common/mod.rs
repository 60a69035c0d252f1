#![allow(dead_code)]

use retro_blog::config::DatabaseConfig;
use retro_blog::entities::{post, post_tag, tag};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

/// Fresh in-memory SQLite database with the real migrations applied.
///
/// sqlx backs `sqlite::memory:` with a shared-cache database private to the
/// pool. One connection keeps concurrent writers queued on the pool instead of
/// failing on SQLite table locks, so racing calls run one after the other.
pub async fn setup_db() -> DatabaseConnection {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        sql_logging: false,
    };
    retro_blog::database::connect(&cfg).await.expect("in-memory database")
}

pub fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub async fn row_counts(db: &DatabaseConnection) -> (u64, u64, u64) {
    (
        post::Entity::find().count(db).await.unwrap(),
        tag::Entity::find().count(db).await.unwrap(),
        post_tag::Entity::find().count(db).await.unwrap(),
    )
}
