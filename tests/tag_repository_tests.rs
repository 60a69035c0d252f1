mod common;

use common::{names, row_counts, setup_db};
use pretty_assertions::assert_eq;
use retro_blog::models::tag_model::TagCreation;
use retro_blog::repositories::post_repository::PostRepository;
use retro_blog::repositories::tag_repository::TagRepository;
use retro_blog::services::tag_service::{ResolvedTag, TagService};
use retro_blog::utils::app_error::AppError;
use sea_orm::TransactionTrait;

#[tokio::test]
async fn create_is_idempotent_under_normalization() {
    let db = setup_db().await;

    let first = TagRepository::create(&db, "Go").await.unwrap();
    let second = TagRepository::create(&db, "  GO ").await.unwrap();

    assert!(matches!(first, TagCreation::Created(_)));
    assert_eq!(second, TagCreation::Existing(first.id()));
    assert_eq!(row_counts(&db).await, (0, 1, 0));
}

#[tokio::test]
async fn create_rejects_blank_names() {
    let db = setup_db().await;
    assert!(matches!(TagRepository::create(&db, " \t ").await, Err(AppError::Validation(_))));

    let long_name = "n".repeat(256);
    assert!(matches!(TagRepository::create(&db, &long_name).await, Err(AppError::Validation(_))));
    assert_eq!(row_counts(&db).await, (0, 0, 0));
}

#[tokio::test]
async fn concurrent_creates_yield_one_row() {
    let db = setup_db().await;

    let (a, b) = tokio::join!(
        TagRepository::create(&db, "NextJS"),
        TagRepository::create(&db, "nextjs"),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a.id(), b.id());
    let tags = TagRepository::list(&db).await.unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].name, "nextjs");
}

#[tokio::test]
async fn resolve_reuses_existing_rows() {
    let db = setup_db().await;

    let created = TagService::resolve(&db, "rust").await.unwrap();
    let again = TagService::resolve(&db, "rust").await.unwrap();

    assert!(created.created);
    assert!(!again.created);
    assert_eq!(created.id, again.id);
}

#[tokio::test]
async fn insert_after_a_lost_race_returns_the_winner() {
    let db = setup_db().await;
    let winner = TagService::resolve(&db, "nextjs").await.unwrap();

    // Lookup already missed; the insert then hits the unique key
    let txn = db.begin().await.unwrap();
    let recovered = TagService::create_or_recover(&txn, "nextjs").await.unwrap();
    assert_eq!(recovered, ResolvedTag { id: winner.id, created: false });

    // Only the savepoint was rolled back
    let other = TagService::resolve(&txn, "rust").await.unwrap();
    assert!(other.created);
    txn.commit().await.unwrap();

    assert_eq!(row_counts(&db).await, (0, 2, 0));
}

#[tokio::test]
async fn list_counts_posts_and_sorts_by_name() {
    let db = setup_db().await;
    TagRepository::create(&db, "zeta").await.unwrap();
    PostRepository::create(&db, "one", "c", &names(&["alpha", "mid"])).await.unwrap();
    PostRepository::create(&db, "two", "c", &names(&["alpha"])).await.unwrap();

    let listed: Vec<(String, i64)> = TagRepository::list(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|t| (t.name, t.post_count))
        .collect();

    assert_eq!(
        listed,
        vec![
            ("alpha".to_string(), 2),
            ("mid".to_string(), 1),
            ("zeta".to_string(), 0),
        ]
    );
}

#[tokio::test]
async fn update_renames_with_normalization() {
    let db = setup_db().await;
    let id = TagRepository::create(&db, "old").await.unwrap().id();

    TagRepository::update(&db, id, " New Name ").await.unwrap();

    let found = TagService::find_by_name(&db, "new name").await.unwrap().unwrap();
    assert_eq!(found.id, id);
}

#[tokio::test]
async fn update_failures() {
    let db = setup_db().await;
    let taken = TagRepository::create(&db, "taken").await.unwrap().id();
    let other = TagRepository::create(&db, "other").await.unwrap().id();

    assert!(matches!(TagRepository::update(&db, 999, "x").await, Err(AppError::NotFound(_))));
    assert!(matches!(TagRepository::update(&db, other, "").await, Err(AppError::Validation(_))));
    assert!(matches!(TagRepository::update(&db, other, "TAKEN").await, Err(AppError::TagExists(_))));

    assert_eq!(TagService::find_by_name(&db, "taken").await.unwrap().unwrap().id, taken);
    assert_eq!(TagService::find_by_name(&db, "other").await.unwrap().unwrap().id, other);
}

#[tokio::test]
async fn delete_cascades_to_associations() {
    let db = setup_db().await;
    let post = PostRepository::create(&db, "p", "c", &names(&["a", "b"])).await.unwrap();
    let a = TagService::find_by_name(&db, "a").await.unwrap().unwrap();

    TagRepository::delete(&db, a.id).await.unwrap();

    assert_eq!(row_counts(&db).await, (1, 1, 1));
    assert_eq!(PostRepository::get(&db, post).await.unwrap().tags, names(&["b"]));
    assert!(matches!(TagRepository::delete(&db, a.id).await, Err(AppError::NotFound(_))));
}
