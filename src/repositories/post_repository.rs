use chrono::{DateTime, SubsecRound, Utc};
use sea_orm::sea_query::{Expr, Query};
use sea_orm::*;

use crate::entities::{post, post::Entity as Post, post_tag, tag};
use crate::models::post_model::PostWithTags;
use crate::models::tag_model::TagSummary;
use crate::services::tag_service::TagService;
use crate::utils::app_error::{AppError, AppResult};
use crate::utils::validator_utils::{exceeds_name_length, MAX_NAME_LENGTH};

pub struct PostRepository;

impl PostRepository {
    /// Inserts the post and links its tags in one transaction.
    ///
    /// `tags` must already be normalized.
    pub async fn create(
        db: &DatabaseConnection,
        name: &str,
        content: &str,
        tags: &[String],
    ) -> AppResult<i32> {
        let (name, content) = Self::validate(name, content, tags)?;

        let txn = db.begin().await?;

        let now = Self::now();
        let saved = post::ActiveModel {
            id: NotSet,
            name: Set(name),
            content: Set(content),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        TagService::sync_post_tags(&txn, saved.id, tags).await?;

        txn.commit().await?;
        tracing::info!(post_id = saved.id, tags = tags.len(), "post created");

        Ok(saved.id)
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<PostWithTags> {
        let model = Post::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| Self::not_found(id))?;

        let tags = model
            .find_related(tag::Entity)
            .order_by_asc(tag::Column::Name)
            .all(db)
            .await?;

        Ok(Self::map_to_response(model, tags))
    }

    /// Rewrites name/content and replaces the tag set.
    ///
    /// Existence is decided by the affected-row count of the UPDATE itself.
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        name: &str,
        content: &str,
        tags: &[String],
    ) -> AppResult<()> {
        let (name, content) = Self::validate(name, content, tags)?;

        let txn = db.begin().await?;

        let res = Post::update_many()
            .col_expr(post::Column::Name, Expr::value(name))
            .col_expr(post::Column::Content, Expr::value(content))
            .col_expr(post::Column::UpdatedAt, Expr::value(Self::now()))
            .filter(post::Column::Id.eq(id))
            .exec(&txn)
            .await?;

        if res.rows_affected == 0 {
            // dropping `txn` rolls it back
            tracing::warn!(post_id = id, "update on missing post");
            return Err(Self::not_found(id));
        }

        TagService::sync_post_tags(&txn, id, tags).await?;

        txn.commit().await?;
        tracing::info!(post_id = id, tags = tags.len(), "post updated");

        Ok(())
    }

    /// Associations go with the row through the `ON DELETE CASCADE` key.
    pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<()> {
        let txn = db.begin().await?;

        let res = Post::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected == 0 {
            tracing::warn!(post_id = id, "delete on missing post");
            return Err(Self::not_found(id));
        }

        txn.commit().await?;
        tracing::info!(post_id = id, "post deleted");

        Ok(())
    }

    /// All posts, newest first.
    pub async fn list(db: &DatabaseConnection) -> AppResult<Vec<PostWithTags>> {
        Self::load_with_tags(db, Post::find()).await
    }

    /// Posts carrying `tag_id`, newest first, each with all of its tags.
    pub async fn list_by_tag(
        db: &DatabaseConnection,
        tag_id: i32,
    ) -> AppResult<(TagSummary, Vec<PostWithTags>)> {
        let tag = tag::Entity::find_by_id(tag_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tag {} not found", tag_id)))?;

        let tagged = Query::select()
            .column(post_tag::Column::PostId)
            .from(post_tag::Entity)
            .and_where(post_tag::Column::TagId.eq(tag_id))
            .to_owned();

        let posts = Self::load_with_tags(db, Post::find().filter(post::Column::Id.in_subquery(tagged))).await?;

        Ok((TagSummary { id: tag.id, name: tag.name }, posts))
    }

    async fn load_with_tags(
        db: &DatabaseConnection,
        query: Select<Post>,
    ) -> AppResult<Vec<PostWithTags>> {
        let posts = query
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(db)
            .await?;

        let tags = posts
            .load_many_to_many(tag::Entity, post_tag::Entity, db)
            .await?;

        Ok(posts
            .into_iter()
            .zip(tags)
            .map(|(model, tags)| Self::map_to_response(model, tags))
            .collect())
    }

    fn validate(name: &str, content: &str, tags: &[String]) -> AppResult<(String, String)> {
        let name = name.trim();
        let content = content.trim();
        if name.is_empty() || content.is_empty() {
            return Err(AppError::Validation("name and content are required".to_string()));
        }
        if exceeds_name_length(name) {
            return Err(AppError::Validation(format!(
                "name must be at most {MAX_NAME_LENGTH} characters"
            )));
        }
        if tags.iter().any(|tag| exceeds_name_length(tag)) {
            return Err(AppError::Validation(format!(
                "tag names must be at most {MAX_NAME_LENGTH} characters"
            )));
        }
        Ok((name.to_string(), content.to_string()))
    }

    // MySQL TIMESTAMP columns keep whole seconds
    fn now() -> DateTime<Utc> {
        Utc::now().trunc_subsecs(0)
    }

    fn not_found(id: i32) -> AppError {
        AppError::NotFound(format!("Post {} not found", id))
    }

    fn map_to_response(model: post::Model, tags: Vec<tag::Model>) -> PostWithTags {
        let mut names: Vec<String> = tags.into_iter().map(|t| t.name).collect();
        names.sort();
        names.dedup();

        PostWithTags {
            id: model.id,
            name: model.name,
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
            tags: names,
        }
    }
}
