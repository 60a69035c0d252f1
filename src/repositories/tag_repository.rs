use sea_orm::sea_query::Expr;
use sea_orm::*;

use crate::entities::{post_tag, tag, tag::Entity as Tag};
use crate::models::tag_model::{TagCreation, TagUsage};
use crate::services::tag_service::{normalize_tag_name, TagService};
use crate::utils::app_error::{AppError, AppResult};
use crate::utils::validator_utils::{exceeds_name_length, MAX_NAME_LENGTH};

pub struct TagRepository;

impl TagRepository {
    /// Idempotent: an identically normalized tag is reported as `Existing`.
    pub async fn create(db: &DatabaseConnection, name: &str) -> AppResult<TagCreation> {
        let name = Self::normalized(name)?;

        let txn = db.begin().await?;
        let resolved = TagService::resolve(&txn, &name).await?;
        txn.commit().await?;

        Ok(if resolved.created {
            tracing::info!(tag_id = resolved.id, %name, "tag created");
            TagCreation::Created(resolved.id)
        } else {
            TagCreation::Existing(resolved.id)
        })
    }

    pub async fn update(db: &DatabaseConnection, id: i32, name: &str) -> AppResult<()> {
        let name = Self::normalized(name)?;

        let res = Tag::update_many()
            .col_expr(tag::Column::Name, Expr::value(name.clone()))
            .filter(tag::Column::Id.eq(id))
            .exec(db)
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(AppError::TagExists(format!("Tag '{}' already exists", name)));
            }
            Err(err) => return Err(err.into()),
        };

        if res.rows_affected == 0 {
            return Err(Self::not_found(id));
        }

        tracing::info!(tag_id = id, %name, "tag renamed");
        Ok(())
    }

    /// Associations go with the row through the `ON DELETE CASCADE` key.
    pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<()> {
        let res = Tag::delete_by_id(id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(Self::not_found(id));
        }

        tracing::info!(tag_id = id, "tag deleted");
        Ok(())
    }

    /// Every tag with the number of posts using it, by name.
    pub async fn list(db: &DatabaseConnection) -> AppResult<Vec<TagUsage>> {
        let rows = Tag::find()
            .select_only()
            .column(tag::Column::Id)
            .column(tag::Column::Name)
            .column_as(Expr::col((post_tag::Entity, post_tag::Column::PostId)).count(), "post_count")
            .join(JoinType::LeftJoin, tag::Relation::PostTag.def())
            .group_by(tag::Column::Id)
            .group_by(tag::Column::Name)
            .order_by_asc(tag::Column::Name)
            .into_model::<TagUsage>()
            .all(db)
            .await?;

        Ok(rows)
    }

    fn normalized(name: &str) -> AppResult<String> {
        let name = normalize_tag_name(name)
            .ok_or_else(|| AppError::Validation("Tag name is required".to_string()))?;
        if exceeds_name_length(&name) {
            return Err(AppError::Validation(format!(
                "Tag name must be at most {MAX_NAME_LENGTH} characters"
            )));
        }
        Ok(name)
    }

    fn not_found(id: i32) -> AppError {
        AppError::NotFound(format!("Tag {} not found", id))
    }
}
