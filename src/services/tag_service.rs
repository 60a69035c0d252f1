use std::collections::HashSet;

use chrono::{SubsecRound, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::*;

use crate::entities::{post_tag, tag};
use crate::models::post_model::TagsInput;

/// Turns raw tag input into trimmed, lower-cased, de-duplicated names.
///
/// Lists are taken element by element; a single string is split on runs of
/// whitespace and/or commas. First occurrence wins the position.
pub fn normalize_tags(input: &TagsInput) -> Vec<String> {
    let raw: Vec<&str> = match input {
        TagsInput::List(items) => items.iter().map(String::as_str).collect(),
        TagsInput::Text(text) => text
            .split(|c: char| c.is_whitespace() || c == ',')
            .collect(),
        TagsInput::Missing | TagsInput::Malformed(_) => Vec::new(),
    };

    let mut seen = HashSet::new();
    raw.into_iter()
        .filter_map(normalize_tag_name)
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Normalizes a single tag name, `None` when nothing is left.
pub fn normalize_tag_name(raw: &str) -> Option<String> {
    let name = raw.trim().to_lowercase();
    (!name.is_empty()).then_some(name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTag {
    pub id: i32,
    /// `false` when the row already existed (or another writer won the race).
    pub created: bool,
}

pub struct TagService;

impl TagService {
    /// Find-or-create for an already normalized name.
    pub async fn resolve<C>(db: &C, name: &str) -> Result<ResolvedTag, DbErr>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        if let Some(existing) = Self::find_by_name(db, name).await? {
            return Ok(ResolvedTag { id: existing.id, created: false });
        }

        Self::create_or_recover(db, name).await
    }

    /// Insert step of [`TagService::resolve`], taken after a lookup miss.
    ///
    /// Losing the insert to a concurrent writer is not an error: the savepoint
    /// is rolled back and the winner's id is returned with `created: false`.
    pub async fn create_or_recover<C>(db: &C, name: &str) -> Result<ResolvedTag, DbErr>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let savepoint = db.begin().await?;
        let inserted = tag::ActiveModel {
            id: NotSet,
            name: Set(name.to_owned()),
            created_at: Set(Utc::now().trunc_subsecs(0)),
        }
        .insert(&savepoint)
        .await;

        match inserted {
            Ok(model) => {
                savepoint.commit().await?;
                tracing::debug!(tag_id = model.id, name, "created tag");
                Ok(ResolvedTag { id: model.id, created: true })
            }
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                savepoint.rollback().await?;
                tracing::debug!(name, "tag inserted concurrently, reading winner");

                // Locking read so repeatable-read snapshots still see the committed winner
                let winner = tag::Entity::find()
                    .filter(tag::Column::Name.eq(name))
                    .lock_shared()
                    .one(db)
                    .await?;

                match winner {
                    Some(model) => Ok(ResolvedTag { id: model.id, created: false }),
                    None => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Makes the post's associations exactly `names`.
    ///
    /// Must run on the same transaction as the post write it accompanies.
    pub async fn sync_post_tags<C>(db: &C, post_id: i32, names: &[String]) -> Result<(), DbErr>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let mut tag_ids = Vec::with_capacity(names.len());
        for name in names {
            let resolved = Self::resolve(db, name).await?;
            if !tag_ids.contains(&resolved.id) {
                tag_ids.push(resolved.id);
            }
        }

        post_tag::Entity::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(db)
            .await?;

        if tag_ids.is_empty() {
            return Ok(());
        }

        let links = tag_ids.into_iter().map(|tag_id| post_tag::ActiveModel {
            post_id: Set(post_id),
            tag_id: Set(tag_id),
        });

        // Re-inserting an existing pair is a no-op update of the key itself
        post_tag::Entity::insert_many(links)
            .on_conflict(
                OnConflict::columns([post_tag::Column::PostId, post_tag::Column::TagId])
                    .update_column(post_tag::Column::TagId)
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        Ok(())
    }

    pub async fn find_by_name<C>(db: &C, name: &str) -> Result<Option<tag::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        tag::Entity::find()
            .filter(tag::Column::Name.eq(name))
            .one(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> TagsInput {
        TagsInput::Text(s.to_string())
    }

    #[test]
    fn splits_on_commas_and_whitespace() {
        assert_eq!(normalize_tags(&text("Go, go , Rust")), vec!["go", "rust"]);
        assert_eq!(
            normalize_tags(&text("  web,,api\tbackend\n,Web ")),
            vec!["web", "api", "backend"]
        );
    }

    #[test]
    fn list_elements_are_trimmed_not_split() {
        let input = TagsInput::List(vec![
            " Next JS ".to_string(),
            "".to_string(),
            "next js".to_string(),
            "RUST".to_string(),
        ]);
        assert_eq!(normalize_tags(&input), vec!["next js", "rust"]);
    }

    #[test]
    fn missing_and_malformed_degrade_to_empty() {
        assert!(normalize_tags(&TagsInput::Missing).is_empty());
        assert!(normalize_tags(&text(" , ,  ")).is_empty());

        let malformed: TagsInput = serde_json::from_str("42").unwrap();
        assert!(normalize_tags(&malformed).is_empty());
    }

    #[test]
    fn deserializes_every_accepted_shape() {
        let list: TagsInput = serde_json::from_str(r#"["A","b"]"#).unwrap();
        assert_eq!(normalize_tags(&list), vec!["a", "b"]);

        let string: TagsInput = serde_json::from_str(r#""A b""#).unwrap();
        assert_eq!(normalize_tags(&string), vec!["a", "b"]);

        let null: TagsInput = serde_json::from_str("null").unwrap();
        assert!(normalize_tags(&null).is_empty());

        let mixed: TagsInput = serde_json::from_str(r#"["ok", 3]"#).unwrap();
        assert!(normalize_tags(&mixed).is_empty());
    }

    #[test]
    fn output_is_clean() {
        let out = normalize_tags(&text("Ä,ä  B,b , c C"));
        let unique: HashSet<_> = out.iter().collect();
        assert_eq!(unique.len(), out.len());
        for name in &out {
            assert!(!name.is_empty());
            assert_eq!(name, &name.trim().to_lowercase());
        }
    }

    #[test]
    fn single_name_normalization() {
        assert_eq!(normalize_tag_name("  NextJS "), Some("nextjs".to_string()));
        assert_eq!(normalize_tag_name(" \t "), None);
    }
}
