use chrono::{DateTime, Utc};
use serde::{de::IgnoredAny, Deserialize, Serialize};
use validator::Validate;

use crate::models::tag_model::TagSummary;

/// Raw `tags` input as submitted by clients.
#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    /// Whitespace and/or comma separated, e.g. `"rust, web  api"`.
    Text(String),
    #[default]
    Missing,
    /// Any other JSON shape; treated as no tags.
    Malformed(IgnoredAny),
}

#[derive(Debug, Deserialize, Validate)]
pub struct PostRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(custom(function = "crate::utils::validator_utils::validate_name_length"))]
    pub name: String,

    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    pub content: String,

    #[serde(default)]
    pub tags: TagsInput,
}

#[derive(Debug, Deserialize)]
pub struct PostFilterParams {
    #[serde(rename = "tagId")]
    pub tag_id: Option<String>,
}

/// A post with the names of every tag attached to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostWithTags {
    pub id: i32,
    pub name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

#[derive(Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostWithTags>,
}

#[derive(Serialize)]
pub struct PostsByTagResponse {
    pub tag: TagSummary,
    pub posts: Vec<PostWithTags>,
}
