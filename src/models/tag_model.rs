use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct TagRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(custom(function = "crate::utils::validator_utils::validate_name_length"))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagSummary {
    pub id: i32,
    pub name: String,
}

/// Row of the tag usage listing.
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct TagUsage {
    pub id: i32,
    pub name: String,
    #[serde(rename = "postCount")]
    pub post_count: i64,
}

#[derive(Serialize)]
pub struct TagListResponse {
    pub tags: Vec<TagUsage>,
}

/// Outcome of the idempotent tag create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagCreation {
    Created(i32),
    Existing(i32),
}

impl TagCreation {
    pub fn id(self) -> i32 {
        match self {
            Self::Created(id) | Self::Existing(id) => id,
        }
    }
}
