use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use crate::config::AppState;
use crate::models::tag_model::*;
use crate::repositories::tag_repository::TagRepository;
use crate::utils::api_response::{ResponseBuilder, WriteAck};
use crate::utils::validated_wrapper::ValidatedBody;
use crate::utils::validator_utils::parse_id;

pub async fn list_tags_handler(
    State(state): State<AppState>,
) -> impl IntoResponse {
    match TagRepository::list(&state.db).await {
        Ok(tags) => ResponseBuilder::success(TagListResponse { tags }).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn create_tag_handler(
    State(state): State<AppState>,
    ValidatedBody(payload): ValidatedBody<TagRequest>,
) -> impl IntoResponse {
    match TagRepository::create(&state.db, &payload.name).await {
        Ok(TagCreation::Created(id)) => ResponseBuilder::created(WriteAck::created(id)).into_response(),
        Ok(TagCreation::Existing(id)) => ResponseBuilder::success(WriteAck::exists(id)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_tag_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedBody(payload): ValidatedBody<TagRequest>,
) -> impl IntoResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };

    match TagRepository::update(&state.db, id, &payload.name).await {
        Ok(()) => ResponseBuilder::success(WriteAck::updated(id)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_tag_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };

    match TagRepository::delete(&state.db, id).await {
        Ok(()) => ResponseBuilder::no_content(),
        Err(err) => err.into_response(),
    }
}
