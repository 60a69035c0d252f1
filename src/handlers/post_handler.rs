use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use crate::config::AppState;
use crate::models::post_model::*;
use crate::repositories::post_repository::PostRepository;
use crate::services::tag_service::normalize_tags;
use crate::utils::api_response::{ResponseBuilder, WriteAck};
use crate::utils::validated_wrapper::ValidatedBody;
use crate::utils::validator_utils::parse_id;

pub async fn list_posts_handler(
    State(state): State<AppState>,
    Query(params): Query<PostFilterParams>,
) -> impl IntoResponse {
    if let Some(raw) = params.tag_id {
        let tag_id = match parse_id(&raw) {
            Ok(id) => id,
            Err(err) => return err.into_response(),
        };
        return match PostRepository::list_by_tag(&state.db, tag_id).await {
            Ok((tag, posts)) => ResponseBuilder::success(PostsByTagResponse { tag, posts }).into_response(),
            Err(err) => err.into_response(),
        };
    }

    match PostRepository::list(&state.db).await {
        Ok(posts) => ResponseBuilder::success(PostListResponse { posts }).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };

    match PostRepository::get(&state.db, id).await {
        Ok(post) => ResponseBuilder::success(post).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn create_post_handler(
    State(state): State<AppState>,
    ValidatedBody(payload): ValidatedBody<PostRequest>,
) -> impl IntoResponse {
    let tags = normalize_tags(&payload.tags);

    match PostRepository::create(&state.db, &payload.name, &payload.content, &tags).await {
        Ok(id) => ResponseBuilder::created(WriteAck::created(id)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn update_post_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedBody(payload): ValidatedBody<PostRequest>,
) -> impl IntoResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };
    let tags = normalize_tags(&payload.tags);

    match PostRepository::update(&state.db, id, &payload.name, &payload.content, &tags).await {
        Ok(()) => ResponseBuilder::success(WriteAck::updated(id)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_post_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };

    match PostRepository::delete(&state.db, id).await {
        Ok(()) => ResponseBuilder::no_content(),
        Err(err) => err.into_response(),
    }
}
