use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::{
    parse_movie_id, validate_movie_id, validate_optional_review, validate_review,
};
use super::{ApiError, ApiJson, AppState, MessageResponse};
use crate::models::list::{WatchedEntry, WatchedItem};
use crate::services::list_service::validate_rating;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToWatchedRequest {
    pub movie_id: i64,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub rating: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub review: String,
}

/// GET /watchedlist
pub async fn get_watched_list(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<WatchedItem>>, ApiError> {
    let items = state.list_service().get_watched_list(user).await?;
    Ok(Json(items))
}

/// POST /watchedlist
pub async fn add_to_watched(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiJson(request): ApiJson<AddToWatchedRequest>,
) -> Result<(StatusCode, Json<WatchedEntry>), ApiError> {
    let movie_id = validate_movie_id(request.movie_id)?;
    let review = validate_optional_review(request.review.as_deref())?;
    let rating = validate_rating(request.rating)?;

    let upserted = state
        .list_service()
        .add_to_watched(user, movie_id, review, rating)
        .await?;

    let status = if upserted.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(upserted.entry)))
}

/// PUT /watchedlist/{movieId}/review
///
/// A movie that is not on the watched list is left alone.
pub async fn update_review(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(movie_id): Path<String>,
    ApiJson(request): ApiJson<UpdateReviewRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let movie_id = parse_movie_id(&movie_id)?;
    let review = validate_review(&request.review)?;

    let updated = state
        .list_service()
        .update_review(user, movie_id, review)
        .await?;

    if !updated {
        tracing::debug!(movie_id = %movie_id, "Review update matched no watched entry");
    }

    Ok(Json(MessageResponse::new("Review updated")))
}

/// DELETE /watchedlist/{movieId}
pub async fn remove_from_watched(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(movie_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let movie_id = parse_movie_id(&movie_id)?;
    state
        .list_service()
        .remove_from_watched(user, movie_id)
        .await?;

    Ok(Json(MessageResponse::new("Removed from watched list")))
}
