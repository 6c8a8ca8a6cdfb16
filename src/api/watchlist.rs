use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::{parse_movie_id, parse_movie_ids, validate_movie_id, validate_position};
use super::{ApiError, ApiJson, AppState, MessageResponse, MoveResponse};
use crate::models::list::{WatchlistEntry, WatchlistItem};
use crate::services::ListError;

impl From<ListError> for ApiError {
    fn from(err: ListError) -> Self {
        match err {
            ListError::MovieNotFound(id) => ApiError::not_found("Movie", id),
            ListError::NotInWatchlist(_) => {
                ApiError::NotFound("Movie not found in watch list".to_string())
            }
            ListError::AlreadyWatched(_) => {
                ApiError::Conflict("Movie is already on the watched list".to_string())
            }
            ListError::InvalidOrder(e) => ApiError::ValidationError(e.to_string()),
            ListError::Validation(msg) => ApiError::ValidationError(msg),
            ListError::Database(msg) => ApiError::DatabaseError(msg),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToWatchlistRequest {
    pub movie_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveItemRequest {
    pub movie_id: i64,
    pub position: i32,
}

/// GET /watchlist
pub async fn get_watchlist(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<WatchlistItem>>, ApiError> {
    let items = state.list_service().get_watchlist(user).await?;
    Ok(Json(items))
}

/// POST /watchlist
///
/// `201` with the new entry, or `200` with the existing one on a re-add.
pub async fn add_to_watchlist(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiJson(request): ApiJson<AddToWatchlistRequest>,
) -> Result<(StatusCode, Json<WatchlistEntry>), ApiError> {
    let movie_id = validate_movie_id(request.movie_id)?;
    let upserted = state.list_service().add_to_watchlist(user, movie_id).await?;

    let status = if upserted.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(upserted.entry)))
}

/// DELETE /watchlist/{movieId}
pub async fn remove_from_watchlist(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(movie_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let movie_id = parse_movie_id(&movie_id)?;
    state
        .list_service()
        .remove_from_watchlist(user, movie_id)
        .await?;

    Ok(Json(MessageResponse::new("Removed from watch list")))
}

/// PUT /watchlist/order
///
/// The body is read as raw JSON so a non-array `movieIds` gets its own message.
pub async fn update_order(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<serde_json::Value>,
) -> Result<Json<MessageResponse>, ApiError> {
    let movie_ids = parse_movie_ids(&body)?;
    state
        .list_service()
        .reorder_watchlist(user, &movie_ids)
        .await?;

    Ok(Json(MessageResponse::new("Watch list order updated")))
}

/// POST /watchlist/reorder
pub async fn move_item(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiJson(request): ApiJson<MoveItemRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    let movie_id = validate_movie_id(request.movie_id)?;
    let position = validate_position(request.position)?;

    let landed = state
        .list_service()
        .move_watchlist_item(user, movie_id, position)
        .await?;

    Ok(Json(MoveResponse {
        message: "Watch list order updated".to_string(),
        position: landed,
    }))
}
