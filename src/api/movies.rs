use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::{
    parse_movie_id, validate_external_id, validate_optional_review, validate_search_query,
};
use super::{ApiError, ApiJson, AppState, MessageResponse, SearchResponse};
use crate::models::movie::MovieDetails;
use crate::services::MovieError;

impl From<MovieError> for ApiError {
    fn from(err: MovieError) -> Self {
        match err {
            MovieError::NotFound(id) => ApiError::NotFound(format!("Movie {id} not found")),
            MovieError::Validation(msg) => ApiError::ValidationError(msg),
            MovieError::ExternalApi { service, message } => {
                ApiError::ExternalApiError { service, message }
            }
            MovieError::Database(msg) => ApiError::DatabaseError(msg),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MoveToWatchedRequest {
    #[serde(default)]
    pub review: Option<String>,
}

/// GET /movies/search?query=
pub async fn search_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = validate_search_query(params.query.as_deref())?;
    let results = state.movie_service().search(query).await?;

    Ok(Json(SearchResponse { results }))
}

/// GET /movies/{externalId}
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(external_id): Path<String>,
) -> Result<Json<MovieDetails>, ApiError> {
    let external_id = validate_external_id(&external_id)?;
    let details = state.movie_service().get_details(user, external_id).await?;

    Ok(Json(details))
}

/// POST /movies/{movieId}/move-to-watched
pub async fn move_to_watched(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(movie_id): Path<String>,
    request: Option<ApiJson<MoveToWatchedRequest>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = request.map(|ApiJson(r)| r).unwrap_or_default();
    let movie_id = parse_movie_id(&movie_id)?;
    let review = validate_optional_review(request.review.as_deref())?;

    state
        .list_service()
        .move_to_watched(user, movie_id, review)
        .await?;

    Ok(Json(MessageResponse::new("Moved to watched list")))
}
