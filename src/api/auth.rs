use axum::{
    Json,
    extract::{FromRequestParts, State},
    http::request::Parts,
};
use std::sync::Arc;

use super::{ApiError, AppState, MessageResponse};
use crate::db::User;
use crate::domain::UserId;

/// The user a request acts as.
///
/// Every request currently resolves to the configured default user. This is
/// the single place a session or token lookup would go.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub UserId);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user = state.default_user;
        tracing::Span::current().record("user_id", user.value());
        Ok(Self(user))
    }
}

/// GET /me
pub async fn me(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<User>, ApiError> {
    let found = state
        .store()
        .get_user(user.value())
        .await?
        .ok_or_else(|| ApiError::not_found("User", user))?;

    Ok(Json(found))
}

/// POST /login
pub async fn login() -> Json<MessageResponse> {
    Json(MessageResponse::new("Login is not required"))
}

/// POST /logout
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("Logout is not required"))
}
