use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::parse_list_scope;
use super::{ApiError, AppState};
use crate::services::{EXPORT_FILENAME, ExportError};

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Database(msg) => ApiError::DatabaseError(msg),
            ExportError::Csv(msg) => ApiError::InternalError(msg),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub list: Option<String>,
}

/// GET /export/csv?list=watched|watchlist|all
pub async fn export_csv(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let scope = parse_list_scope(params.list.as_deref())?;
    let csv = state.export_service().export_csv(user, scope).await?;

    let disposition = format!("attachment; filename=\"{EXPORT_FILENAME}\"");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}
