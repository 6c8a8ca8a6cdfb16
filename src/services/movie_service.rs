//! Domain service for movie lookup.
//!
//! Searches go straight to the metadata provider. Details are fetched once,
//! stored, and served from the database afterwards.

use crate::domain::UserId;
use crate::models::movie::{MovieDetails, SearchResult};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Movie not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("External API error: {service} - {message}")]
    ExternalApi { service: String, message: String },

    #[error("Database error: {0}")]
    Database(String),
}

impl MovieError {
    /// Creates an external API error for OMDB.
    pub fn omdb_error(msg: impl Into<String>) -> Self {
        Self::ExternalApi {
            service: "OMDB".to_string(),
            message: msg.into(),
        }
    }
}

impl From<sea_orm::DbErr> for MovieError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// Title search. Not cached.
    ///
    /// # Errors
    ///
    /// - [`MovieError::Validation`] for a blank query
    /// - [`MovieError::ExternalApi`] if the provider call fails
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MovieError>;

    /// Details by external id, decorated with the user's list state.
    ///
    /// Unknown movies are fetched from the provider and stored first.
    ///
    /// # Errors
    ///
    /// - [`MovieError::NotFound`] if the provider has no such movie
    /// - [`MovieError::ExternalApi`] if the provider call fails
    async fn get_details(&self, user: UserId, imdb_id: &str) -> Result<MovieDetails, MovieError>;
}
