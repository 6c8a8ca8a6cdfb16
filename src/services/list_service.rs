//! Domain service for the per-user watchlist and watched list.
//!
//! Owns the ordering rules (dense `1..=N` positions) and the
//! `absent -> watchlisted -> watched` transitions. Every multi-statement
//! mutation is a single database transaction in the store.

use crate::domain::ordering::OrderingError;
use crate::domain::{MovieId, RATING_RANGE, Review, UserId};
use crate::models::list::{WatchedEntry, WatchedItem, WatchlistEntry, WatchlistItem};
use thiserror::Error;

/// Errors for list operations.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("Movie not found: {0}")]
    MovieNotFound(MovieId),

    #[error("Movie {0} is not on the watch list")]
    NotInWatchlist(MovieId),

    #[error("Movie {0} is already on the watched list")]
    AlreadyWatched(MovieId),

    #[error("Invalid watch list order: {0}")]
    InvalidOrder(#[from] OrderingError),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for ListError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ListError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Result of an add that may find the entry already present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upserted<T> {
    pub entry: T,
    /// `false` when an existing entry was returned or updated.
    pub created: bool,
}

/// Checks a rating against [`RATING_RANGE`].
pub fn validate_rating(rating: Option<i32>) -> Result<Option<i32>, ListError> {
    match rating {
        Some(r) if !RATING_RANGE.contains(&r) => Err(ListError::Validation(format!(
            "Rating must be between {} and {}",
            RATING_RANGE.start(),
            RATING_RANGE.end()
        ))),
        other => Ok(other),
    }
}

#[async_trait::async_trait]
pub trait ListService: Send + Sync {
    /// Watchlist movies in ascending `order`.
    async fn get_watchlist(&self, user: UserId) -> Result<Vec<WatchlistItem>, ListError>;

    /// Watched movies, most recently watched first.
    async fn get_watched_list(&self, user: UserId) -> Result<Vec<WatchedItem>, ListError>;

    /// Appends a movie to the watchlist.
    ///
    /// Idempotent: an existing entry is returned unchanged.
    ///
    /// # Errors
    ///
    /// - [`ListError::MovieNotFound`] if the movie is not stored
    /// - [`ListError::AlreadyWatched`] if the movie is on the watched list
    async fn add_to_watchlist(
        &self,
        user: UserId,
        movie: MovieId,
    ) -> Result<Upserted<WatchlistEntry>, ListError>;

    /// Removes a movie and renumbers the rest. Absent pairs are a no-op.
    async fn remove_from_watchlist(&self, user: UserId, movie: MovieId) -> Result<(), ListError>;

    /// Replaces the whole ordering.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidOrder`] unless `movies` is a permutation of the
    /// current watchlist; nothing is written in that case.
    async fn reorder_watchlist(&self, user: UserId, movies: &[MovieId]) -> Result<(), ListError>;

    /// Moves one movie to a 1-based position and returns where it landed.
    async fn move_watchlist_item(
        &self,
        user: UserId,
        movie: MovieId,
        position: i32,
    ) -> Result<i32, ListError>;

    /// Atomically moves a watchlist entry to the watched list.
    ///
    /// # Errors
    ///
    /// [`ListError::NotInWatchlist`] if the pair is not on the watchlist.
    async fn move_to_watched(
        &self,
        user: UserId,
        movie: MovieId,
        review: Option<Review>,
    ) -> Result<WatchedEntry, ListError>;

    /// Adds straight to the watched list, dropping any watchlist entry.
    async fn add_to_watched(
        &self,
        user: UserId,
        movie: MovieId,
        review: Option<Review>,
        rating: Option<i32>,
    ) -> Result<Upserted<WatchedEntry>, ListError>;

    /// Overwrites a review. Returns `false` when there is no watched entry.
    async fn update_review(
        &self,
        user: UserId,
        movie: MovieId,
        review: Review,
    ) -> Result<bool, ListError>;

    async fn remove_from_watched(&self, user: UserId, movie: MovieId) -> Result<(), ListError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert_eq!(validate_rating(None).unwrap(), None);
        assert_eq!(validate_rating(Some(1)).unwrap(), Some(1));
        assert_eq!(validate_rating(Some(10)).unwrap(), Some(10));
        assert!(matches!(
            validate_rating(Some(0)),
            Err(ListError::Validation(_))
        ));
        assert!(matches!(
            validate_rating(Some(11)),
            Err(ListError::Validation(_))
        ));
    }
}
