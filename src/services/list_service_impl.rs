//! `SeaORM` implementation of the [`ListService`] trait.

use crate::db::{AddToWatched, AddToWatchlist, ReorderWatchlist, Store};
use crate::domain::{MovieId, Review, UserId};
use crate::models::list::{WatchedEntry, WatchedItem, WatchlistEntry, WatchlistItem};
use crate::services::list_service::{ListError, ListService, Upserted, validate_rating};
use std::sync::Arc;
use tracing::{debug, info};

pub struct SeaOrmListService {
    store: Arc<Store>,
}

impl SeaOrmListService {
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl ListService for SeaOrmListService {
    async fn get_watchlist(&self, user: UserId) -> Result<Vec<WatchlistItem>, ListError> {
        Ok(self.store.get_watchlist(user.value()).await?)
    }

    async fn get_watched_list(&self, user: UserId) -> Result<Vec<WatchedItem>, ListError> {
        Ok(self.store.get_watched_list(user.value()).await?)
    }

    async fn add_to_watchlist(
        &self,
        user: UserId,
        movie: MovieId,
    ) -> Result<Upserted<WatchlistEntry>, ListError> {
        match self
            .store
            .add_to_watchlist(user.value(), movie.value())
            .await?
        {
            AddToWatchlist::Added(entry) => {
                info!(user = %user, movie = %movie, order = entry.order, "Added to watch list");
                Ok(Upserted {
                    entry,
                    created: true,
                })
            }
            AddToWatchlist::Existing(entry) => Ok(Upserted {
                entry,
                created: false,
            }),
            AddToWatchlist::AlreadyWatched => Err(ListError::AlreadyWatched(movie)),
            AddToWatchlist::MovieMissing => Err(ListError::MovieNotFound(movie)),
        }
    }

    async fn remove_from_watchlist(&self, user: UserId, movie: MovieId) -> Result<(), ListError> {
        let removed = self
            .store
            .remove_from_watchlist(user.value(), movie.value())
            .await?;

        if removed {
            info!(user = %user, movie = %movie, "Removed from watch list");
        } else {
            debug!(user = %user, movie = %movie, "Remove skipped, not on watch list");
        }
        Ok(())
    }

    async fn reorder_watchlist(&self, user: UserId, movies: &[MovieId]) -> Result<(), ListError> {
        let ids: Vec<i32> = movies.iter().map(MovieId::value).collect();

        match self.store.reorder_watchlist(user.value(), &ids).await? {
            ReorderWatchlist::Applied => {
                info!(user = %user, count = ids.len(), "Watch list order updated");
                Ok(())
            }
            ReorderWatchlist::Rejected(e) => Err(ListError::InvalidOrder(e)),
        }
    }

    async fn move_watchlist_item(
        &self,
        user: UserId,
        movie: MovieId,
        position: i32,
    ) -> Result<i32, ListError> {
        let landed = self
            .store
            .move_watchlist_item(user.value(), movie.value(), position)
            .await?
            .ok_or(ListError::NotInWatchlist(movie))?;

        info!(user = %user, movie = %movie, position = landed, "Moved within watch list");
        Ok(landed)
    }

    async fn move_to_watched(
        &self,
        user: UserId,
        movie: MovieId,
        review: Option<Review>,
    ) -> Result<WatchedEntry, ListError> {
        let entry = self
            .store
            .move_to_watched(user.value(), movie.value(), review.map(Review::into_inner))
            .await?
            .ok_or(ListError::NotInWatchlist(movie))?;

        info!(user = %user, movie = %movie, "Moved to watched list");
        Ok(entry)
    }

    async fn add_to_watched(
        &self,
        user: UserId,
        movie: MovieId,
        review: Option<Review>,
        rating: Option<i32>,
    ) -> Result<Upserted<WatchedEntry>, ListError> {
        let rating = validate_rating(rating)?;

        match self
            .store
            .add_to_watched(
                user.value(),
                movie.value(),
                review.map(Review::into_inner),
                rating,
            )
            .await?
        {
            AddToWatched::Added(entry) => {
                info!(user = %user, movie = %movie, "Added to watched list");
                Ok(Upserted {
                    entry,
                    created: true,
                })
            }
            AddToWatched::Updated(entry) => Ok(Upserted {
                entry,
                created: false,
            }),
            AddToWatched::MovieMissing => Err(ListError::MovieNotFound(movie)),
        }
    }

    async fn update_review(
        &self,
        user: UserId,
        movie: MovieId,
        review: Review,
    ) -> Result<bool, ListError> {
        let updated = self
            .store
            .update_review(user.value(), movie.value(), review.as_str())
            .await?;

        if !updated {
            debug!(user = %user, movie = %movie, "Review update skipped, not on watched list");
        }
        Ok(updated)
    }

    async fn remove_from_watched(&self, user: UserId, movie: MovieId) -> Result<(), ListError> {
        let removed = self
            .store
            .remove_from_watched(user.value(), movie.value())
            .await?;

        if removed {
            info!(user = %user, movie = %movie, "Removed from watched list");
        }
        Ok(())
    }
}
