//! Client-side copy of the user's lists.
//!
//! [`ListCache`] is a cloneable handle; every clone sees the same state.
//! Reordering is applied locally first and rolled back if the server refuses
//! it. Every other mutation goes to the server and then re-fetches the lists
//! it touched.

mod api;
mod error;

pub use api::{HttpListApi, ListApi};
pub use error::{Action, ClientError};

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::ordering::{move_within, position_to_index};
use crate::domain::{MovieId, Review};
use crate::models::list::{WatchedEntry, WatchedItem, WatchlistEntry, WatchlistItem};

#[derive(Debug, Default)]
struct CacheState {
    watchlist: Vec<WatchlistItem>,
    watched: Vec<WatchedItem>,
    /// Watchlist as last confirmed by the server.
    confirmed_watchlist: Vec<WatchlistItem>,
}

pub struct ListCache<A> {
    api: Arc<A>,
    state: Arc<RwLock<CacheState>>,
}

impl<A> Clone for ListCache<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
        }
    }
}

fn renumber(items: &mut [WatchlistItem]) {
    for (order, item) in (1..).zip(items.iter_mut()) {
        item.order = order;
    }
}

impl<A: ListApi> ListCache<A> {
    pub fn new(api: A) -> Self {
        Self {
            api: Arc::new(api),
            state: Arc::new(RwLock::new(CacheState::default())),
        }
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn watchlist(&self) -> Vec<WatchlistItem> {
        self.state.read().await.watchlist.clone()
    }

    pub async fn watched(&self) -> Vec<WatchedItem> {
        self.state.read().await.watched.clone()
    }

    /// Fetches both lists.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let (watchlist, watched) = tokio::try_join!(self.api.watchlist(), self.api.watched_list())?;

        let mut state = self.state.write().await;
        state.confirmed_watchlist.clone_from(&watchlist);
        state.watchlist = watchlist;
        state.watched = watched;
        Ok(())
    }

    async fn refresh_watchlist(&self) -> Result<(), ClientError> {
        let watchlist = self.api.watchlist().await?;
        let mut state = self.state.write().await;
        state.confirmed_watchlist.clone_from(&watchlist);
        state.watchlist = watchlist;
        Ok(())
    }

    async fn refresh_watched(&self) -> Result<(), ClientError> {
        let watched = self.api.watched_list().await?;
        self.state.write().await.watched = watched;
        Ok(())
    }

    /// Re-fetches after a successful mutation. A failed fetch leaves the
    /// current copy in place.
    async fn invalidate(&self, watchlist: bool, watched: bool) {
        if watchlist && let Err(e) = self.refresh_watchlist().await {
            warn!(error = %e, "Watch list refresh failed after update");
        }
        if watched && let Err(e) = self.refresh_watched().await {
            warn!(error = %e, "Watched list refresh failed after update");
        }
    }

    /// Moves the entry at 1-based position `from` to position `to`.
    ///
    /// Readers see the new order immediately. If the server rejects the move
    /// the cache re-fetches, falling back to the last confirmed order when
    /// that fails too, and the original error is returned.
    pub async fn reorder(&self, from: i32, to: i32) -> Result<i32, ClientError> {
        let (movie, target) = {
            let mut state = self.state.write().await;
            let len = state.watchlist.len();

            let Some(index) = usize::try_from(from.saturating_sub(1))
                .ok()
                .filter(|i| *i < len)
            else {
                return Err(ClientError::invalid(
                    Action::Reorder,
                    format!("No watch list entry at position {from}"),
                ));
            };

            let movie = MovieId::new(state.watchlist[index].movie_id());
            let to_index = position_to_index(to, len);
            move_within(&mut state.watchlist, index, to_index);
            renumber(&mut state.watchlist);

            (movie, i32::try_from(to_index + 1).unwrap_or(i32::MAX))
        };

        match self.api.move_watchlist_item(movie, target).await {
            Ok(landed) => {
                let mut state = self.state.write().await;
                state.confirmed_watchlist = state.watchlist.clone();
                debug!(movie_id = %movie, position = landed, "Reorder confirmed");
                Ok(landed)
            }
            Err(err) => {
                self.rollback_watchlist().await;
                Err(err)
            }
        }
    }

    async fn rollback_watchlist(&self) {
        if let Err(e) = self.refresh_watchlist().await {
            warn!(error = %e, "Could not re-fetch watch list, restoring last confirmed order");
            let mut state = self.state.write().await;
            state.watchlist = state.confirmed_watchlist.clone();
        }
    }

    pub async fn add_to_watchlist(&self, movie: MovieId) -> Result<WatchlistEntry, ClientError> {
        let entry = self.api.add_to_watchlist(movie).await?;
        self.invalidate(true, false).await;
        Ok(entry)
    }

    pub async fn remove_from_watchlist(&self, movie: MovieId) -> Result<(), ClientError> {
        self.api.remove_from_watchlist(movie).await?;
        self.invalidate(true, false).await;
        Ok(())
    }

    pub async fn move_to_watched(
        &self,
        movie: MovieId,
        review: Option<Review>,
    ) -> Result<(), ClientError> {
        self.api
            .move_to_watched(movie, review.map(Review::into_inner))
            .await?;
        self.invalidate(true, true).await;
        Ok(())
    }

    pub async fn add_to_watched(
        &self,
        movie: MovieId,
        review: Option<Review>,
        rating: Option<i32>,
    ) -> Result<WatchedEntry, ClientError> {
        let entry = self
            .api
            .add_to_watched(movie, review.map(Review::into_inner), rating)
            .await?;
        self.invalidate(true, true).await;
        Ok(entry)
    }

    pub async fn update_review(&self, movie: MovieId, review: Review) -> Result<(), ClientError> {
        self.api.update_review(movie, review.into_inner()).await?;
        self.invalidate(false, true).await;
        Ok(())
    }

    pub async fn remove_from_watched(&self, movie: MovieId) -> Result<(), ClientError> {
        self.api.remove_from_watched(movie).await?;
        self.invalidate(false, true).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ListScope;
    use crate::models::movie::{Movie, MovieDetails, SearchResult};
    use reqwest::StatusCode;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn item(id: i32, order: i32) -> WatchlistItem {
        WatchlistItem {
            movie: Movie {
                id,
                imdb_id: format!("tt{id:07}"),
                title: format!("Movie {id}"),
                year: "2000".to_string(),
                director: "Someone".to_string(),
                poster: String::new(),
                plot: String::new(),
                runtime: None,
                genre: None,
                actors: None,
            },
            order,
            added_at: "2025-01-01T00:00:00.000000Z".to_string(),
        }
    }

    fn ids(items: &[WatchlistItem]) -> Vec<(i32, i32)> {
        items.iter().map(|i| (i.movie_id(), i.order)).collect()
    }

    #[derive(Default)]
    struct FakeApi {
        watchlist: Mutex<Vec<WatchlistItem>>,
        reject_moves: AtomicBool,
        fail_fetches: AtomicBool,
        fetches: AtomicUsize,
        removes: AtomicUsize,
    }

    impl FakeApi {
        fn with_watchlist(movies: &[i32]) -> Self {
            let items = (1..).zip(movies).map(|(o, id)| item(*id, o)).collect();
            Self {
                watchlist: Mutex::new(items),
                ..Self::default()
            }
        }

        fn unavailable(action: Action) -> ClientError {
            ClientError::server(action, StatusCode::SERVICE_UNAVAILABLE, "down")
        }
    }

    #[async_trait::async_trait]
    impl ListApi for FakeApi {
        async fn search(&self, _query: &str) -> Result<Vec<SearchResult>, ClientError> {
            Ok(Vec::new())
        }

        async fn movie(&self, _imdb_id: &str) -> Result<MovieDetails, ClientError> {
            Err(Self::unavailable(Action::LoadMovie))
        }

        async fn watchlist(&self) -> Result<Vec<WatchlistItem>, ClientError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail_fetches.load(Ordering::SeqCst) {
                return Err(Self::unavailable(Action::LoadWatchlist));
            }
            Ok(self.watchlist.lock().unwrap().clone())
        }

        async fn watched_list(&self) -> Result<Vec<WatchedItem>, ClientError> {
            if self.fail_fetches.load(Ordering::SeqCst) {
                return Err(Self::unavailable(Action::LoadWatchedList));
            }
            Ok(Vec::new())
        }

        async fn add_to_watchlist(&self, _movie: MovieId) -> Result<WatchlistEntry, ClientError> {
            Err(Self::unavailable(Action::AddToWatchlist))
        }

        async fn remove_from_watchlist(&self, movie: MovieId) -> Result<(), ClientError> {
            self.removes.fetch_add(1, Ordering::SeqCst);
            let mut list = self.watchlist.lock().unwrap();
            list.retain(|i| i.movie_id() != movie.value());
            renumber(&mut list);
            Ok(())
        }

        async fn move_watchlist_item(
            &self,
            movie: MovieId,
            position: i32,
        ) -> Result<i32, ClientError> {
            if self.reject_moves.load(Ordering::SeqCst) {
                return Err(ClientError::server(
                    Action::Reorder,
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred",
                ));
            }
            let mut list = self.watchlist.lock().unwrap();
            let from = list
                .iter()
                .position(|i| i.movie_id() == movie.value())
                .unwrap();
            let to = position_to_index(position, list.len());
            move_within(&mut list, from, to);
            renumber(&mut list);
            Ok(i32::try_from(to + 1).unwrap())
        }

        async fn move_to_watched(
            &self,
            _movie: MovieId,
            _review: Option<String>,
        ) -> Result<(), ClientError> {
            Err(ClientError::server(
                Action::MoveToWatched,
                StatusCode::NOT_FOUND,
                "Movie not found in watch list",
            ))
        }

        async fn add_to_watched(
            &self,
            _movie: MovieId,
            _review: Option<String>,
            _rating: Option<i32>,
        ) -> Result<WatchedEntry, ClientError> {
            Err(Self::unavailable(Action::AddToWatched))
        }

        async fn update_review(&self, _movie: MovieId, _review: String) -> Result<(), ClientError> {
            Ok(())
        }

        async fn remove_from_watched(&self, _movie: MovieId) -> Result<(), ClientError> {
            Ok(())
        }

        async fn export_csv(&self, _scope: ListScope) -> Result<String, ClientError> {
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn reorder_applies_locally_and_keeps_dense_orders() {
        let cache = ListCache::new(FakeApi::with_watchlist(&[10, 20, 30]));
        cache.refresh().await.unwrap();

        let landed = cache.reorder(3, 1).await.unwrap();

        assert_eq!(landed, 1);
        assert_eq!(ids(&cache.watchlist().await), vec![(30, 1), (10, 2), (20, 3)]);
        assert_eq!(
            ids(&cache.api().watchlist.lock().unwrap()),
            vec![(30, 1), (10, 2), (20, 3)]
        );
    }

    #[tokio::test]
    async fn reorder_target_past_the_end_is_clamped() {
        let cache = ListCache::new(FakeApi::with_watchlist(&[10, 20, 30]));
        cache.refresh().await.unwrap();

        let landed = cache.reorder(1, 99).await.unwrap();

        assert_eq!(landed, 3);
        assert_eq!(ids(&cache.watchlist().await), vec![(20, 1), (30, 2), (10, 3)]);
    }

    #[tokio::test]
    async fn rejected_reorder_is_rolled_back_from_the_server() {
        let cache = ListCache::new(FakeApi::with_watchlist(&[10, 20, 30]));
        cache.refresh().await.unwrap();
        cache.api().reject_moves.store(true, Ordering::SeqCst);

        let err = cache.reorder(1, 3).await.unwrap_err();

        assert_eq!(err.action(), Action::Reorder);
        assert_eq!(
            err.to_string(),
            "Could not update your watch list order: A database error occurred"
        );
        assert_eq!(ids(&cache.watchlist().await), vec![(10, 1), (20, 2), (30, 3)]);
    }

    #[tokio::test]
    async fn rejected_reorder_falls_back_to_last_confirmed_order() {
        let cache = ListCache::new(FakeApi::with_watchlist(&[10, 20, 30]));
        cache.refresh().await.unwrap();
        cache.reorder(2, 1).await.unwrap();

        cache.api().reject_moves.store(true, Ordering::SeqCst);
        cache.api().fail_fetches.store(true, Ordering::SeqCst);

        assert!(cache.reorder(3, 1).await.is_err());
        assert_eq!(ids(&cache.watchlist().await), vec![(20, 1), (10, 2), (30, 3)]);
    }

    #[tokio::test]
    async fn reorder_of_missing_position_sends_nothing() {
        let cache = ListCache::new(FakeApi::with_watchlist(&[10]));
        cache.refresh().await.unwrap();
        let fetches = cache.api().fetches.load(Ordering::SeqCst);

        let err = cache.reorder(5, 1).await.unwrap_err();

        assert!(matches!(err, ClientError::Invalid { .. }));
        assert_eq!(cache.api().fetches.load(Ordering::SeqCst), fetches);
        assert_eq!(ids(&cache.watchlist().await), vec![(10, 1)]);
    }

    #[tokio::test]
    async fn remove_refetches_instead_of_editing_locally() {
        let cache = ListCache::new(FakeApi::with_watchlist(&[10, 20, 30]));
        cache.refresh().await.unwrap();

        cache.remove_from_watchlist(MovieId::new(20)).await.unwrap();

        assert_eq!(cache.api().removes.load(Ordering::SeqCst), 1);
        assert_eq!(ids(&cache.watchlist().await), vec![(10, 1), (30, 2)]);
    }

    #[tokio::test]
    async fn failed_move_to_watched_leaves_lists_alone() {
        let cache = ListCache::new(FakeApi::with_watchlist(&[10]));
        cache.refresh().await.unwrap();

        let err = cache
            .move_to_watched(MovieId::new(99), None)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Could not move movie to your watched list: Movie not found in watch list"
        );
        assert_eq!(ids(&cache.watchlist().await), vec![(10, 1)]);
        assert!(cache.watched().await.is_empty());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let cache = ListCache::new(FakeApi::with_watchlist(&[10, 20]));
        let other = cache.clone();
        cache.refresh().await.unwrap();

        assert_eq!(other.watchlist().await.len(), 2);
    }
}
