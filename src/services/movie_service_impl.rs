use crate::clients::MetadataProvider;
use crate::db::Store;
use crate::domain::UserId;
use crate::models::movie::{Movie, MovieDetails, SearchResult};
use crate::services::movie_service::{MovieError, MovieService};
use std::sync::Arc;
use tracing::{info, warn};

pub struct SeaOrmMovieService {
    store: Arc<Store>,
    provider: Arc<dyn MetadataProvider>,
}

impl SeaOrmMovieService {
    #[must_use]
    pub fn new(store: Arc<Store>, provider: Arc<dyn MetadataProvider>) -> Self {
        Self { store, provider }
    }

    async fn load_or_fetch(&self, imdb_id: &str) -> Result<Movie, MovieError> {
        if let Some(movie) = self
            .store
            .get_movie_by_imdb_id(imdb_id)
            .await
            .map_err(|e| MovieError::Database(e.to_string()))?
        {
            return Ok(movie);
        }

        let fetched = self
            .provider
            .details(imdb_id)
            .await
            .map_err(|e| {
                warn!(imdb_id, error = %e, "OMDB details lookup failed");
                MovieError::omdb_error(e.to_string())
            })?
            .ok_or_else(|| MovieError::NotFound(imdb_id.to_string()))?;

        let movie = self
            .store
            .insert_movie(fetched)
            .await
            .map_err(|e| MovieError::Database(e.to_string()))?;

        info!(imdb_id, id = movie.id, title = %movie.title, "Stored movie details");
        Ok(movie)
    }
}

#[async_trait::async_trait]
impl MovieService for SeaOrmMovieService {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MovieError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(MovieError::Validation(
                "Search query cannot be empty".to_string(),
            ));
        }

        self.provider.search(query).await.map_err(|e| {
            warn!(query, error = %e, "OMDB search failed");
            MovieError::omdb_error(e.to_string())
        })
    }

    async fn get_details(&self, user: UserId, imdb_id: &str) -> Result<MovieDetails, MovieError> {
        let movie = self.load_or_fetch(imdb_id).await?;

        let (watchlist, watched) = tokio::join!(
            self.store.get_watchlist_entry(user.value(), movie.id),
            self.store.get_watched_entry(user.value(), movie.id)
        );
        let watchlist = watchlist.map_err(|e| MovieError::Database(e.to_string()))?;
        let watched = watched.map_err(|e| MovieError::Database(e.to_string()))?;

        Ok(MovieDetails {
            movie,
            in_watch_list: watchlist.is_some(),
            in_watched_list: watched.is_some(),
            order: watchlist.map(|w| w.order),
            watched_date: watched.as_ref().map(|w| w.watched_date.clone()),
            review: watched.and_then(|w| w.review),
        })
    }
}
