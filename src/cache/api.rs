use anyhow::Context;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{Action, ClientError};
use crate::api::{MessageResponse, MoveResponse, SearchResponse};
use crate::config::ClientConfig;
use crate::domain::{ListScope, MovieId};
use crate::models::list::{WatchedEntry, WatchedItem, WatchlistEntry, WatchlistItem};
use crate::models::movie::{MovieDetails, SearchResult};

/// Calls the list cache makes against the server.
#[async_trait::async_trait]
pub trait ListApi: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ClientError>;

    async fn movie(&self, imdb_id: &str) -> Result<MovieDetails, ClientError>;

    async fn watchlist(&self) -> Result<Vec<WatchlistItem>, ClientError>;

    async fn watched_list(&self) -> Result<Vec<WatchedItem>, ClientError>;

    async fn add_to_watchlist(&self, movie: MovieId) -> Result<WatchlistEntry, ClientError>;

    async fn remove_from_watchlist(&self, movie: MovieId) -> Result<(), ClientError>;

    /// Moves one entry to a 1-based position; returns where it landed.
    async fn move_watchlist_item(&self, movie: MovieId, position: i32) -> Result<i32, ClientError>;

    async fn move_to_watched(
        &self,
        movie: MovieId,
        review: Option<String>,
    ) -> Result<(), ClientError>;

    async fn add_to_watched(
        &self,
        movie: MovieId,
        review: Option<String>,
        rating: Option<i32>,
    ) -> Result<WatchedEntry, ClientError>;

    async fn update_review(&self, movie: MovieId, review: String) -> Result<(), ClientError>;

    async fn remove_from_watched(&self, movie: MovieId) -> Result<(), ClientError>;

    async fn export_csv(&self, scope: ListScope) -> Result<String, ClientError>;
}

/// [`ListApi`] over HTTP against a running server.
#[derive(Clone)]
pub struct HttpListApi {
    client: Client,
    base_url: Url,
}

impl HttpListApi {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(concat!("cinema-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        let mut raw = config.server_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url =
            Url::parse(&raw).with_context(|| format!("Invalid server URL: {}", config.server_url))?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, action: Action, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(&format!("api/{path}"))
            .map_err(|e| ClientError::invalid(action, e.to_string()))
    }

    async fn send(&self, action: Action, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Transport { action, source })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<MessageResponse>(&body).map_or_else(
            |_| {
                status
                    .canonical_reason()
                    .unwrap_or("Unexpected response")
                    .to_string()
            },
            |m| m.message,
        );

        debug!(?action, %status, %message, "Server rejected request");
        Err(ClientError::server(action, status, message))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        action: Action,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        self.send(action, request)
            .await?
            .json()
            .await
            .map_err(|source| ClientError::Transport { action, source })
    }
}

#[async_trait::async_trait]
impl ListApi for HttpListApi {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ClientError> {
        let mut url = self.endpoint(Action::Search, "movies/search")?;
        url.query_pairs_mut().append_pair("query", query);
        let response: SearchResponse = self.send_json(Action::Search, self.client.get(url)).await?;
        Ok(response.results)
    }

    async fn movie(&self, imdb_id: &str) -> Result<MovieDetails, ClientError> {
        let url = self.endpoint(Action::LoadMovie, &format!("movies/{imdb_id}"))?;
        self.send_json(Action::LoadMovie, self.client.get(url)).await
    }

    async fn watchlist(&self) -> Result<Vec<WatchlistItem>, ClientError> {
        let url = self.endpoint(Action::LoadWatchlist, "watchlist")?;
        self.send_json(Action::LoadWatchlist, self.client.get(url))
            .await
    }

    async fn watched_list(&self) -> Result<Vec<WatchedItem>, ClientError> {
        let url = self.endpoint(Action::LoadWatchedList, "watchedlist")?;
        self.send_json(Action::LoadWatchedList, self.client.get(url))
            .await
    }

    async fn add_to_watchlist(&self, movie: MovieId) -> Result<WatchlistEntry, ClientError> {
        let url = self.endpoint(Action::AddToWatchlist, "watchlist")?;
        let request = self.client.post(url).json(&json!({ "movieId": movie }));
        self.send_json(Action::AddToWatchlist, request).await
    }

    async fn remove_from_watchlist(&self, movie: MovieId) -> Result<(), ClientError> {
        let url = self.endpoint(Action::RemoveFromWatchlist, &format!("watchlist/{movie}"))?;
        self.send(Action::RemoveFromWatchlist, self.client.delete(url))
            .await?;
        Ok(())
    }

    async fn move_watchlist_item(&self, movie: MovieId, position: i32) -> Result<i32, ClientError> {
        let url = self.endpoint(Action::Reorder, "watchlist/reorder")?;
        let request = self
            .client
            .post(url)
            .json(&json!({ "movieId": movie, "position": position }));
        let response: MoveResponse = self.send_json(Action::Reorder, request).await?;
        Ok(response.position)
    }

    async fn move_to_watched(
        &self,
        movie: MovieId,
        review: Option<String>,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(
            Action::MoveToWatched,
            &format!("movies/{movie}/move-to-watched"),
        )?;
        let request = self.client.post(url).json(&json!({ "review": review }));
        self.send(Action::MoveToWatched, request).await?;
        Ok(())
    }

    async fn add_to_watched(
        &self,
        movie: MovieId,
        review: Option<String>,
        rating: Option<i32>,
    ) -> Result<WatchedEntry, ClientError> {
        let url = self.endpoint(Action::AddToWatched, "watchedlist")?;
        let request = self.client.post(url).json(&json!({
            "movieId": movie,
            "review": review,
            "rating": rating,
        }));
        self.send_json(Action::AddToWatched, request).await
    }

    async fn update_review(&self, movie: MovieId, review: String) -> Result<(), ClientError> {
        let url = self.endpoint(Action::UpdateReview, &format!("watchedlist/{movie}/review"))?;
        let request = self.client.put(url).json(&json!({ "review": review }));
        self.send(Action::UpdateReview, request).await?;
        Ok(())
    }

    async fn remove_from_watched(&self, movie: MovieId) -> Result<(), ClientError> {
        let url = self.endpoint(Action::RemoveFromWatched, &format!("watchedlist/{movie}"))?;
        self.send(Action::RemoveFromWatched, self.client.delete(url))
            .await?;
        Ok(())
    }

    async fn export_csv(&self, scope: ListScope) -> Result<String, ClientError> {
        let mut url = self.endpoint(Action::Export, "export/csv")?;
        let scope = match scope {
            ListScope::Watchlist => "watchlist",
            ListScope::Watched => "watched",
            ListScope::All => "all",
        };
        url.query_pairs_mut().append_pair("list", scope);
        self.send(Action::Export, self.client.get(url))
            .await?
            .text()
            .await
            .map_err(|source| ClientError::Transport {
                action: Action::Export,
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(server_url: &str) -> HttpListApi {
        HttpListApi::new(&ClientConfig {
            server_url: server_url.to_string(),
            request_timeout_seconds: 5,
        })
        .unwrap()
    }

    #[test]
    fn endpoints_live_under_api_prefix() {
        let url = api("http://localhost:5000")
            .endpoint(Action::LoadWatchlist, "watchlist")
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/watchlist");
    }

    #[test]
    fn base_path_is_preserved() {
        let url = api("http://example.test/cinema")
            .endpoint(Action::Reorder, "watchlist/reorder")
            .unwrap();
        assert_eq!(url.as_str(), "http://example.test/cinema/api/watchlist/reorder");
    }

    #[test]
    fn rejects_garbage_server_url() {
        let result = HttpListApi::new(&ClientConfig {
            server_url: "not a url".to_string(),
            request_timeout_seconds: 5,
        });
        assert!(result.is_err());
    }
}
