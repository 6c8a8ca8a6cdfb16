use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::MetadataProvider;
use crate::config::OmdbConfig;
use crate::models::movie::{NewMovie, SearchResult};

const USER_AGENT: &str = concat!("cinema/", env!("CARGO_PKG_VERSION"));

/// OMDB marks missing fields with this literal instead of omitting them.
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<SearchHit>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
}

fn is_success(response: &str) -> bool {
    response.eq_ignore_ascii_case("true")
}

fn available(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != NOT_AVAILABLE)
}

impl From<SearchHit> for SearchResult {
    fn from(hit: SearchHit) -> Self {
        Self {
            imdb_id: hit.imdb_id,
            title: hit.title,
            year: hit.year,
            poster: hit.poster,
        }
    }
}

impl From<DetailsResponse> for NewMovie {
    fn from(details: DetailsResponse) -> Self {
        Self {
            imdb_id: details.imdb_id,
            title: details.title,
            year: details.year,
            director: details.director,
            poster: details.poster,
            plot: details.plot,
            runtime: available(details.runtime),
            genre: available(details.genre),
            actors: available(details.actors),
        }
    }
}

#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: url::Url,
    api_key: String,
}

impl OmdbClient {
    pub fn new(config: &OmdbConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build OMDB HTTP client")?;

        Self::with_shared_client(client, config)
    }

    /// Reuses an existing client (and its connection pool).
    pub fn with_shared_client(client: Client, config: &OmdbConfig) -> Result<Self> {
        let base_url = url::Url::parse(&config.base_url)
            .with_context(|| format!("Invalid OMDB base URL: {}", config.base_url))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    fn search_url(&self, query: &str) -> url::Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("apikey", &self.api_key)
            .append_pair("s", query)
            .append_pair("type", "movie");
        url
    }

    fn details_url(&self, imdb_id: &str) -> url::Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("apikey", &self.api_key)
            .append_pair("i", imdb_id)
            .append_pair("plot", "full");
        url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: url::Url) -> Result<T> {
        // reqwest errors render the URL, which carries the api key.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("OMDB API error: {status} - {body}"));
        }

        Ok(response.json().await.map_err(reqwest::Error::without_url)?)
    }
}

#[async_trait::async_trait]
impl MetadataProvider for OmdbClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let response: SearchResponse = self.get_json(self.search_url(query)).await?;

        if !is_success(&response.response) {
            debug!(
                query,
                error = response.error.as_deref().unwrap_or_default(),
                "OMDB search returned no results"
            );
            return Ok(Vec::new());
        }

        Ok(response.search.into_iter().map(SearchResult::from).collect())
    }

    async fn details(&self, imdb_id: &str) -> Result<Option<NewMovie>> {
        let response: DetailsResponse = self.get_json(self.details_url(imdb_id)).await?;

        if !is_success(&response.response) {
            return Ok(None);
        }

        Ok(Some(NewMovie::from(response)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OmdbClient {
        let config = OmdbConfig {
            base_url: "https://omdb.example.test/".to_string(),
            api_key: "k3y".to_string(),
            request_timeout_seconds: 5,
        };
        OmdbClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn transport_errors_do_not_leak_api_key() {
        let config = OmdbConfig {
            base_url: "http://127.0.0.1:9/".to_string(),
            api_key: "s3cret-key".to_string(),
            request_timeout_seconds: 2,
        };
        let client = OmdbClient::new(&config).unwrap();

        let err = client.search("alien").await.unwrap_err();
        let rendered = format!("{err:#} {err:?}");
        assert!(!rendered.contains("s3cret-key"), "{rendered}");
    }

    #[test]
    fn search_url_carries_movie_type() {
        let url = client().search_url("the matrix");
        assert_eq!(
            url.as_str(),
            "https://omdb.example.test/?apikey=k3y&s=the+matrix&type=movie"
        );
    }

    #[test]
    fn details_url_requests_full_plot() {
        let url = client().details_url("tt0133093");
        assert_eq!(
            url.as_str(),
            "https://omdb.example.test/?apikey=k3y&i=tt0133093&plot=full"
        );
    }

    #[test]
    fn search_response_parses_hits() {
        let json = r#"{
            "Search": [
                {"Title": "The Matrix", "Year": "1999", "imdbID": "tt0133093", "Type": "movie", "Poster": "https://img/1.jpg"}
            ],
            "totalResults": "1",
            "Response": "True"
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(is_success(&response.response));
        let results: Vec<SearchResult> = response.search.into_iter().map(Into::into).collect();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].imdb_id, "tt0133093");
        assert_eq!(results[0].title, "The Matrix");
    }

    #[test]
    fn search_miss_is_not_success() {
        let json = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(!is_success(&response.response));
        assert!(response.search.is_empty());
    }

    #[test]
    fn details_drop_not_available_fields() {
        let json = r#"{
            "Title": "Obscure", "Year": "2001", "Runtime": "N/A", "Genre": "Drama",
            "Director": "Someone", "Actors": "N/A", "Plot": "Things happen.",
            "Poster": "N/A", "imdbID": "tt0000001", "Response": "True"
        }"#;

        let response: DetailsResponse = serde_json::from_str(json).unwrap();
        let movie = NewMovie::from(response);
        assert_eq!(movie.imdb_id, "tt0000001");
        assert_eq!(movie.runtime, None);
        assert_eq!(movie.genre.as_deref(), Some("Drama"));
        assert_eq!(movie.actors, None);
        assert_eq!(movie.poster, "N/A");
    }
}
