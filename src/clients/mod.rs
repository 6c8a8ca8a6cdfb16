//! Outbound clients for movie metadata.

pub mod omdb;

use crate::models::movie::{NewMovie, SearchResult};
use anyhow::Result;

/// Source of movie metadata, searched by title and looked up by external id.
///
/// The HTTP layer and services only see this trait, so tests can swap the
/// network-backed [`omdb::OmdbClient`] for an in-memory stub.
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Title search restricted to movies. A provider miss is an empty list.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;

    /// Full details by external id, or `None` when the provider has no match.
    async fn details(&self, imdb_id: &str) -> Result<Option<NewMovie>>;
}
