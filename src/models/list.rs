use serde::{Deserialize, Serialize};

use crate::entities::{watch_list, watched_list};
use crate::models::movie::Movie;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub id: i32,
    pub user_id: i32,
    pub movie_id: i32,
    pub order: i32,
    pub created_at: String,
}

impl From<watch_list::Model> for WatchlistEntry {
    fn from(model: watch_list::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            movie_id: model.movie_id,
            order: model.order,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchedEntry {
    pub id: i32,
    pub user_id: i32,
    pub movie_id: i32,
    pub watched_date: String,
    pub review: Option<String>,
    pub rating: Option<i32>,
}

impl From<watched_list::Model> for WatchedEntry {
    fn from(model: watched_list::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            movie_id: model.movie_id,
            watched_date: model.watched_date,
            review: model.review,
            rating: model.rating,
        }
    }
}

/// A watchlist row joined with its movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    #[serde(flatten)]
    pub movie: Movie,
    pub order: i32,
    pub added_at: String,
}

/// A watched-list row joined with its movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchedItem {
    #[serde(flatten)]
    pub movie: Movie,
    pub watched_date: String,
    pub review: Option<String>,
    pub rating: Option<i32>,
}

impl WatchlistItem {
    #[must_use]
    pub const fn movie_id(&self) -> i32 {
        self.movie.id
    }
}

impl WatchedItem {
    #[must_use]
    pub const fn movie_id(&self) -> i32 {
        self.movie.id
    }
}
