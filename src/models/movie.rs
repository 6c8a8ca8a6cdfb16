use serde::{Deserialize, Serialize};

use crate::entities::movies;

/// A stored movie, shared across users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i32,
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub director: String,
    pub poster: String,
    pub plot: String,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub actors: Option<String>,
}

impl From<movies::Model> for Movie {
    fn from(model: movies::Model) -> Self {
        Self {
            id: model.id,
            imdb_id: model.imdb_id,
            title: model.title,
            year: model.year,
            director: model.director,
            poster: model.poster,
            plot: model.plot,
            runtime: model.runtime,
            genre: model.genre,
            actors: model.actors,
        }
    }
}

/// Full details fetched from the metadata provider, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub director: String,
    pub poster: String,
    pub plot: String,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub actors: Option<String>,
}

/// One hit from a provider title search. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: String,
}

/// A movie decorated with the requesting user's list state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    pub in_watch_list: bool,
    pub in_watched_list: bool,
    pub watched_date: Option<String>,
    pub review: Option<String>,
    pub order: Option<i32>,
}
