use crate::entities::{movies, prelude::*};
use crate::models::movie::{Movie, NewMovie};
use anyhow::{Context, Result};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_imdb_id(&self, imdb_id: &str) -> Result<Option<Movie>> {
        let row = Movies::find()
            .filter(movies::Column::ImdbId.eq(imdb_id))
            .one(&self.conn)
            .await?;

        Ok(row.map(Movie::from))
    }

    /// Persists provider details, returning the stored row.
    ///
    /// Movies are immutable once created: if another request stored the same
    /// external id first, that row is returned unchanged.
    pub async fn insert(&self, movie: NewMovie) -> Result<Movie> {
        let imdb_id = movie.imdb_id.clone();

        let active = movies::ActiveModel {
            imdb_id: Set(movie.imdb_id),
            title: Set(movie.title),
            year: Set(movie.year),
            director: Set(movie.director),
            poster: Set(movie.poster),
            plot: Set(movie.plot),
            runtime: Set(movie.runtime),
            genre: Set(movie.genre),
            actors: Set(movie.actors),
            ..Default::default()
        };

        Movies::insert(active)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(movies::Column::ImdbId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        self.get_by_imdb_id(&imdb_id)
            .await?
            .with_context(|| format!("Movie {imdb_id} missing after insert"))
    }
}
