use crate::db::repositories::watchlist::WatchlistRepository;
use crate::entities::{prelude::*, watched_list};
use crate::models::list::{WatchedEntry, WatchedItem};
use crate::models::movie::Movie;
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddToWatched {
    Added(WatchedEntry),
    /// An entry already existed; supplied review/rating were written to it.
    Updated(WatchedEntry),
    MovieMissing,
}

pub struct WatchedRepository {
    conn: DatabaseConnection,
}

impl WatchedRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find(&self, user_id: i32, movie_id: i32) -> Result<Option<WatchedEntry>> {
        let row = Self::find_model(&self.conn, user_id, movie_id).await?;
        Ok(row.map(WatchedEntry::from))
    }

    /// Most recently watched first.
    pub async fn list(&self, user_id: i32) -> Result<Vec<WatchedItem>> {
        let rows = WatchedList::find()
            .filter(watched_list::Column::UserId.eq(user_id))
            .find_also_related(Movies)
            .order_by_desc(watched_list::Column::WatchedDate)
            .order_by_desc(watched_list::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(entry, movie)| {
                movie.map(|m| WatchedItem {
                    movie: Movie::from(m),
                    watched_date: entry.watched_date,
                    review: entry.review,
                    rating: entry.rating,
                })
            })
            .collect())
    }

    /// Direct add. A watchlist entry for the same pair is removed in the same
    /// transaction.
    pub async fn add(
        &self,
        user_id: i32,
        movie_id: i32,
        review: Option<String>,
        rating: Option<i32>,
    ) -> Result<AddToWatched> {
        let txn = self.conn.begin().await?;

        if Movies::find_by_id(movie_id).one(&txn).await?.is_none() {
            return Ok(AddToWatched::MovieMissing);
        }

        WatchlistRepository::delete_and_renumber(&txn, user_id, movie_id).await?;
        let (entry, created) = Self::upsert(&txn, user_id, movie_id, review, rating).await?;

        txn.commit().await?;
        Ok(if created {
            AddToWatched::Added(entry)
        } else {
            AddToWatched::Updated(entry)
        })
    }

    /// Moves a watchlist entry onto the watched list atomically.
    ///
    /// Returns `None` (and writes nothing) when the pair is not on the
    /// watchlist.
    pub async fn move_from_watchlist(
        &self,
        user_id: i32,
        movie_id: i32,
        review: Option<String>,
    ) -> Result<Option<WatchedEntry>> {
        let txn = self.conn.begin().await?;

        if !WatchlistRepository::delete_and_renumber(&txn, user_id, movie_id).await? {
            return Ok(None);
        }

        let (entry, _) = Self::upsert(&txn, user_id, movie_id, review, None).await?;

        txn.commit().await?;
        Ok(Some(entry))
    }

    /// Overwrites the review. Returns `false` if there is no watched entry.
    pub async fn update_review(&self, user_id: i32, movie_id: i32, review: &str) -> Result<bool> {
        let updated = WatchedList::update_many()
            .col_expr(watched_list::Column::Review, Expr::value(review))
            .filter(watched_list::Column::UserId.eq(user_id))
            .filter(watched_list::Column::MovieId.eq(movie_id))
            .exec(&self.conn)
            .await?;

        Ok(updated.rows_affected > 0)
    }

    pub async fn remove(&self, user_id: i32, movie_id: i32) -> Result<bool> {
        let deleted = WatchedList::delete_many()
            .filter(watched_list::Column::UserId.eq(user_id))
            .filter(watched_list::Column::MovieId.eq(movie_id))
            .exec(&self.conn)
            .await?;

        Ok(deleted.rows_affected > 0)
    }

    async fn find_model<C: ConnectionTrait>(
        conn: &C,
        user_id: i32,
        movie_id: i32,
    ) -> Result<Option<watched_list::Model>> {
        let row = WatchedList::find()
            .filter(watched_list::Column::UserId.eq(user_id))
            .filter(watched_list::Column::MovieId.eq(movie_id))
            .one(conn)
            .await?;
        Ok(row)
    }

    /// Inserts a new entry dated now, or writes only the supplied fields onto
    /// the existing one. The flag is `true` when a row was created.
    async fn upsert<C: ConnectionTrait>(
        conn: &C,
        user_id: i32,
        movie_id: i32,
        review: Option<String>,
        rating: Option<i32>,
    ) -> Result<(WatchedEntry, bool)> {
        if let Some(existing) = Self::find_model(conn, user_id, movie_id).await? {
            if review.is_none() && rating.is_none() {
                return Ok((existing.into(), false));
            }

            let mut active: watched_list::ActiveModel = existing.into();
            if let Some(review) = review {
                active.review = Set(Some(review));
            }
            if let Some(rating) = rating {
                active.rating = Set(Some(rating));
            }
            let updated = active.update(conn).await?;
            return Ok((updated.into(), false));
        }

        let entry = watched_list::ActiveModel {
            user_id: Set(user_id),
            movie_id: Set(movie_id),
            watched_date: Set(crate::db::now_timestamp()),
            review: Set(review),
            rating: Set(rating),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        Ok((entry.into(), true))
    }
}
