use crate::domain::ordering::{
    OrderingError, dense_renumber, move_within, next_order, position_to_index,
    validate_permutation,
};
use crate::entities::{prelude::*, watch_list, watched_list};
use crate::models::list::{WatchlistEntry, WatchlistItem};
use crate::models::movie::Movie;
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddToWatchlist {
    Added(WatchlistEntry),
    /// The pair was already on the watchlist; the entry is unchanged.
    Existing(WatchlistEntry),
    AlreadyWatched,
    MovieMissing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderWatchlist {
    Applied,
    Rejected(OrderingError),
}

/// Repository for the ordered watchlist.
///
/// Every mutation keeps a user's `order` values at exactly `1..=N`.
pub struct WatchlistRepository {
    conn: DatabaseConnection,
}

impl WatchlistRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find(&self, user_id: i32, movie_id: i32) -> Result<Option<WatchlistEntry>> {
        let row = Self::find_model(&self.conn, user_id, movie_id).await?;
        Ok(row.map(WatchlistEntry::from))
    }

    pub async fn list(&self, user_id: i32) -> Result<Vec<WatchlistItem>> {
        let rows = WatchList::find()
            .filter(watch_list::Column::UserId.eq(user_id))
            .find_also_related(Movies)
            .order_by_asc(watch_list::Column::Order)
            .order_by_asc(watch_list::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(entry, movie)| {
                movie.map(|m| WatchlistItem {
                    movie: Movie::from(m),
                    order: entry.order,
                    added_at: entry.created_at,
                })
            })
            .collect())
    }

    pub async fn add(&self, user_id: i32, movie_id: i32) -> Result<AddToWatchlist> {
        let txn = self.conn.begin().await?;

        if Movies::find_by_id(movie_id).one(&txn).await?.is_none() {
            return Ok(AddToWatchlist::MovieMissing);
        }

        if let Some(existing) = Self::find_model(&txn, user_id, movie_id).await? {
            return Ok(AddToWatchlist::Existing(existing.into()));
        }

        let watched = WatchedList::find()
            .filter(watched_list::Column::UserId.eq(user_id))
            .filter(watched_list::Column::MovieId.eq(movie_id))
            .one(&txn)
            .await?;
        if watched.is_some() {
            return Ok(AddToWatchlist::AlreadyWatched);
        }

        let orders: Vec<i32> = Self::entries(&txn, user_id)
            .await?
            .iter()
            .map(|e| e.order)
            .collect();

        let entry = watch_list::ActiveModel {
            user_id: Set(user_id),
            movie_id: Set(movie_id),
            order: Set(next_order(&orders)),
            created_at: Set(crate::db::now_timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(AddToWatchlist::Added(entry.into()))
    }

    /// Removes the pair and closes the gap. Returns `false` if it was absent.
    pub async fn remove(&self, user_id: i32, movie_id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;
        let removed = Self::delete_and_renumber(&txn, user_id, movie_id).await?;
        txn.commit().await?;
        Ok(removed)
    }

    /// Full-replace ordering: `movie_ids` must list every movie on the
    /// watchlist exactly once.
    pub async fn reorder(&self, user_id: i32, movie_ids: &[i32]) -> Result<ReorderWatchlist> {
        let txn = self.conn.begin().await?;
        let entries = Self::entries(&txn, user_id).await?;

        let current: Vec<i32> = entries.iter().map(|e| e.movie_id).collect();
        if let Err(e) = validate_permutation(&current, movie_ids) {
            return Ok(ReorderWatchlist::Rejected(e));
        }

        for (position, movie_id) in (1..).zip(movie_ids) {
            let Some(entry) = entries.iter().find(|e| e.movie_id == *movie_id) else {
                continue;
            };
            if entry.order != position {
                Self::set_order(&txn, entry.id, position).await?;
            }
        }

        txn.commit().await?;
        Ok(ReorderWatchlist::Applied)
    }

    /// Moves one entry to a 1-based `position`, shifting the entries in
    /// between. Positions past the end land on the last slot.
    ///
    /// Returns the final position, or `None` if the pair is not on the list.
    pub async fn move_item(
        &self,
        user_id: i32,
        movie_id: i32,
        position: i32,
    ) -> Result<Option<i32>> {
        let txn = self.conn.begin().await?;
        let entries = Self::entries(&txn, user_id).await?;

        let Some(from) = entries.iter().position(|e| e.movie_id == movie_id) else {
            return Ok(None);
        };

        let moved_id = entries[from].id;
        let mut slots: Vec<(i32, i32)> = entries.iter().map(|e| (e.id, e.order)).collect();
        let to = position_to_index(position, slots.len());
        move_within(&mut slots, from, to);

        for (new_order, (id, old_order)) in (1..).zip(&slots) {
            if *old_order != new_order {
                Self::set_order(&txn, *id, new_order).await?;
            }
        }

        txn.commit().await?;
        Ok((1..)
            .zip(&slots)
            .find_map(|(order, (id, _))| (*id == moved_id).then_some(order)))
    }

    /// Deletes the pair and renumbers what is left, on the caller's
    /// connection or transaction.
    pub(crate) async fn delete_and_renumber<C: ConnectionTrait>(
        conn: &C,
        user_id: i32,
        movie_id: i32,
    ) -> Result<bool> {
        let deleted = WatchList::delete_many()
            .filter(watch_list::Column::UserId.eq(user_id))
            .filter(watch_list::Column::MovieId.eq(movie_id))
            .exec(conn)
            .await?;

        if deleted.rows_affected == 0 {
            return Ok(false);
        }

        let entries = Self::entries(conn, user_id).await?;
        let current: Vec<(i32, i32)> = entries.iter().map(|e| (e.id, e.order)).collect();
        for (id, order) in dense_renumber(&current) {
            Self::set_order(conn, id, order).await?;
        }

        Ok(true)
    }

    async fn find_model<C: ConnectionTrait>(
        conn: &C,
        user_id: i32,
        movie_id: i32,
    ) -> Result<Option<watch_list::Model>> {
        let row = WatchList::find()
            .filter(watch_list::Column::UserId.eq(user_id))
            .filter(watch_list::Column::MovieId.eq(movie_id))
            .one(conn)
            .await?;
        Ok(row)
    }

    async fn entries<C: ConnectionTrait>(conn: &C, user_id: i32) -> Result<Vec<watch_list::Model>> {
        let rows = WatchList::find()
            .filter(watch_list::Column::UserId.eq(user_id))
            .order_by_asc(watch_list::Column::Order)
            .order_by_asc(watch_list::Column::Id)
            .all(conn)
            .await?;
        Ok(rows)
    }

    async fn set_order<C: ConnectionTrait>(conn: &C, id: i32, order: i32) -> Result<()> {
        WatchList::update_many()
            .col_expr(watch_list::Column::Order, Expr::value(order))
            .filter(watch_list::Column::Id.eq(id))
            .exec(conn)
            .await?;
        Ok(())
    }
}
