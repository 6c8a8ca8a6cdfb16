use crate::models::list::{WatchedEntry, WatchedItem, WatchlistEntry, WatchlistItem};
use crate::models::movie::{Movie, NewMovie};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::user::User;
pub use repositories::watched::AddToWatched;
pub use repositories::watchlist::{AddToWatchlist, ReorderWatchlist};

/// Fixed-width RFC 3339 UTC timestamp, so stored values sort lexically.
#[must_use]
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
    /// List mutations run one at a time; SQLite has a single writer.
    writes: Arc<Mutex<()>>,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        if !db_url.contains(":memory:") {
            conn.execute_unprepared("PRAGMA journal_mode=WAL").await?;
        }

        migrator::Migrator::up(&conn, None).await?;

        info!("Database connected & migrations applied (pool: {min_connections}-{max_connections})");

        Ok(Self {
            conn,
            writes: Arc::new(Mutex::new(())),
        })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn watchlist_repo(&self) -> repositories::watchlist::WatchlistRepository {
        repositories::watchlist::WatchlistRepository::new(self.conn.clone())
    }

    fn watched_repo(&self) -> repositories::watched::WatchedRepository {
        repositories::watched::WatchedRepository::new(self.conn.clone())
    }

    // Movies

    pub async fn get_movie_by_imdb_id(&self, imdb_id: &str) -> Result<Option<Movie>> {
        self.movie_repo().get_by_imdb_id(imdb_id).await
    }

    pub async fn insert_movie(&self, movie: NewMovie) -> Result<Movie> {
        self.movie_repo().insert(movie).await
    }

    // Users

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    // Watchlist

    pub async fn get_watchlist(&self, user_id: i32) -> Result<Vec<WatchlistItem>> {
        self.watchlist_repo().list(user_id).await
    }

    pub async fn get_watchlist_entry(
        &self,
        user_id: i32,
        movie_id: i32,
    ) -> Result<Option<WatchlistEntry>> {
        self.watchlist_repo().find(user_id, movie_id).await
    }

    pub async fn add_to_watchlist(&self, user_id: i32, movie_id: i32) -> Result<AddToWatchlist> {
        let _guard = self.writes.lock().await;
        self.watchlist_repo().add(user_id, movie_id).await
    }

    pub async fn remove_from_watchlist(&self, user_id: i32, movie_id: i32) -> Result<bool> {
        let _guard = self.writes.lock().await;
        self.watchlist_repo().remove(user_id, movie_id).await
    }

    pub async fn reorder_watchlist(
        &self,
        user_id: i32,
        movie_ids: &[i32],
    ) -> Result<ReorderWatchlist> {
        let _guard = self.writes.lock().await;
        self.watchlist_repo().reorder(user_id, movie_ids).await
    }

    pub async fn move_watchlist_item(
        &self,
        user_id: i32,
        movie_id: i32,
        position: i32,
    ) -> Result<Option<i32>> {
        let _guard = self.writes.lock().await;
        self.watchlist_repo()
            .move_item(user_id, movie_id, position)
            .await
    }

    // Watched list

    pub async fn get_watched_list(&self, user_id: i32) -> Result<Vec<WatchedItem>> {
        self.watched_repo().list(user_id).await
    }

    pub async fn get_watched_entry(
        &self,
        user_id: i32,
        movie_id: i32,
    ) -> Result<Option<WatchedEntry>> {
        self.watched_repo().find(user_id, movie_id).await
    }

    pub async fn add_to_watched(
        &self,
        user_id: i32,
        movie_id: i32,
        review: Option<String>,
        rating: Option<i32>,
    ) -> Result<AddToWatched> {
        let _guard = self.writes.lock().await;
        self.watched_repo()
            .add(user_id, movie_id, review, rating)
            .await
    }

    pub async fn move_to_watched(
        &self,
        user_id: i32,
        movie_id: i32,
        review: Option<String>,
    ) -> Result<Option<WatchedEntry>> {
        let _guard = self.writes.lock().await;
        self.watched_repo()
            .move_from_watchlist(user_id, movie_id, review)
            .await
    }

    pub async fn update_review(&self, user_id: i32, movie_id: i32, review: &str) -> Result<bool> {
        let _guard = self.writes.lock().await;
        self.watched_repo()
            .update_review(user_id, movie_id, review)
            .await
    }

    pub async fn remove_from_watched(&self, user_id: i32, movie_id: i32) -> Result<bool> {
        let _guard = self.writes.lock().await;
        self.watched_repo().remove(user_id, movie_id).await
    }
}
