//! List invariants exercised through the service layer against SQLite.

use cinema::db::{Store, now_timestamp};
use cinema::domain::{ListScope, MovieId, Review, UserId};
use cinema::entities::users;
use cinema::models::movie::NewMovie;
use cinema::services::{
    ExportService, ListError, ListService, SeaOrmExportService, SeaOrmListService,
};
use sea_orm::{ActiveModelTrait, Set};
use std::sync::Arc;

const USER: UserId = UserId::DEFAULT;

struct Fixture {
    store: Arc<Store>,
    lists: SeaOrmListService,
}

async fn setup() -> Fixture {
    let db_path =
        std::env::temp_dir().join(format!("cinema-list-test-{}.db", uuid::Uuid::new_v4()));
    let store = Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open store");
    let store = Arc::new(store);

    Fixture {
        lists: SeaOrmListService::new(store.clone()),
        store,
    }
}

impl Fixture {
    async fn movie(&self, n: u32) -> MovieId {
        let movie = self
            .store
            .insert_movie(NewMovie {
                imdb_id: format!("tt{n:07}"),
                title: format!("Movie {n}"),
                year: "2001".to_string(),
                director: "Someone".to_string(),
                poster: String::new(),
                plot: String::new(),
                runtime: None,
                genre: None,
                actors: None,
            })
            .await
            .unwrap();
        MovieId::new(movie.id)
    }

    async fn movies(&self, count: u32) -> Vec<MovieId> {
        let mut ids = Vec::new();
        for n in 1..=count {
            let id = self.movie(n).await;
            self.lists.add_to_watchlist(USER, id).await.unwrap();
            ids.push(id);
        }
        ids
    }

    async fn order(&self, user: UserId) -> Vec<(MovieId, i32)> {
        self.lists
            .get_watchlist(user)
            .await
            .unwrap()
            .into_iter()
            .map(|i| (MovieId::new(i.movie_id()), i.order))
            .collect()
    }
}

fn dense(ids: &[MovieId]) -> Vec<(MovieId, i32)> {
    ids.iter().copied().zip(1..).collect()
}

#[tokio::test]
async fn permutation_reorder_assigns_exact_positions() {
    let f = setup().await;
    let ids = f.movies(4).await;

    let wanted = vec![ids[3], ids[1], ids[0], ids[2]];
    f.lists.reorder_watchlist(USER, &wanted).await.unwrap();

    assert_eq!(f.order(USER).await, dense(&wanted));
}

#[tokio::test]
async fn non_permutation_reorder_is_rejected_without_writes() {
    let f = setup().await;
    let ids = f.movies(3).await;

    let missing = f.lists.reorder_watchlist(USER, &ids[..2]).await;
    assert!(matches!(missing, Err(ListError::InvalidOrder(_))));

    let duplicate = f
        .lists
        .reorder_watchlist(USER, &[ids[0], ids[0], ids[1]])
        .await;
    assert!(matches!(duplicate, Err(ListError::InvalidOrder(_))));

    assert_eq!(f.order(USER).await, dense(&ids));
}

#[tokio::test]
async fn removal_closes_the_gap() {
    let f = setup().await;
    let ids = f.movies(4).await;

    f.lists.remove_from_watchlist(USER, ids[1]).await.unwrap();
    assert_eq!(f.order(USER).await, dense(&[ids[0], ids[2], ids[3]]));

    f.lists.remove_from_watchlist(USER, ids[0]).await.unwrap();
    assert_eq!(f.order(USER).await, dense(&[ids[2], ids[3]]));

    // Absent pairs are a no-op.
    f.lists.remove_from_watchlist(USER, ids[0]).await.unwrap();
    assert_eq!(f.order(USER).await, dense(&[ids[2], ids[3]]));
}

#[tokio::test]
async fn add_is_idempotent() {
    let f = setup().await;
    let id = f.movie(1).await;

    let first = f.lists.add_to_watchlist(USER, id).await.unwrap();
    let second = f.lists.add_to_watchlist(USER, id).await.unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.entry, second.entry);
    assert_eq!(f.order(USER).await, vec![(id, 1)]);
}

#[tokio::test]
async fn move_to_watched_is_all_or_nothing() {
    let f = setup().await;
    let ids = f.movies(3).await;

    let review = Review::parse("great").unwrap();
    let entry = f
        .lists
        .move_to_watched(USER, ids[0], Some(review))
        .await
        .unwrap();
    assert_eq!(entry.review.as_deref(), Some("great"));

    assert_eq!(f.order(USER).await, dense(&[ids[1], ids[2]]));
    let watched = f.lists.get_watched_list(USER).await.unwrap();
    assert_eq!(watched.len(), 1);
    assert_eq!(watched[0].movie_id(), ids[0].value());

    let again = f.lists.move_to_watched(USER, ids[0], None).await;
    assert!(matches!(again, Err(ListError::NotInWatchlist(_))));
    assert_eq!(f.lists.get_watched_list(USER).await.unwrap().len(), 1);
}

#[tokio::test]
async fn delta_move_keeps_positions_dense() {
    let f = setup().await;
    let ids = f.movies(5).await;

    let landed = f.lists.move_watchlist_item(USER, ids[4], 2).await.unwrap();
    assert_eq!(landed, 2);
    assert_eq!(
        f.order(USER).await,
        dense(&[ids[0], ids[4], ids[1], ids[2], ids[3]])
    );

    let landed = f.lists.move_watchlist_item(USER, ids[0], 99).await.unwrap();
    assert_eq!(landed, 5);
    assert_eq!(
        f.order(USER).await,
        dense(&[ids[4], ids[1], ids[2], ids[3], ids[0]])
    );

    let unknown = f.lists.move_watchlist_item(USER, MovieId::new(999), 1).await;
    assert!(matches!(unknown, Err(ListError::NotInWatchlist(_))));
}

#[tokio::test]
async fn direct_add_to_watched_updates_in_place() {
    let f = setup().await;
    let ids = f.movies(2).await;

    let first = f
        .lists
        .add_to_watched(USER, ids[0], None, Some(7))
        .await
        .unwrap();
    assert!(first.created);
    assert_eq!(f.order(USER).await, dense(&[ids[1]]));

    let review = Review::parse("better the second time").unwrap();
    let second = f
        .lists
        .add_to_watched(USER, ids[0], Some(review), None)
        .await
        .unwrap();
    assert!(!second.created);
    assert_eq!(second.entry.id, first.entry.id);
    assert_eq!(second.entry.rating, Some(7));
    assert_eq!(
        second.entry.review.as_deref(),
        Some("better the second time")
    );
}

#[tokio::test]
async fn review_update_only_touches_watched_entries() {
    let f = setup().await;
    let ids = f.movies(1).await;

    let updated = f
        .lists
        .update_review(USER, ids[0], Review::parse("early").unwrap())
        .await
        .unwrap();
    assert!(!updated);

    f.lists.move_to_watched(USER, ids[0], None).await.unwrap();
    let updated = f
        .lists
        .update_review(USER, ids[0], Review::parse("later").unwrap())
        .await
        .unwrap();
    assert!(updated);

    let watched = f.lists.get_watched_list(USER).await.unwrap();
    assert_eq!(watched[0].review.as_deref(), Some("later"));
}

#[tokio::test]
async fn lists_are_per_user() {
    let f = setup().await;
    let ids = f.movies(2).await;

    let other = users::ActiveModel {
        username: Set("second".to_string()),
        created_at: Set(now_timestamp()),
        ..Default::default()
    }
    .insert(&f.store.conn)
    .await
    .unwrap();
    let other = UserId::new(other.id);

    f.lists.add_to_watchlist(other, ids[1]).await.unwrap();
    f.lists.remove_from_watchlist(USER, ids[0]).await.unwrap();

    assert_eq!(f.order(other).await, vec![(ids[1], 1)]);
    assert_eq!(f.order(USER).await, vec![(ids[1], 1)]);

    f.lists.move_to_watched(other, ids[1], None).await.unwrap();
    assert_eq!(f.order(USER).await, vec![(ids[1], 1)]);
    assert!(f.lists.get_watched_list(USER).await.unwrap().is_empty());
}

#[tokio::test]
async fn export_renders_watched_rows_by_default() {
    let f = setup().await;
    let ids = f.movies(2).await;
    f.lists
        .move_to_watched(USER, ids[0], Some(Review::parse("solid").unwrap()))
        .await
        .unwrap();

    let export = SeaOrmExportService::new(f.store.clone());

    let csv = export.export_csv(USER, ListScope::default()).await.unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("Movie 1,2001,Someone,Watched,,"));
    assert!(lines[1].ends_with(",solid"));

    let csv = export.export_csv(USER, ListScope::All).await.unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "Movie 2,2001,Someone,Watch List,1,,");
}

#[tokio::test]
async fn concurrent_reorders_all_succeed_and_stay_dense() {
    let f = setup().await;
    let ids = f.movies(5).await;
    let lists = Arc::new(SeaOrmListService::new(f.store.clone()));

    let mut tasks = Vec::new();
    for round in 0..20_usize {
        let lists = lists.clone();
        let mut wanted = ids.clone();
        wanted.rotate_left(round % ids.len());
        let mover = ids[round % ids.len()];
        tasks.push(tokio::spawn(async move {
            lists.reorder_watchlist(USER, &wanted).await?;
            lists
                .move_watchlist_item(USER, mover, i32::try_from(round % 7 + 1).unwrap())
                .await
                .map(|_| ())
        }));
    }

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let order = f.order(USER).await;
    let positions: Vec<i32> = order.iter().map(|(_, pos)| *pos).collect();
    assert_eq!(positions, vec![1, 2, 3, 4, 5]);

    let mut seen: Vec<MovieId> = order.into_iter().map(|(id, _)| id).collect();
    seen.sort_by_key(|id| id.value());
    assert_eq!(seen, ids);
}
