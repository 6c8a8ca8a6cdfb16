//! Watch list command handlers

use crate::cache::{ListApi, ListCache};
use crate::domain::MovieId;

pub async fn cmd_add<A: ListApi>(cache: &ListCache<A>, imdb_id: &str) -> anyhow::Result<()> {
    // Details lookup stores the movie server-side and gives us its id.
    let details = cache.api().movie(imdb_id).await?;

    if details.in_watched_list {
        println!("'{}' is already on your watched list.", details.movie.title);
        return Ok(());
    }

    let entry = cache
        .add_to_watchlist(MovieId::new(details.movie.id))
        .await?;

    println!(
        "✓ Added: {} (position {}, ID: {})",
        details.movie.title, entry.order, entry.movie_id
    );

    Ok(())
}

pub async fn cmd_list<A: ListApi>(cache: &ListCache<A>) -> anyhow::Result<()> {
    cache.refresh().await?;
    let items = cache.watchlist().await;

    if items.is_empty() {
        println!("Your watch list is empty.");
        println!();
        println!("Find something with: cinema search \"title\"");
        return Ok(());
    }

    println!("Watch List ({} total)", items.len());
    println!("{:-<70}", "");

    for item in items {
        println!(
            "{:>3}. {} ({})",
            item.order, item.movie.title, item.movie.year
        );
        println!(
            "     ID: {} | Director: {}",
            item.movie.id, item.movie.director
        );
    }

    Ok(())
}

pub async fn cmd_reorder<A: ListApi>(
    cache: &ListCache<A>,
    from: i32,
    to: i32,
) -> anyhow::Result<()> {
    cache.refresh().await?;
    let landed = cache.reorder(from, to).await?;

    println!("✓ Moved entry {from} to position {landed}");
    Ok(())
}

pub async fn cmd_remove<A: ListApi>(cache: &ListCache<A>, movie_id: i32) -> anyhow::Result<()> {
    cache.remove_from_watchlist(MovieId::new(movie_id)).await?;

    println!("✓ Removed movie {movie_id} from your watch list");
    Ok(())
}
