use crate::cache::{ListApi, ListCache};
use crate::domain::{MovieId, Review};

pub async fn cmd_watched<A: ListApi>(cache: &ListCache<A>) -> anyhow::Result<()> {
    cache.refresh().await?;
    let items = cache.watched().await;

    if items.is_empty() {
        println!("You have not watched anything yet.");
        return Ok(());
    }

    println!("Watched ({} total)", items.len());
    println!("{:-<70}", "");

    for item in items {
        let date = item.watched_date.get(..10).unwrap_or(item.watched_date.as_str());
        let rating = item
            .rating
            .map(|r| format!(" | {r}/10"))
            .unwrap_or_default();

        println!("✓ {} ({}) on {}{}", item.movie.title, item.movie.year, date, rating);
        if let Some(review) = item.review.as_deref().filter(|r| !r.is_empty()) {
            println!("  \"{review}\"");
        }
    }

    Ok(())
}

pub async fn cmd_watch<A: ListApi>(
    cache: &ListCache<A>,
    movie_id: i32,
    review: Option<&str>,
) -> anyhow::Result<()> {
    let review = review.map(Review::parse).transpose()?;
    cache
        .move_to_watched(MovieId::new(movie_id), review)
        .await?;

    println!("✓ Moved movie {movie_id} to your watched list");
    Ok(())
}

pub async fn cmd_review<A: ListApi>(
    cache: &ListCache<A>,
    movie_id: i32,
    text: &str,
) -> anyhow::Result<()> {
    let review = Review::parse(text)?;
    cache.update_review(MovieId::new(movie_id), review).await?;

    println!("✓ Review saved");
    Ok(())
}

pub async fn cmd_remove_watched<A: ListApi>(
    cache: &ListCache<A>,
    movie_id: i32,
) -> anyhow::Result<()> {
    cache.remove_from_watched(MovieId::new(movie_id)).await?;

    println!("✓ Removed movie {movie_id} from your watched list");
    Ok(())
}
