use crate::cache::{ListApi, ListCache};

pub async fn cmd_search<A: ListApi>(cache: &ListCache<A>, query: &str) -> anyhow::Result<()> {
    println!("Searching for: {query}");

    let results = cache.api().search(query).await?;

    if results.is_empty() {
        println!("No movies found matching '{query}'");
        return Ok(());
    }

    println!();
    println!("Search Results:");
    println!("{:-<60}", "");

    for movie in results.iter().take(10) {
        println!("• {} ({})", movie.title, movie.year);
        println!("  IMDb: {}", movie.imdb_id);
    }

    println!();
    println!("To add a movie: cinema add <imdb_id>");

    Ok(())
}

pub async fn cmd_show<A: ListApi>(cache: &ListCache<A>, imdb_id: &str) -> anyhow::Result<()> {
    let details = cache.api().movie(imdb_id).await?;
    let movie = &details.movie;

    println!("{} ({})", movie.title, movie.year);
    println!("{:-<60}", "");
    println!("Movie ID:  {}", movie.id);
    println!("IMDb:      {}", movie.imdb_id);
    println!("Director:  {}", movie.director);
    if let Some(runtime) = &movie.runtime {
        println!("Runtime:   {runtime}");
    }
    if let Some(genre) = &movie.genre {
        println!("Genre:     {genre}");
    }
    if let Some(actors) = &movie.actors {
        println!("Cast:      {actors}");
    }
    println!();
    println!("{}", movie.plot);
    println!();

    if details.in_watched_list {
        let date = details.watched_date.as_deref().unwrap_or("?");
        println!("✓ Watched on {}", date.get(..10).unwrap_or(date));
        if let Some(review) = &details.review {
            println!("  \"{review}\"");
        }
    } else if let Some(order) = details.order {
        println!("On your watch list at position {order}");
    } else {
        println!("Not on your lists. Add it with: cinema add {}", movie.imdb_id);
    }

    Ok(())
}
