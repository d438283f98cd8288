//! List movies command handler

use crate::config::Config;
use crate::db::Store;
use crate::models::Movie;

pub async fn cmd_list_movies(config: &Config, skip: u64, take: u64) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let total = store.count_movies().await?;
    let movies: Vec<Movie> = store
        .list_movies(skip, take)
        .await?
        .into_iter()
        .map(Movie::from)
        .collect();

    if movies.is_empty() {
        println!("No movies found ({} stored).", total);
        return Ok(());
    }

    let shown = u64::try_from(movies.len()).unwrap_or(u64::MAX);
    println!(
        "Movies {}-{} of {}",
        skip.saturating_add(1),
        skip.saturating_add(shown),
        total
    );
    println!("{:-<70}", "");

    for movie in movies {
        let released = movie
            .release_date
            .map_or_else(|| "unknown".to_string(), |d| d.to_string());

        println!("{} [{} min]", movie.title, movie.duration);
        println!(
            "  ID: {} | Genre: {} | Released: {}",
            movie.id, movie.genre, released
        );
    }

    Ok(())
}
