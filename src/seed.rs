// src/seed.rs

use std::path::Path;

use validator::Validate;

use crate::{error::AppError, models::movie::NewMovie, store::MovieStore};

/// Inserts the movies listed in a JSON array file, skipping titles already
/// present and entries that fail validation. Returns how many were inserted.
pub async fn seed_movies(movies: &dyn MovieStore, path: impl AsRef<Path>) -> Result<usize, AppError> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::InternalServerError(format!("Cannot read {}: {}", path.display(), e))
    })?;
    let catalogue: Vec<NewMovie> = serde_json::from_str(&raw)?;

    let mut inserted = 0;
    for movie in catalogue {
        if let Err(e) = movie.validate() {
            tracing::warn!("Skipping movie '{}': {}", movie.title, e);
            continue;
        }
        if movies.find_by_title(&movie.title).await?.is_some() {
            tracing::debug!("Movie '{}' already present, skipping", movie.title);
            continue;
        }
        let movie = movies.create(movie).await?;
        tracing::info!("Seeded movie {} ({})", movie.id, movie.title);
        inserted += 1;
    }

    Ok(inserted)
}
