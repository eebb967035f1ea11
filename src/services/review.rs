// src/services/review.rs

use serde_json::Value;
use validator::Validate;

use crate::{
    error::AppError,
    models::movie::{JoinedMovie, Review, ReviewData, ReviewWithUser},
    store::MovieStore,
};

/// How many reviews the review listing returns.
pub const REVIEW_PREVIEW_LEN: usize = 3;

/// Appends a rating and a review to a movie and returns it with reviewers joined.
///
/// `review_data` is the raw `reviewData` payload. Every failure, including a
/// payload that does not parse, is reported as `MovieNotFound`. The save and
/// the re-read are separate store calls; a review added concurrently in between shows up in
/// the result, and a concurrent save of the same movie can drop one append.
pub async fn add_rating_and_review(
    movies: &dyn MovieStore,
    movie_id: &str,
    review_data: Value,
) -> Result<JoinedMovie, AppError> {
    append_review(movies, movie_id, review_data)
        .await
        .map_err(|e| {
            tracing::warn!("Adding review to movie {} failed: {}", movie_id, e);
            AppError::MovieNotFound
        })
}

async fn append_review(
    movies: &dyn MovieStore,
    movie_id: &str,
    review_data: Value,
) -> Result<JoinedMovie, AppError> {
    let id = parse_movie_id(movie_id)?;

    let review_data: ReviewData = serde_json::from_value(review_data)?;
    review_data
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut movie = movies
        .find_by_id(id)
        .await?
        .ok_or(AppError::MovieNotFound)?;

    movie.ratings.push(review_data.rating);
    movie.reviews.push(Review {
        user: review_data.user_id,
        text: review_data.review,
    });
    movies.save(movie).await?;

    movies
        .find_by_id_with_reviewers(id)
        .await?
        .ok_or(AppError::MovieNotFound)
}

/// Returns the first reviews of a movie, in stored order, with reviewers joined.
pub async fn get_movie_reviews_with_user_details(
    movies: &dyn MovieStore,
    movie_id: &str,
) -> Result<Vec<ReviewWithUser>, AppError> {
    let movie = movies
        .find_by_id_with_reviewers(parse_movie_id(movie_id)?)
        .await?
        .ok_or_else(movie_not_found)?;

    Ok(movie
        .reviews
        .into_iter()
        .take(REVIEW_PREVIEW_LEN)
        .map(|review| ReviewWithUser {
            review: review.text,
            user: review.user,
        })
        .collect())
}

fn parse_movie_id(movie_id: &str) -> Result<i64, AppError> {
    movie_id.parse().map_err(|_| movie_not_found())
}

fn movie_not_found() -> AppError {
    AppError::NotFound("Movie Not Found".to_string())
}
