use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{Value, json};

use crate::{
    error::AppError,
    extract::AppJson,
    services::review,
    state::Movies,
};

/// Adds a rating and review, answering with the movie and its joined reviewers.
///
/// `reviewData` is handed to the service untyped so a malformed payload is
/// reported like any other failure of the operation.
pub async fn add_rating(
    State(movies): State<Movies>,
    Path(movie_id): Path<String>,
    AppJson(mut payload): AppJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    let review_data = payload
        .get_mut("reviewData")
        .map(Value::take)
        .unwrap_or(Value::Null);

    let movie = review::add_rating_and_review(movies.as_ref(), &movie_id, review_data).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Review Added",
            "movie": movie,
        })),
    ))
}

/// Lists the first reviews of a movie with reviewer details.
pub async fn list_reviews(
    State(movies): State<Movies>,
    Path(movie_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let reviews = review::get_movie_reviews_with_user_details(movies.as_ref(), &movie_id).await?;

    Ok(Json(json!({
        "message": "Reviews Found",
        "reviews": reviews,
    })))
}
