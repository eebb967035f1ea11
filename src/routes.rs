// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{self, auth, movie, profile},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Account routes (signup, login, password, profile, contact, phone lookup).
/// * Movie review routes.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let account_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/user/{user_id}/password", post(auth::change_password))
        .route(
            "/update-profile-picture",
            post(profile::update_profile_picture),
        )
        .route("/update-contact/{email}", post(profile::update_contact_details))
        .route("/users/phone/{phone_number}", get(profile::find_by_phone_number));

    let movie_routes = Router::new()
        .route("/{movie_id}/rating", post(movie::add_rating))
        .route("/{movie_id}/reviews", get(movie::list_reviews));

    Router::new()
        .route("/", get(handlers::index))
        .merge(account_routes)
        .nest("/movies", movie_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
