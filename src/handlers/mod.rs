// src/handlers/mod.rs

pub mod auth;
pub mod movie;
pub mod profile;

/// Plain-text liveness answer for `GET /`.
pub async fn index() -> &'static str {
    "Movie review service is running"
}
