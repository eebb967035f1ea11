// src/error.rs

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Global Application Error Enum.
/// Every variant is reported to the client as a 500 with its message.
#[derive(Debug)]
pub enum AppError {
    // Signup: both the username and the email are already registered
    UserAlreadyRegistered,

    // Signup: the username alone is already registered
    UsernameTaken,

    // Lookup by email, phone number or movie id came back empty
    NotFound(String),

    // Password did not match the stored one
    InvalidCredentials,

    // Any failure while adding a rating and review
    MovieNotFound,

    // Malformed request body or patch
    BadRequest(String),

    // Store failure; the detail is logged, never returned
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::UserAlreadyRegistered => f.write_str("User already registered"),
            AppError::UsernameTaken => f.write_str("Username already taken"),
            AppError::NotFound(msg) | AppError::BadRequest(msg) => f.write_str(msg),
            AppError::InvalidCredentials => f.write_str("Incorrect Password"),
            AppError::MovieNotFound => f.write_str("Movie Not Found"),
            AppError::InternalServerError(_) => f.write_str("Internal Server Error"),
        }
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// The status is always 500; the body carries the error message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::InternalServerError(detail) = &self {
            tracing::error!("Internal Server Error: {}", detail);
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::InternalServerError`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
