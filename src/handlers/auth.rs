// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::{
    error::AppError,
    extract::AppJson,
    models::user::{ChangePasswordRequest, LoginRequest, SignupRequest},
    services::account,
    state::Users,
};

/// Registers a new user.
///
/// Returns 201 Created and the stored user (without its password).
pub async fn signup(
    State(users): State<Users>,
    AppJson(payload): AppJson<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = account::signup(users.as_ref(), payload.user_data).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User Registered",
            "user": user,
        })),
    ))
}

/// Checks email and password. No token is issued.
pub async fn login(
    State(users): State<Users>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = account::login(users.as_ref(), &payload.email, &payload.password).await?;

    Ok(Json(json!({
        "message": "User Logged In",
        "user": user,
    })))
}

/// Changes a password after checking the current one.
/// The `{user_id}` path segment is not used; the account is found by email.
pub async fn change_password(
    State(users): State<Users>,
    AppJson(payload): AppJson<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = account::change_password(
        users.as_ref(),
        &payload.email,
        &payload.current_password,
        &payload.new_password,
    )
    .await?;

    Ok(Json(json!({
        "message": "Password Changed Successfully",
        "user": user,
    })))
}
