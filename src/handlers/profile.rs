use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    error::AppError,
    extract::AppJson,
    models::user::{UpdateContactRequest, UpdateProfilePictureRequest},
    services::account,
    state::Users,
};

pub async fn update_profile_picture(
    State(users): State<Users>,
    AppJson(payload): AppJson<UpdateProfilePictureRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = account::update_profile_picture(
        users.as_ref(),
        &payload.email,
        &payload.new_profile_picture_url,
    )
    .await?;

    Ok(Json(json!({
        "message": "Profile Picture Updated",
        "user": user,
    })))
}

/// Merges the posted contact fields into the account found by the path email.
pub async fn update_contact_details(
    State(users): State<Users>,
    Path(email): Path<String>,
    AppJson(payload): AppJson<UpdateContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user =
        account::update_contact_details(users.as_ref(), &email, payload.updated_contact_details)
            .await?;

    Ok(Json(json!({
        "message": "Contact Details Updated",
        "user": user,
    })))
}

pub async fn find_by_phone_number(
    State(users): State<Users>,
    Path(phone_number): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = account::find_user_by_phone_number(users.as_ref(), &phone_number).await?;

    Ok(Json(json!({
        "message": "User Found",
        "user": user,
    })))
}
