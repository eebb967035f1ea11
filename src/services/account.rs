// src/services/account.rs

use serde_json::{Map, Value};

use crate::{
    error::AppError,
    models::user::{NewUser, User, UserFilter},
    store::UserStore,
};

const USER_NOT_FOUND: &str = "User Not Found or Incorrect Email Entered";
const EMAIL_NOT_FOUND: &str = "Email Not Found";
const PHONE_NOT_FOUND: &str = "Phone number not associated with any user";

/// Registers a new account from `user_data` as given.
///
/// Rejects when the username is taken, reporting "already registered" if the
/// email is taken as well. A taken email with a free username is accepted.
pub async fn signup(users: &dyn UserStore, user_data: NewUser) -> Result<User, AppError> {
    let found_username = users
        .find_one(UserFilter::Username(&user_data.username))
        .await?;
    let found_email = users.find_one(UserFilter::Email(&user_data.email)).await?;

    match (found_username, found_email) {
        (Some(_), Some(_)) => return Err(AppError::UserAlreadyRegistered),
        (Some(_), None) => return Err(AppError::UsernameTaken),
        _ => {}
    }

    let user = users.create(user_data).await?;
    tracing::info!("Registered user {} ({})", user.id, user.username);

    Ok(user)
}

/// Checks `password` against the account registered under `email`.
pub async fn login(users: &dyn UserStore, email: &str, password: &str) -> Result<User, AppError> {
    let user = find_by_email(users, email, USER_NOT_FOUND).await?;

    if user.password != password {
        tracing::debug!("Password mismatch for user {}", user.id);
        return Err(AppError::InvalidCredentials);
    }

    Ok(user)
}

pub async fn change_password(
    users: &dyn UserStore,
    email: &str,
    current_password: &str,
    new_password: &str,
) -> Result<User, AppError> {
    let mut user = login(users, email, current_password).await?;

    user.password = new_password.to_string();
    let user = users.save(user).await?;
    tracing::info!("Password changed for user {}", user.id);

    Ok(user)
}

pub async fn update_profile_picture(
    users: &dyn UserStore,
    email: &str,
    new_profile_picture_url: &str,
) -> Result<User, AppError> {
    let mut user = find_by_email(users, email, USER_NOT_FOUND).await?;

    user.profile_picture_url = Some(new_profile_picture_url.to_string());
    users.save(user).await
}

/// Shallow-merges `updated_contact_details` into the account; patched fields win.
pub async fn update_contact_details(
    users: &dyn UserStore,
    email: &str,
    updated_contact_details: Map<String, Value>,
) -> Result<User, AppError> {
    let mut user = find_by_email(users, email, EMAIL_NOT_FOUND).await?;

    user.merge_contact(updated_contact_details)?;
    users.save(user).await
}

pub async fn find_user_by_phone_number(
    users: &dyn UserStore,
    phone_number: &str,
) -> Result<User, AppError> {
    users
        .find_one(UserFilter::PhoneNumber(phone_number))
        .await?
        .ok_or_else(|| AppError::NotFound(PHONE_NOT_FOUND.to_string()))
}

async fn find_by_email(
    users: &dyn UserStore,
    email: &str,
    not_found: &str,
) -> Result<User, AppError> {
    users
        .find_one(UserFilter::Email(email))
        .await?
        .ok_or_else(|| AppError::NotFound(not_found.to_string()))
}
