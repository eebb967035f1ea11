// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;

/// An account document as held by the user store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,

    /// Intended to be unique, but only partially checked at signup.
    pub username: String,

    /// Primary lookup key for every account mutation.
    pub email: String,

    /// Stored and compared as plain text.
    /// Never serialized into responses.
    #[serde(skip_serializing, default)]
    pub password: String,

    #[serde(default)]
    pub phone_number: Option<String>,

    #[serde(default)]
    pub profile_picture_url: Option<String>,

    /// Any other contact fields supplied at signup or by a contact update.
    #[serde(flatten)]
    pub contact: Map<String, Value>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Shallow merge of `patch` into this user; patched fields win.
    ///
    /// Store-maintained fields are left alone. Unknown keys land in `contact`.
    pub fn merge_contact(&mut self, patch: Map<String, Value>) -> Result<(), AppError> {
        for (key, value) in patch {
            match key.as_str() {
                "id" | "_id" | "createdAt" | "updatedAt" => {}
                "username" => self.username = required_string(&key, value)?,
                "email" => self.email = required_string(&key, value)?,
                "password" => self.password = required_string(&key, value)?,
                "phoneNumber" => self.phone_number = optional_string(&key, value)?,
                "profilePictureUrl" => self.profile_picture_url = optional_string(&key, value)?,
                _ => {
                    self.contact.insert(key, value);
                }
            }
        }
        Ok(())
    }
}

fn required_string(field: &str, value: Value) -> Result<String, AppError> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(AppError::BadRequest(format!("Field '{}' must be a string", field))),
    }
}

fn optional_string(field: &str, value: Value) -> Result<Option<String>, AppError> {
    match value {
        Value::Null => Ok(None),
        other => required_string(field, other).map(Some),
    }
}

/// DTO for the `userData` payload of a signup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(flatten)]
    pub contact: Map<String, Value>,
}

impl NewUser {
    /// Builds the stored document once the store has picked an id.
    pub fn into_user(mut self, id: i64, now: DateTime<Utc>) -> User {
        self.contact
            .retain(|key, _| !matches!(key.as_str(), "id" | "_id" | "createdAt" | "updatedAt"));

        User {
            id,
            username: self.username,
            email: self.email,
            password: self.password,
            phone_number: self.phone_number,
            profile_picture_url: self.profile_picture_url,
            contact: self.contact,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Field-equality predicate for `UserStore::find_one`.
#[derive(Debug, Clone, Copy)]
pub enum UserFilter<'a> {
    Id(i64),
    Username(&'a str),
    Email(&'a str),
    PhoneNumber(&'a str),
}

impl UserFilter<'_> {
    pub fn matches(&self, user: &User) -> bool {
        match *self {
            UserFilter::Id(id) => user.id == id,
            UserFilter::Username(username) => user.username == username,
            UserFilter::Email(email) => user.email == email,
            UserFilter::PhoneNumber(phone) => user.phone_number.as_deref() == Some(phone),
        }
    }
}

/// Projection of a user attached to each review when a movie is joined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReviewerSummary {
    pub id: i64,
    pub username: String,
    pub profile_picture_url: Option<String>,
}

impl From<&User> for ReviewerSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            profile_picture_url: user.profile_picture_url.clone(),
        }
    }
}

/// DTO for user login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// DTO for a signup request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub user_data: NewUser,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub email: String,
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfilePictureRequest {
    pub email: String,
    pub new_profile_picture_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    pub updated_contact_details: Map<String, Value>,
}
