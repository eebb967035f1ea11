// src/store/memory.rs

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use validator::Validate;

use super::{MovieStore, UserStore};
use crate::{
    error::AppError,
    models::{
        movie::{JoinedMovie, Movie, NewMovie},
        user::{NewUser, ReviewerSummary, User, UserFilter},
    },
};

#[derive(Default)]
struct Collections {
    users: BTreeMap<i64, User>,
    movies: BTreeMap<i64, Movie>,
    last_user_id: i64,
    last_movie_id: i64,
}

/// Process-local document store. Ids are assigned sequentially from 1.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_one(&self, filter: UserFilter<'_>) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|user| filter.matches(user)).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut inner = self.inner.write().await;
        inner.last_user_id += 1;
        let user = user.into_user(inner.last_user_id, Utc::now());
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn save(&self, mut user: User) -> Result<User, AppError> {
        let mut inner = self.inner.write().await;
        let Some(slot) = inner.users.get_mut(&user.id) else {
            return Err(AppError::InternalServerError(format!(
                "No user document with id {}",
                user.id
            )));
        };
        user.updated_at = Utc::now();
        *slot = user.clone();
        Ok(user)
    }
}

#[async_trait]
impl MovieStore for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Movie>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.movies.get(&id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.movies.values().find(|movie| movie.title == title).cloned())
    }

    async fn find_by_id_with_reviewers(&self, id: i64) -> Result<Option<JoinedMovie>, AppError> {
        let inner = self.inner.read().await;
        let Some(movie) = inner.movies.get(&id).cloned() else {
            return Ok(None);
        };

        let reviewers: HashMap<i64, ReviewerSummary> = movie
            .reviewer_ids()
            .into_iter()
            .filter_map(|user_id| inner.users.get(&user_id))
            .map(|user| (user.id, ReviewerSummary::from(user)))
            .collect();

        Ok(Some(movie.with_reviewers(&reviewers)))
    }

    async fn create(&self, movie: NewMovie) -> Result<Movie, AppError> {
        movie
            .validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let mut inner = self.inner.write().await;
        inner.last_movie_id += 1;
        let movie = movie.into_movie(inner.last_movie_id, Utc::now());
        inner.movies.insert(movie.id, movie.clone());
        Ok(movie)
    }

    async fn save(&self, mut movie: Movie) -> Result<Movie, AppError> {
        let mut inner = self.inner.write().await;
        let Some(slot) = inner.movies.get_mut(&movie.id) else {
            return Err(AppError::InternalServerError(format!(
                "No movie document with id {}",
                movie.id
            )));
        };
        movie.updated_at = Utc::now();
        *slot = movie.clone();
        Ok(movie)
    }
}
