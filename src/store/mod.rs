// src/store/mod.rs

//! Document store seams.
//!
//! Handlers and services only see the two traits below; `MemoryStore` and
//! `PgStore` are the concrete backends.

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        movie::{JoinedMovie, Movie, NewMovie},
        user::{NewUser, User, UserFilter},
    },
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Persistence for account documents. No uniqueness is enforced here.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// First user matching `filter`, in insertion order.
    async fn find_one(&self, filter: UserFilter<'_>) -> Result<Option<User>, AppError>;

    /// Inserts a new user, assigning its id and timestamps.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;

    /// Writes the whole document back and refreshes `updated_at`.
    async fn save(&self, user: User) -> Result<User, AppError>;
}

/// Persistence for movie documents and their embedded reviews.
#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Movie>, AppError>;

    /// First movie with exactly this title, in insertion order.
    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, AppError>;

    /// Like `find_by_id`, with every review's user resolved to a reviewer summary.
    async fn find_by_id_with_reviewers(&self, id: i64) -> Result<Option<JoinedMovie>, AppError>;

    async fn create(&self, movie: NewMovie) -> Result<Movie, AppError>;

    /// Writes the whole document back and refreshes `updated_at`.
    async fn save(&self, movie: Movie) -> Result<Movie, AppError>;
}
