// src/store/postgres.rs

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::{FromRow, PgPool, types::Json};
use validator::Validate;

use super::{MovieStore, UserStore};
use crate::{
    error::AppError,
    models::{
        movie::{Genre, JoinedMovie, Movie, NewMovie, Review},
        user::{NewUser, ReviewerSummary, User, UserFilter},
    },
};

const USER_COLUMNS: &str = "id, username, email, password, phone_number, profile_picture_url, \
     contact, created_at, updated_at";

const MOVIE_COLUMNS: &str = "id, title, release_year, genre, director, actors, language, country, \
     rating, plot, awards, poster_url, trailer_url, ratings, reviews, created_at, updated_at";

/// Row shape of the 'users' table.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password: String,
    phone_number: Option<String>,
    profile_picture_url: Option<String>,
    contact: Json<Map<String, Value>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            password: row.password,
            phone_number: row.phone_number,
            profile_picture_url: row.profile_picture_url,
            contact: row.contact.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Row shape of the 'movies' table.
#[derive(Debug, FromRow)]
struct MovieRow {
    id: i64,
    title: String,
    release_year: i32,
    genre: Vec<String>,
    director: String,
    actors: Vec<String>,
    language: String,
    country: String,
    rating: f64,
    plot: Option<String>,
    awards: Option<String>,
    poster_url: Option<String>,
    trailer_url: Option<String>,
    ratings: Vec<f64>,
    reviews: Json<Vec<Review>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MovieRow> for Movie {
    type Error = AppError;

    fn try_from(row: MovieRow) -> Result<Self, Self::Error> {
        let genre = row
            .genre
            .iter()
            .map(|g| g.parse::<Genre>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::InternalServerError(format!("movie {}: {}", row.id, e)))?;

        Ok(Movie {
            id: row.id,
            title: row.title,
            release_year: row.release_year,
            genre,
            director: row.director,
            actors: row.actors,
            language: row.language,
            country: row.country,
            rating: row.rating,
            plot: row.plot,
            awards: row.awards,
            poster_url: row.poster_url,
            trailer_url: row.trailer_url,
            ratings: row.ratings,
            reviews: row.reviews.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn genre_names(genre: &[Genre]) -> Vec<String> {
    genre.iter().map(Genre::to_string).collect()
}

/// PostgreSQL-backed document store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_user_by_text(
        &self,
        column: &str,
        value: &str,
    ) -> Result<Option<UserRow>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM users WHERE {} = $1 ORDER BY id LIMIT 1",
            USER_COLUMNS, column
        );
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_one(&self, filter: UserFilter<'_>) -> Result<Option<User>, AppError> {
        let row = match filter {
            UserFilter::Id(id) => {
                let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
                sqlx::query_as::<_, UserRow>(&sql)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            UserFilter::Username(username) => self.find_user_by_text("username", username).await?,
            UserFilter::Email(email) => self.find_user_by_text("email", email).await?,
            UserFilter::PhoneNumber(phone) => {
                self.find_user_by_text("phone_number", phone).await?
            }
        };

        Ok(row.map(User::from))
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        // id and timestamps are assigned by the database
        let user = user.into_user(0, Utc::now());

        let sql = format!(
            r#"
            INSERT INTO users (username, email, password, phone_number, profile_picture_url, contact)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.username)
            .bind(user.email)
            .bind(user.password)
            .bind(user.phone_number)
            .bind(user.profile_picture_url)
            .bind(Json(user.contact))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert user: {:?}", e);
                AppError::from(e)
            })?;

        Ok(row.into())
    }

    async fn save(&self, user: User) -> Result<User, AppError> {
        let sql = format!(
            r#"
            UPDATE users
            SET username = $2, email = $3, password = $4, phone_number = $5,
                profile_picture_url = $6, contact = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let id = user.id;
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.id)
            .bind(user.username)
            .bind(user.email)
            .bind(user.password)
            .bind(user.phone_number)
            .bind(user.profile_picture_url)
            .bind(Json(user.contact))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::InternalServerError(format!("No user document with id {}", id)))?;

        Ok(row.into())
    }
}

#[async_trait]
impl MovieStore for PgStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Movie>, AppError> {
        let sql = format!("SELECT {} FROM movies WHERE id = $1", MOVIE_COLUMNS);
        let row = sqlx::query_as::<_, MovieRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Movie::try_from).transpose()
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, AppError> {
        let sql = format!(
            "SELECT {} FROM movies WHERE title = $1 ORDER BY id LIMIT 1",
            MOVIE_COLUMNS
        );
        let row = sqlx::query_as::<_, MovieRow>(&sql)
            .bind(title)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Movie::try_from).transpose()
    }

    async fn find_by_id_with_reviewers(&self, id: i64) -> Result<Option<JoinedMovie>, AppError> {
        let Some(movie) = MovieStore::find_by_id(self, id).await? else {
            return Ok(None);
        };

        let ids = movie.reviewer_ids();
        let reviewers: HashMap<i64, ReviewerSummary> = if ids.is_empty() {
            HashMap::new()
        } else {
            sqlx::query_as::<_, ReviewerSummary>(
                "SELECT id, username, profile_picture_url FROM users WHERE id = ANY($1)",
            )
            .bind(ids)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|reviewer| (reviewer.id, reviewer))
            .collect()
        };

        Ok(Some(movie.with_reviewers(&reviewers)))
    }

    async fn create(&self, movie: NewMovie) -> Result<Movie, AppError> {
        movie
            .validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let sql = format!(
            r#"
            INSERT INTO movies (title, release_year, genre, director, actors, language, country,
                                rating, plot, awards, poster_url, trailer_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            MOVIE_COLUMNS
        );

        let row = sqlx::query_as::<_, MovieRow>(&sql)
            .bind(movie.title)
            .bind(movie.release_year)
            .bind(genre_names(&movie.genre))
            .bind(movie.director)
            .bind(movie.actors)
            .bind(movie.language)
            .bind(movie.country)
            .bind(movie.rating)
            .bind(movie.plot)
            .bind(movie.awards)
            .bind(movie.poster_url)
            .bind(movie.trailer_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert movie: {:?}", e);
                AppError::from(e)
            })?;

        Movie::try_from(row)
    }

    async fn save(&self, movie: Movie) -> Result<Movie, AppError> {
        let sql = format!(
            r#"
            UPDATE movies
            SET title = $2, release_year = $3, genre = $4, director = $5, actors = $6,
                language = $7, country = $8, rating = $9, plot = $10, awards = $11,
                poster_url = $12, trailer_url = $13, ratings = $14, reviews = $15,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            MOVIE_COLUMNS
        );

        let id = movie.id;
        let row = sqlx::query_as::<_, MovieRow>(&sql)
            .bind(movie.id)
            .bind(movie.title)
            .bind(movie.release_year)
            .bind(genre_names(&movie.genre))
            .bind(movie.director)
            .bind(movie.actors)
            .bind(movie.language)
            .bind(movie.country)
            .bind(movie.rating)
            .bind(movie.plot)
            .bind(movie.awards)
            .bind(movie.poster_url)
            .bind(movie.trailer_url)
            .bind(movie.ratings)
            .bind(Json(movie.reviews))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::InternalServerError(format!("No movie document with id {}", id))
            })?;

        Movie::try_from(row)
    }
}
