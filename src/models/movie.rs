// src/models/movie.rs

use std::{collections::HashMap, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user::ReviewerSummary;

/// Allowed values for `Movie::genre`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Drama,
    Comedy,
    Thriller,
    Fantasy,
    Romance,
    Sports,
    Musical,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Drama => "Drama",
            Genre::Comedy => "Comedy",
            Genre::Thriller => "Thriller",
            Genre::Fantasy => "Fantasy",
            Genre::Romance => "Romance",
            Genre::Sports => "Sports",
            Genre::Musical => "Musical",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Action" => Ok(Genre::Action),
            "Drama" => Ok(Genre::Drama),
            "Comedy" => Ok(Genre::Comedy),
            "Thriller" => Ok(Genre::Thriller),
            "Fantasy" => Ok(Genre::Fantasy),
            "Romance" => Ok(Genre::Romance),
            "Sports" => Ok(Genre::Sports),
            "Musical" => Ok(Genre::Musical),
            other => Err(format!("'{}' is not a valid genre", other)),
        }
    }
}

/// A review embedded in a movie.
///
/// `U` is the stored user id, or the joined reviewer once resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review<U = i64> {
    pub user: U,
    pub text: String,
}

/// A movie document with its embedded ratings and reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie<U = i64> {
    pub id: i64,
    pub title: String,
    pub release_year: i32,
    pub genre: Vec<Genre>,
    pub director: String,
    pub actors: Vec<String>,
    pub language: String,
    pub country: String,

    /// Editorial rating in [0, 10]. Not recomputed from `ratings`.
    pub rating: f64,

    pub plot: Option<String>,
    pub awards: Option<String>,
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,

    /// Individual user ratings, in insertion order.
    pub ratings: Vec<f64>,
    pub reviews: Vec<Review<U>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A movie whose review authors were resolved to reviewer summaries.
/// A review pointing at a missing user resolves to `None`.
pub type JoinedMovie = Movie<Option<ReviewerSummary>>;

impl Movie {
    /// Resolves each review's user id against `reviewers`.
    pub fn with_reviewers(self, reviewers: &HashMap<i64, ReviewerSummary>) -> JoinedMovie {
        let reviews = self
            .reviews
            .into_iter()
            .map(|review| Review {
                user: reviewers.get(&review.user).cloned(),
                text: review.text,
            })
            .collect();

        Movie {
            id: self.id,
            title: self.title,
            release_year: self.release_year,
            genre: self.genre,
            director: self.director,
            actors: self.actors,
            language: self.language,
            country: self.country,
            rating: self.rating,
            plot: self.plot,
            awards: self.awards,
            poster_url: self.poster_url,
            trailer_url: self.trailer_url,
            ratings: self.ratings,
            reviews,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Ids of every user referenced by a review, deduplicated.
    pub fn reviewer_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.reviews.iter().map(|review| review.user).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

fn default_country() -> String {
    "India".to_string()
}

/// DTO for inserting a movie (seeding only; there is no creation endpoint).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    pub title: String,
    pub release_year: i32,
    #[serde(default)]
    pub genre: Vec<Genre>,
    pub director: String,
    #[serde(default)]
    pub actors: Vec<String>,
    pub language: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 10.0, message = "Rating must be between 0 and 10"))]
    pub rating: f64,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub awards: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub trailer_url: Option<String>,
}

impl NewMovie {
    pub fn new(title: &str, release_year: i32, director: &str, language: &str) -> Self {
        Self {
            title: title.to_string(),
            release_year,
            genre: Vec::new(),
            director: director.to_string(),
            actors: Vec::new(),
            language: language.to_string(),
            country: default_country(),
            rating: 0.0,
            plot: None,
            awards: None,
            poster_url: None,
            trailer_url: None,
        }
    }

    pub fn into_movie(self, id: i64, now: DateTime<Utc>) -> Movie {
        Movie {
            id,
            title: self.title,
            release_year: self.release_year,
            genre: self.genre,
            director: self.director,
            actors: self.actors,
            language: self.language,
            country: self.country,
            rating: self.rating,
            plot: self.plot,
            awards: self.awards,
            poster_url: self.poster_url,
            trailer_url: self.trailer_url,
            ratings: Vec::new(),
            reviews: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// The `reviewData` payload of a rating submission.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewData {
    #[validate(range(min = 0.0, max = 10.0, message = "Rating must be between 0 and 10"))]
    pub rating: f64,
    pub user_id: i64,
    #[serde(default)]
    pub review: String,
}

/// A review as returned by the review listing, with its author joined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewWithUser {
    pub review: String,
    pub user: Option<ReviewerSummary>,
}
