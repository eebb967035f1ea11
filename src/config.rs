// src/config.rs

use dotenvy::dotenv;
use std::{env, fmt};

#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string. The in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Loaded for parity with deployments; nothing signs or verifies with it yet.
    pub jwt_secret: String,
    pub port: u16,
    pub rust_log: String,
    /// Optional JSON file with movies to insert at startup.
    pub movie_seed_file: Option<String>,
}

/// A variable is set but cannot be used.
#[derive(Debug)]
pub enum ConfigError {
    InvalidPort(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort(raw) => write!(f, "PORT must be a port number, got '{}'", raw),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_default();

        let port = parse_port(env::var("PORT").ok())?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let movie_seed_file = env::var("MOVIE_SEED_FILE").ok();

        Ok(Self {
            database_url,
            jwt_secret,
            port,
            rust_log,
            movie_seed_file,
        })
    }
}

/// Defaults to 3000 when unset; refuses anything that is not a port number.
fn parse_port(raw: Option<String>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(3000),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw)),
    }
}
