use std::sync::Arc;

use crate::config::Config;
use crate::store::{MemoryStore, MovieStore, PgStore, UserStore};
use axum::extract::FromRef;
use sqlx::PgPool;

pub type Users = Arc<dyn UserStore>;
pub type Movies = Arc<dyn MovieStore>;

#[derive(Clone)]
pub struct AppState {
    pub users: Users,
    pub movies: Movies,
    pub config: Config,
}

impl AppState {
    /// State backed by a fresh process-local store.
    pub fn in_memory(config: Config) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            movies: store,
            config,
        }
    }

    pub fn postgres(pool: PgPool, config: Config) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self {
            users: store.clone(),
            movies: store,
            config,
        }
    }
}

impl FromRef<AppState> for Users {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for Movies {
    fn from_ref(state: &AppState) -> Self {
        state.movies.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
