// src/models/mod.rs

pub mod movie;
pub mod user;
