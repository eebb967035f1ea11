// src/services/mod.rs

//! Request-independent business rules. Each function is one
//! read-modify-write against a store.

pub mod account;
pub mod review;
