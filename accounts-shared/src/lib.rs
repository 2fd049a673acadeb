//! # Accounts Shared Library
//!
//! This crate contains the domain types, storage ports and business rules
//! used by the accounts API server.
//!
//! ## Module Organization
//!
//! - `models`: Entities, request inputs and response shapes
//! - `repository`: Storage ports with in-memory and PostgreSQL backends
//! - `services`: User and address business rules
//! - `auth`: Password hashing
//! - `db`: Connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;
pub mod repository;
pub mod services;

/// Current version of the accounts shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
