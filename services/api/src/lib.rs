//! Catalog and ordering backend for the perfume store
//!
//! Exposes product listing/search, curated selections, registration and
//! login with bearer tokens, profile management, and atomic order batch
//! ingestion over HTTP, backed by PostgreSQL.

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;
