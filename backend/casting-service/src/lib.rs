//! Casting Service
//!
//! Movies and actors catalogue. Every endpoint apart from `/health` sits
//! behind an `auth-gate` permission check.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

// Public re-exports
pub use config::Config;
pub use error::{AppError, Result};
