//! Data models for the casting catalogue
//!
//! `Movie` and `Actor` map one-to-one onto their tables. Request bodies are
//! separate types checked with `validator` before they reach the database.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

// =============================================================================
// Database Models
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub release_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Actor {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub gender: String,
}

// =============================================================================
// API Request Models
// =============================================================================

/// Request to add a movie
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMovieRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    /// ISO-8601 date, e.g. `2024-05-17`
    pub release_date: NaiveDate,
}

/// Request to add an actor
#[derive(Debug, Deserialize, Validate)]
pub struct CreateActorRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(range(min = 1, max = 150))]
    pub age: i32,

    #[validate(length(min = 1, max = 50))]
    pub gender: String,
}

/// Partial movie update; absent fields keep their stored value
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateMovieRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    pub release_date: Option<NaiveDate>,
}

/// Partial actor update; absent fields keep their stored value
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateActorRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(range(min = 1, max = 150))]
    pub age: Option<i32>,

    #[validate(length(min = 1, max = 50))]
    pub gender: Option<String>,
}

// =============================================================================
// API Response Models
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct MoviesResponse {
    pub success: bool,
    pub movies: Vec<Movie>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MovieResponse {
    pub success: bool,
    pub movie: Movie,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActorsResponse {
    pub success: bool,
    pub actors: Vec<Actor>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActorResponse {
    pub success: bool,
    pub actor: Actor,
}

/// Body returned by both delete endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub delete: i32,
}
