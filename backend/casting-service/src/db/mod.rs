/// Database access layer for casting-service
pub mod actor_repo;
pub mod movie_repo;
pub mod schema;
