/// Movie repository - database operations for movies
use sqlx::PgPool;

use crate::models::{CreateMovieRequest, Movie, UpdateMovieRequest};

pub async fn list_movies(pool: &PgPool) -> Result<Vec<Movie>, sqlx::Error> {
    sqlx::query_as::<_, Movie>("SELECT id, title, release_date FROM movies ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn create_movie(pool: &PgPool, movie: &CreateMovieRequest) -> Result<Movie, sqlx::Error> {
    sqlx::query_as::<_, Movie>(
        "INSERT INTO movies (title, release_date) VALUES ($1, $2) \
         RETURNING id, title, release_date",
    )
    .bind(&movie.title)
    .bind(movie.release_date)
    .fetch_one(pool)
    .await
}

/// Apply a partial update. `None` when no movie has this id.
pub async fn update_movie(
    pool: &PgPool,
    id: i32,
    changes: &UpdateMovieRequest,
) -> Result<Option<Movie>, sqlx::Error> {
    sqlx::query_as::<_, Movie>(
        "UPDATE movies SET \
         title = COALESCE($2, title), \
         release_date = COALESCE($3, release_date) \
         WHERE id = $1 \
         RETURNING id, title, release_date",
    )
    .bind(id)
    .bind(changes.title.as_deref())
    .bind(changes.release_date)
    .fetch_optional(pool)
    .await
}

/// Returns false when no movie has this id
pub async fn delete_movie(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM movies WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
