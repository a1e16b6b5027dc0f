/// Table bootstrap run once at startup
use sqlx::PgPool;
use tracing::{info, warn};

const CREATE_MOVIES: &str = "CREATE TABLE IF NOT EXISTS movies (
    id SERIAL PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    release_date DATE NOT NULL
)";

const CREATE_ACTORS: &str = "CREATE TABLE IF NOT EXISTS actors (
    id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    age INTEGER NOT NULL CHECK (age BETWEEN 1 AND 150),
    gender VARCHAR(50) NOT NULL
)";

/// Create the `movies` and `actors` tables if they are missing
///
/// With `reset` set, existing tables and their rows are dropped first.
pub async fn ensure_schema(pool: &PgPool, reset: bool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    if reset {
        warn!("DB_RESET_ON_START set; dropping movies and actors");
        sqlx::query("DROP TABLE IF EXISTS movies, actors")
            .execute(&mut *tx)
            .await?;
    }

    sqlx::query(CREATE_MOVIES).execute(&mut *tx).await?;
    sqlx::query(CREATE_ACTORS).execute(&mut *tx).await?;

    tx.commit().await?;
    info!(reset, "Schema ready");
    Ok(())
}
