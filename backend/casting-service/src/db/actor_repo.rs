/// Actor repository - database operations for actors
use sqlx::PgPool;

use crate::models::{Actor, CreateActorRequest, UpdateActorRequest};

pub async fn list_actors(pool: &PgPool) -> Result<Vec<Actor>, sqlx::Error> {
    sqlx::query_as::<_, Actor>("SELECT id, name, age, gender FROM actors ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn create_actor(pool: &PgPool, actor: &CreateActorRequest) -> Result<Actor, sqlx::Error> {
    sqlx::query_as::<_, Actor>(
        "INSERT INTO actors (name, age, gender) VALUES ($1, $2, $3) \
         RETURNING id, name, age, gender",
    )
    .bind(&actor.name)
    .bind(actor.age)
    .bind(&actor.gender)
    .fetch_one(pool)
    .await
}

pub async fn update_actor(
    pool: &PgPool,
    id: i32,
    changes: &UpdateActorRequest,
) -> Result<Option<Actor>, sqlx::Error> {
    sqlx::query_as::<_, Actor>(
        "UPDATE actors SET \
         name = COALESCE($2, name), \
         age = COALESCE($3, age), \
         gender = COALESCE($4, gender) \
         WHERE id = $1 \
         RETURNING id, name, age, gender",
    )
    .bind(id)
    .bind(changes.name.as_deref())
    .bind(changes.age)
    .bind(changes.gender.as_deref())
    .fetch_optional(pool)
    .await
}

pub async fn delete_actor(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM actors WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
