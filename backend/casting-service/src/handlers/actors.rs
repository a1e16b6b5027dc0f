/// Actor handlers - HTTP endpoints for actor operations
use actix_web::{web, HttpResponse};
use auth_gate::Claims;
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::db::actor_repo;
use crate::error::{AppError, Result};
use crate::models::{
    ActorResponse, ActorsResponse, CreateActorRequest, DeleteResponse, UpdateActorRequest,
};

pub async fn list_actors(_claims: Claims, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let actors = actor_repo::list_actors(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(ActorsResponse {
        success: true,
        actors,
    }))
}

pub async fn create_actor(
    claims: Claims,
    pool: web::Data<PgPool>,
    req: web::Json<CreateActorRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let actor = actor_repo::create_actor(pool.get_ref(), &req).await?;
    info!(actor_id = actor.id, sub = ?claims.sub, "Actor created");

    Ok(HttpResponse::Ok().json(ActorResponse {
        success: true,
        actor,
    }))
}

pub async fn update_actor(
    claims: Claims,
    pool: web::Data<PgPool>,
    actor_id: web::Path<i32>,
    req: web::Json<UpdateActorRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let actor_id = actor_id.into_inner();

    let actor = actor_repo::update_actor(pool.get_ref(), actor_id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("resource not found".to_string()))?;
    info!(actor_id, sub = ?claims.sub, "Actor updated");

    Ok(HttpResponse::Ok().json(ActorResponse {
        success: true,
        actor,
    }))
}

pub async fn delete_actor(
    claims: Claims,
    pool: web::Data<PgPool>,
    actor_id: web::Path<i32>,
) -> Result<HttpResponse> {
    let actor_id = actor_id.into_inner();

    if !actor_repo::delete_actor(pool.get_ref(), actor_id).await? {
        return Err(AppError::NotFound("resource not found".to_string()));
    }
    info!(actor_id, sub = ?claims.sub, "Actor deleted");

    Ok(HttpResponse::Ok().json(DeleteResponse {
        success: true,
        delete: actor_id,
    }))
}
