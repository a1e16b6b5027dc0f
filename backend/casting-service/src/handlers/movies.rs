/// Movie handlers - HTTP endpoints for movie operations
use actix_web::{web, HttpResponse};
use auth_gate::Claims;
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::db::movie_repo;
use crate::error::{AppError, Result};
use crate::models::{
    CreateMovieRequest, DeleteResponse, MovieResponse, MoviesResponse, UpdateMovieRequest,
};

/// List all movies
pub async fn list_movies(_claims: Claims, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let movies = movie_repo::list_movies(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(MoviesResponse {
        success: true,
        movies,
    }))
}

/// Add a movie
pub async fn create_movie(
    claims: Claims,
    pool: web::Data<PgPool>,
    req: web::Json<CreateMovieRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let movie = movie_repo::create_movie(pool.get_ref(), &req).await?;
    info!(movie_id = movie.id, sub = ?claims.sub, "Movie created");

    Ok(HttpResponse::Ok().json(MovieResponse {
        success: true,
        movie,
    }))
}

/// Update title and/or release date
pub async fn update_movie(
    claims: Claims,
    pool: web::Data<PgPool>,
    movie_id: web::Path<i32>,
    req: web::Json<UpdateMovieRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let movie_id = movie_id.into_inner();

    let movie = movie_repo::update_movie(pool.get_ref(), movie_id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("resource not found".to_string()))?;
    info!(movie_id, sub = ?claims.sub, "Movie updated");

    Ok(HttpResponse::Ok().json(MovieResponse {
        success: true,
        movie,
    }))
}

/// Delete a movie
pub async fn delete_movie(
    claims: Claims,
    pool: web::Data<PgPool>,
    movie_id: web::Path<i32>,
) -> Result<HttpResponse> {
    let movie_id = movie_id.into_inner();

    if !movie_repo::delete_movie(pool.get_ref(), movie_id).await? {
        return Err(AppError::NotFound("resource not found".to_string()));
    }
    info!(movie_id, sub = ?claims.sub, "Movie deleted");

    Ok(HttpResponse::Ok().json(DeleteResponse {
        success: true,
        delete: movie_id,
    }))
}
