/// Route table
///
/// Each method on each path is its own resource so it can carry its own
/// permission. A method with no matching resource falls through to 404.
use actix_web::{guard, web, HttpRequest};
use auth_gate::AuthGate;

use crate::error::AppError;
use crate::handlers;

pub fn configure(cfg: &mut web::ServiceConfig, gate: &AuthGate) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(handlers::health))
        // Movies
        .service(
            web::resource("/movies")
                .guard(guard::Get())
                .wrap(gate.require("get:movies"))
                .route(web::get().to(handlers::list_movies)),
        )
        .service(
            web::resource("/movies")
                .guard(guard::Post())
                .wrap(gate.require("post:movies"))
                .route(web::post().to(handlers::create_movie)),
        )
        .service(
            web::resource("/movies/{id}")
                .guard(guard::Patch())
                .wrap(gate.require("patch:movies"))
                .route(web::patch().to(handlers::update_movie)),
        )
        .service(
            web::resource("/movies/{id}")
                .guard(guard::Delete())
                .wrap(gate.require("delete:movies"))
                .route(web::delete().to(handlers::delete_movie)),
        )
        // Actors
        .service(
            web::resource("/actors")
                .guard(guard::Get())
                .wrap(gate.require("get:actors"))
                .route(web::get().to(handlers::list_actors)),
        )
        .service(
            web::resource("/actors")
                .guard(guard::Post())
                .wrap(gate.require("post:actors"))
                .route(web::post().to(handlers::create_actor)),
        )
        .service(
            web::resource("/actors/{id}")
                .guard(guard::Patch())
                .wrap(gate.require("patch:actors"))
                .route(web::patch().to(handlers::update_actor)),
        )
        .service(
            web::resource("/actors/{id}")
                .guard(guard::Delete())
                .wrap(gate.require("delete:actors"))
                .route(web::delete().to(handlers::delete_actor)),
        );
}

/// Malformed or missing JSON bodies become 400 in the service error shape
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req: &HttpRequest| {
        tracing::debug!(path = %req.path(), error = %err, "Rejected request body");
        AppError::BadRequest(err.to_string()).into()
    })
}
