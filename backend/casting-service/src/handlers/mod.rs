/// HTTP request handlers
pub mod actors;
pub mod movies;

pub use actors::*;
pub use movies::*;

use actix_web::HttpResponse;

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}
