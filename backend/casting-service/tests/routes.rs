//! Route permissions and request checks that resolve before any query runs
//!
//! The pool is lazy and points at a closed port, so every case here must be
//! answered by the gate or by body/path extraction.

use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use auth_gate::test_utils::{bearer, sign_token, test_config, test_jwks, TestClaims};
use auth_gate::{AuthGate, ErrorBody, StaticKeySetResolver};
use casting_service::error::ErrorResponse;
use casting_service::routes;
use db_pool::DbConfig;
use serde_json::json;
use std::sync::Arc;

const CASTING_ASSISTANT: &[&str] = &["get:actors", "get:movies"];
const CASTING_DIRECTOR: &[&str] = &[
    "get:actors",
    "get:movies",
    "post:actors",
    "patch:actors",
    "patch:movies",
    "delete:actors",
];
const EXECUTIVE_PRODUCER: &[&str] = &[
    "get:actors",
    "get:movies",
    "post:actors",
    "post:movies",
    "patch:actors",
    "patch:movies",
    "delete:actors",
    "delete:movies",
];

fn gate() -> AuthGate {
    AuthGate::with_resolver(test_config(), Arc::new(StaticKeySetResolver::new(test_jwks())))
}

fn token_for(permissions: &[&str]) -> String {
    bearer(&sign_token(
        &TestClaims::valid(&test_config()).permissions(permissions),
    ))
}

async fn send(req: test::TestRequest) -> (StatusCode, web::Bytes) {
    let pool = db_pool::create_lazy_pool(&DbConfig {
        database_url: "postgres://casting@127.0.0.1:1/casting".to_string(),
        min_connections: 0,
        ..DbConfig::default()
    })
    .unwrap();
    let gate = gate();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool))
            .configure(move |cfg| routes::configure(cfg, &gate)),
    )
    .await;

    match test::try_call_service(&app, req.to_request()).await {
        Ok(resp) => {
            let status = resp.status();
            (status, to_bytes(resp.into_body()).await.unwrap())
        }
        Err(err) => {
            let resp = err.error_response();
            let status = resp.status();
            (status, to_bytes(resp.into_body()).await.unwrap())
        }
    }
}

fn gate_error(body: &web::Bytes) -> ErrorBody {
    serde_json::from_slice(body).expect("gate error body")
}

fn service_error(body: &web::Bytes) -> ErrorResponse {
    serde_json::from_slice(body).expect("service error body")
}

#[actix_web::test]
async fn test_health_needs_no_token() {
    let (status, body) = send(test::TestRequest::get().uri("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"OK");
}

#[actix_web::test]
async fn test_every_route_requires_a_header() {
    let requests = [
        test::TestRequest::get().uri("/movies"),
        test::TestRequest::get().uri("/actors"),
        test::TestRequest::post().uri("/movies"),
        test::TestRequest::post().uri("/actors"),
        test::TestRequest::patch().uri("/movies/1"),
        test::TestRequest::patch().uri("/actors/1"),
        test::TestRequest::delete().uri("/movies/1"),
        test::TestRequest::delete().uri("/actors/1"),
    ];

    for req in requests {
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(gate_error(&body).code, "authorization_header_missing");
    }
}

#[actix_web::test]
async fn test_casting_assistant_cannot_delete_movies() {
    let (status, body) = send(
        test::TestRequest::delete()
            .uri("/movies/1")
            .insert_header(("Authorization", token_for(CASTING_ASSISTANT))),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        gate_error(&body),
        ErrorBody {
            code: "unauthorized".to_string(),
            description: "Permission not found.".to_string(),
        }
    );
}

#[actix_web::test]
async fn test_casting_assistant_cannot_add_actors() {
    let (status, body) = send(
        test::TestRequest::post()
            .uri("/actors")
            .insert_header(("Authorization", token_for(CASTING_ASSISTANT)))
            .set_json(json!({"name": "Al Pacino", "age": 84, "gender": "male"})),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(gate_error(&body).code, "unauthorized");
}

#[actix_web::test]
async fn test_casting_director_cannot_add_movies() {
    let (status, _) = send(
        test::TestRequest::post()
            .uri("/movies")
            .insert_header(("Authorization", token_for(CASTING_DIRECTOR)))
            .set_json(json!({"title": "Heat", "release_date": "1995-12-15"})),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_denial_precedes_body_checks() {
    let (status, body) = send(
        test::TestRequest::post()
            .uri("/movies")
            .set_json(json!({"release_date": "not a date"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(gate_error(&body).code, "authorization_header_missing");
}

#[actix_web::test]
async fn test_expired_token_rejected() {
    let expired = bearer(&sign_token(
        &TestClaims::valid(&test_config())
            .permissions(EXECUTIVE_PRODUCER)
            .expires_in(-60),
    ));

    let (status, body) = send(
        test::TestRequest::get()
            .uri("/movies")
            .insert_header(("Authorization", expired)),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(gate_error(&body).code, "token_expired");
}

#[actix_web::test]
async fn test_post_movie_missing_title() {
    let (status, body) = send(
        test::TestRequest::post()
            .uri("/movies")
            .insert_header(("Authorization", token_for(EXECUTIVE_PRODUCER)))
            .set_json(json!({"release_date": "1995-12-15"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = service_error(&body);
    assert!(!body.success);
    assert_eq!(body.error, 400);
}

#[actix_web::test]
async fn test_post_movie_empty_title() {
    let (status, body) = send(
        test::TestRequest::post()
            .uri("/movies")
            .insert_header(("Authorization", token_for(EXECUTIVE_PRODUCER)))
            .set_json(json!({"title": "", "release_date": "1995-12-15"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(service_error(&body).error, 400);
}

#[actix_web::test]
async fn test_post_movie_without_body() {
    let (status, body) = send(
        test::TestRequest::post()
            .uri("/movies")
            .insert_header(("Authorization", token_for(EXECUTIVE_PRODUCER))),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!service_error(&body).success);
}

#[actix_web::test]
async fn test_post_actor_zero_age() {
    let (status, _) = send(
        test::TestRequest::post()
            .uri("/actors")
            .insert_header(("Authorization", token_for(CASTING_DIRECTOR)))
            .set_json(json!({"name": "Al Pacino", "age": 0, "gender": "male"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_patch_actor_age_out_of_range() {
    let (status, _) = send(
        test::TestRequest::patch()
            .uri("/actors/1")
            .insert_header(("Authorization", token_for(CASTING_DIRECTOR)))
            .set_json(json!({"age": 200})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_non_numeric_id_is_not_found() {
    let (status, _) = send(
        test::TestRequest::delete()
            .uri("/actors/abc")
            .insert_header(("Authorization", token_for(EXECUTIVE_PRODUCER))),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_unrouted_method_is_not_found() {
    let (status, _) = send(
        test::TestRequest::put()
            .uri("/movies")
            .insert_header(("Authorization", token_for(EXECUTIVE_PRODUCER))),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
