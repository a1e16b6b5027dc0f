/// Casting Service - HTTP Server
///
/// Serves the movies and actors catalogue behind role-scoped JWT permissions.
use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use auth_gate::AuthGate;
use casting_service::config::CorsConfig;
use casting_service::db::schema;
use casting_service::{routes, Config};
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default();
    for origin in config.origins() {
        if origin == "*" {
            cors = cors.allow_any_origin();
        } else {
            cors = cors.allowed_origin(origin);
        }
    }
    cors.allow_any_method().allow_any_header().max_age(3600)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,actix_web=info,sqlx=warn")),
        )
        .with(fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        env = %config.app.env,
        issuer = %config.auth.issuer(),
        audience = %config.auth.audience,
        "Starting casting-service"
    );

    config.database.pool.log_config();
    let db_pool = db_pool::create_pool(config.database.pool.clone())
        .await
        .context("Failed to connect to database")?;
    schema::ensure_schema(&db_pool, config.database.reset_on_start)
        .await
        .context("Failed to prepare database schema")?;

    let gate = AuthGate::new(config.auth.clone());
    let bind_address = config.bind_address();
    let cors_config = config.cors.clone();

    info!("HTTP server listening on {}", bind_address);

    HttpServer::new(move || {
        let gate = gate.clone();
        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .wrap(build_cors(&cors_config))
            .wrap(TracingLogger::default())
            .configure(move |cfg| routes::configure(cfg, &gate))
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await?;

    info!("Casting-service shutting down");
    Ok(())
}
