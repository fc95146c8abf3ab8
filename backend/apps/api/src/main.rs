//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-path errors are
//! `crm::CrmError` rendered as `{"error": message}`.

use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use crm::application::SeedUsersUseCase;
use crm::config::{Argon2Cost, CrmConfig};
use crm::store::schema;
use crm::{SqliteCrmRepository, crm_router};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,crm=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection. A missing store is fatal: serving requests
    // without one would turn every call into a 500.
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://crm.db".to_string());

    let options = SqliteConnectOptions::from_str(&database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!("Connected to database");

    schema::init(&pool).await?;

    let config = load_config()?;

    // Startup seeding: ensure the reserved admin/user accounts exist.
    // Errors here should not prevent server startup
    let repo = SqliteCrmRepository::new(pool.clone());
    let seeder = SeedUsersUseCase::new(Arc::new(repo.clone()), Arc::new(config.clone()));
    if let Err(e) = seeder.execute().await {
        tracing::warn!(error = %e, "User seeding failed, continuing anyway");
    }

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api", crm_router(repo, config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Assemble the CRM configuration from the environment.
///
/// Debug builds fall back to a random token secret; release builds
/// require `CRM_TOKEN_SECRET` so tokens survive restarts.
fn load_config() -> anyhow::Result<CrmConfig> {
    let mut config = if cfg!(debug_assertions) {
        CrmConfig::development()
    } else {
        let secret_b64 = env::var("CRM_TOKEN_SECRET")
            .map_err(|_| anyhow::anyhow!("CRM_TOKEN_SECRET must be set in production"))?;
        let token_secret = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;

        CrmConfig {
            token_secret,
            ..CrmConfig::default()
        }
    };

    if let Ok(ttl) = env::var("CRM_TOKEN_TTL_SECS") {
        config.token_ttl = Duration::from_secs(ttl.parse()?);
    }

    if let Ok(password) = env::var("CRM_SEED_ADMIN_PASSWORD") {
        config.seed_admin_password = password;
    }

    if let Ok(password) = env::var("CRM_SEED_USER_PASSWORD") {
        config.seed_user_password = password;
    }

    if let Ok(pepper_b64) = env::var("CRM_PASSWORD_PEPPER") {
        config.password_pepper = Some(Engine::decode(&general_purpose::STANDARD, &pepper_b64)?);
    }

    // Argon2 cost overrides, all three knobs optional
    let mut cost = Argon2Cost::default();
    if let Ok(m) = env::var("CRM_ARGON2_M_COST") {
        cost.m_cost = m.parse()?;
    }
    if let Ok(t) = env::var("CRM_ARGON2_T_COST") {
        cost.t_cost = t.parse()?;
    }
    if let Ok(p) = env::var("CRM_ARGON2_P_COST") {
        cost.p_cost = p.parse()?;
    }
    config.argon2_cost = cost;

    Ok(config)
}
