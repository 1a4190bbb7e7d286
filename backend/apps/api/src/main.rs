//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::middleware::{AuthMiddlewareState, require_role};
use auth::{AuthConfig, LogMailer, PgAuthRepository, Role, auth_router};
use axum::{
    Json, Router, http,
    http::{Method, header},
    routing::get,
};
use base64::Engine;
use base64::engine::general_purpose;
use billing::{BillingConfig, PgBillingRepository, SandboxGateway, billing_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,billing=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: drop OTP rows already past their cutoff.
    // Errors here should not prevent server startup.
    let auth_store_for_cleanup = PgAuthRepository::new(pool.clone());
    match auth_store_for_cleanup.cleanup_expired_otps().await {
        Ok(deleted) => {
            tracing::info!(otps_deleted = deleted, "OTP cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "OTP cleanup failed, continuing anyway");
        }
    }

    // Auth configuration
    let auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        // In production, load the token secret from environment
        let secret_b64 = env::var("TOKEN_SECRET").expect("TOKEN_SECRET must be set in production");
        let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);
        AuthConfig {
            token_secret: secret,
            ..AuthConfig::default()
        }
    };

    // Billing configuration
    let billing_config = match env::var("PAYMENT_KEY_SECRET") {
        Ok(secret) => BillingConfig {
            key_secret: secret.into_bytes(),
            ..BillingConfig::default()
        },
        Err(_) if cfg!(debug_assertions) => BillingConfig::development(),
        Err(_) => panic!("PAYMENT_KEY_SECRET must be set in production"),
    };

    let auth_repo = PgAuthRepository::new(pool.clone());
    let billing_repo = PgBillingRepository::new(pool.clone());
    let mailer = LogMailer;

    // CORS configuration
    let frontend_origins =
        env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Subscription routes sit behind the gym-owner bearer gate
    let gym_owner_gate = {
        let state = AuthMiddlewareState {
            repo: Arc::new(auth_repo.clone()),
            config: Arc::new(auth_config.clone()),
        };
        axum::middleware::from_fn(move |req, next| {
            require_role(state.clone(), Role::GymOwner, req, next)
        })
    };

    let subscription_routes =
        billing_router(billing_repo, SandboxGateway, billing_config).layer(gym_owner_gate);

    // Build router
    let app = Router::new()
        .route("/api/health", get(health))
        .nest(
            "/api/auth",
            auth_router(
                auth_repo.clone(),
                mailer.clone(),
                auth_config.clone(),
                Role::GymOwner,
            ),
        )
        .nest(
            "/api/admin",
            auth_router(auth_repo, mailer, auth_config, Role::Admin),
        )
        .nest("/api/subscription", subscription_routes)
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
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// GET /api/health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "message": "Server running!",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
