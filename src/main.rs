//! Carebridge - health tracking API server
//! Accounts, dashboard metrics, doctor appointments, symptom checker

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carebridge::{
    auth::{AuthState, JwtHandler, UserStore},
    create_router, AppState, Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment and logging
    load_env();
    init_tracing();

    let config = Config::parse();

    info!("🚀 Carebridge Health API starting");

    if config.uses_default_secret() {
        warn!("⚠️  JWT_SECRET not set, signing tokens with the built-in default secret");
    }

    let mut jwt_handler = JwtHandler::new(config.jwt_secret.clone());
    match config.token_ttl_hours {
        Some(hours) => {
            jwt_handler = jwt_handler.with_expiration_hours(hours);
            info!("🔐 Tokens expire after {}h", hours);
        }
        None => info!("🔐 Tokens never expire"),
    }

    let auth_state = AuthState::new(
        Arc::new(UserStore::new(config.bcrypt_cost)),
        Arc::new(jwt_handler),
    );
    let app_state = AppState::new(auth_state);

    let static_dir = config.static_dir.is_dir().then_some(config.static_dir.as_path());
    match static_dir {
        Some(dir) => info!("📁 Serving static files from {}", dir.display()),
        None => warn!(
            "Static directory {} not found, /static disabled",
            config.static_dir.display()
        ),
    }

    let app = create_router(app_state, static_dir);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("🎯 API server listening on {}", config.bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}

/// Initialize tracing
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carebridge=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_env() {
    // 1) Standard dotenv search (cwd + parents)
    let _ = dotenv();

    // 2) Also try the crate directory (common when running with --manifest-path from elsewhere)
    let candidate = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if candidate.exists() {
        let _ = dotenv::from_path(&candidate);
    }
}
