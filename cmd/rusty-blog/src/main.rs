//! # rusty-blog binary
//!
//! The entry point that assembles the application from the feature-selected
//! adapters and serves the HTTP API.

use std::sync::Arc;

use anyhow::Context;
use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

use api_adapters::web::{self, AppState};
use auth_adapters::{Argon2PasswordHasher, JwtTokenService};
use configs::AppConfig;
use domains::ports::{CommentRepo, PasswordHasher, PostRepo, TokenIssuer, UserRepo};
use services::{CommentService, PostService, UserService};

#[cfg(feature = "db-postgres")]
use storage_adapters::PgStore;

#[cfg(not(feature = "db-postgres"))]
use storage_adapters::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = AppConfig::load().context("loading configuration")?;

    // 1. Entity/credential store
    #[cfg(feature = "db-postgres")]
    let store = Arc::new(
        PgStore::connect(cfg.database_url.expose_secret())
            .await
            .context("connecting to postgres")?,
    );

    #[cfg(not(feature = "db-postgres"))]
    let store = Arc::new(MemoryStore::new());

    // 2. Auth primitives
    let passwords: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let tokens: Arc<dyn TokenIssuer> =
        Arc::new(JwtTokenService::new(cfg.jwt_secret.expose_secret()));

    // 3. Services over the ports
    let users: Arc<dyn UserRepo> = store.clone();
    let posts: Arc<dyn PostRepo> = store.clone();
    let comments: Arc<dyn CommentRepo> = store;

    let state = AppState {
        users: UserService::new(users.clone(), passwords, tokens),
        posts: PostService::new(posts.clone(), comments.clone(), users.clone()),
        comments: CommentService::new(posts, comments, users),
    };

    // 4. Serve
    let app = web::router(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cfg.port))
        .await
        .with_context(|| format!("binding port {}", cfg.port))?;
    tracing::info!(port = cfg.port, "rusty-blog listening");
    axum::serve(listener, app).await?;

    Ok(())
}
