use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use ecoponto::config::{load_config, CliArgs};
use ecoponto::{create_app, db, run_migrations, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file when present
    if std::fs::metadata(".env").is_ok() {
        dotenv::dotenv().ok();
    }

    let args = CliArgs::parse();

    // Initialize logging; --debug lowers the default filter
    let default_filter = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .init();

    // Layer the configuration: defaults, then config file, then CLI/env
    let config = load_config(args).map_err(|e| anyhow::anyhow!(e))?;

    // Make sure the directory holding the database exists
    if let Some(parent) = std::path::Path::new(&config.database_url).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating data directory {parent:?}"))?;
        }
    }

    // Initialize the database pool and apply pending migrations
    let pool = Arc::new(db::init_pool(&config.database_url));
    let mut conn = pool.get().context("getting a database connection")?;
    run_migrations(&mut conn);
    drop(conn);

    // Build the application with its routes and shared state
    let state = AppState::new(pool, &config.uploads_url, &config.placeholder_image);
    let app = create_app(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.host, config.port))?;

    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app).await.context("serving HTTP")?;

    Ok(())
}
