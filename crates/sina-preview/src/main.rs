//! Sina Preview - HTTP server for crawler-facing listing/shop preview pages.
//!
//! Serves HTML preview pages with Open Graph tags for Sina.lk listings and
//! shops, designed to sit in front of the client application for bot traffic.

use axum::http::Request;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use sina_preview::{AppState, Config, router};

/// Sina Preview - social preview pages for Sina.lk listings and shops.
#[derive(Parser, Debug)]
#[command(name = "sina-preview", version)]
#[command(about = "Crawler-facing Open Graph preview server for Sina.lk listings and shops")]
struct Args {
    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // .env must be read before tracing init so RUST_LOG from the file applies.
    if std::path::Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)?;
        eprintln!("Loaded environment from {}", args.dotenv);
    }

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let bind_addr = config.bind_addr.clone();

    if config.has_credentials() {
        tracing::info!("Firestore service account loaded");
    } else {
        tracing::warn!("no Firestore service account; every preview request will pass through");
    }

    let state = AppState::new(config);

    let app = router(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "starting preview server");

    axum::serve(listener, app).await?;

    Ok(())
}
