//! Application entry point for the `weatherflow` service.
//!
//! Startup sequence:
//! - Load configuration from environment variables or `.env`
//! - Initialize structured logging/tracing
//! - Build the location catalog and the weather client
//! - Connect to PostgreSQL and create the schema, or fall back to the
//!   in-memory store when `DATABASE_URL` is unset
//! - Mount all routes via the `routes` gateway and serve until Ctrl+C/SIGTERM
//!
//! # Environment Variables
//! See [`weatherflow::config::load_from_env`] for the service settings, plus:
//! - `WEATHER_LOG_LEVEL` (optional) – level for this crate's logs (default: `debug`)
//! - `WEATHER_SPAN_EVENTS` (optional) – `full` to log span enter/exit
use std::{env, io::IsTerminal, net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use weatherflow::locations::LocationCatalog;
use weatherflow::store::{MemoryReadingStore, PgReadingStore, ReadingStore};
use weatherflow::weather::{OpenWeatherClient, WeatherSource};
use weatherflow::{config, routes, schema, Config, WeatherPipeline};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let catalog = match &cfg.locations_file {
        Some(path) => LocationCatalog::from_json_file(path)
            .with_context(|| format!("Failed to load locations from '{}'", path))?,
        None => LocationCatalog::antioquia(),
    };
    tracing::info!("Monitoring {} locations", catalog.len());

    let source: Arc<dyn WeatherSource> = Arc::new(
        OpenWeatherClient::new(cfg.weather_api()).context("Failed to build weather client")?,
    );
    let store = open_store(&cfg).await?;

    let pipeline = Arc::new(WeatherPipeline::new(
        catalog,
        source,
        store,
        cfg.fetch_timeout(),
        cfg.results_window,
    ));

    let app: Router = routes::router(pipeline);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("weatherflow shutting down");
    Ok(())
}

// ---

/// Connect to PostgreSQL when configured, otherwise keep readings in memory.
async fn open_store(cfg: &Config) -> Result<Arc<dyn ReadingStore>> {
    // ---
    let Some(db_url) = &cfg.db_url else {
        tracing::warn!("DATABASE_URL not set; readings will not survive a restart");
        return Ok(Arc::new(MemoryReadingStore::new()));
    };

    tracing::info!("Attempting to connect to database");

    let pool = PgPoolOptions::new()
        .max_connections(cfg.db_pool_max)
        .connect(db_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Successfully connected to database");

    schema::create_schema(&pool)
        .await
        .context("Failed to create schema")?;

    Ok(Arc::new(PgReadingStore::new(pool)))
}

async fn shutdown_signal() {
    // ---
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, initiating shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, initiating shutdown"),
    }
}

/// Install the global subscriber for the service's logs.
///
/// The events that matter here are the per-location fetch warnings and the
/// batch summary line, both emitted under the `weatherflow` target, so the
/// default filter keeps that target at `debug`, the request trace layer at
/// `info`, and everything else (reqwest, hyper, sqlx) at `warn`.
///
/// `RUST_LOG` replaces the filter entirely. `WEATHER_LOG_LEVEL` only changes
/// the `weatherflow` level and is ignored if it does not name a level.
/// `WEATHER_SPAN_EVENTS=full` adds span enter/exit events to the default
/// close events, which shows per-request timing from the trace layer.
/// `FORCE_COLOR` overrides TTY detection for ANSI output.
fn init_tracing() {
    // ---
    let span_events = match env::var("WEATHER_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = env::var("WEATHER_LOG_LEVEL")
            .ok()
            .and_then(|v| v.parse::<tracing::Level>().ok())
            .unwrap_or(tracing::Level::DEBUG)
            .as_str()
            .to_lowercase();
        EnvFilter::new(format!("warn,weatherflow={level},tower_http=info"))
    });

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
