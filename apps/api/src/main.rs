mod config;
mod contact;
mod errors;
mod rate_limit;
mod render;
mod resume;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::contact::{LogNotifier, MailRelayNotifier, Notifier};
use crate::rate_limit::{MemoryRateLimiter, RateLimiter, RatePolicy, RedisRateLimiter};
use crate::render::LatexCompiler;
use crate::resume::source::FsSourceProvider;
use crate::resume::timeline::TimelineCopy;
use crate::routes::build_router;
use crate::state::AppState;

const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Resume sources at {}, LaTeX workdir {}",
        config.resume_sections_dir.display(),
        config.resume_dir.display()
    );

    let notifier: Arc<dyn Notifier> = match &config.mail_relay {
        Some(relay) => {
            info!("Mail relay configured at {}", relay.url);
            Arc::new(MailRelayNotifier::new(relay.url.clone(), relay.token.clone())?)
        }
        None => {
            warn!("No mail relay configured; contact submissions will only be logged");
            Arc::new(LogNotifier)
        }
    };

    let (global_limiter, contact_limiter) = build_limiters(&config)?;

    let timeline_copy = match &config.timeline_copy_path {
        Some(path) => load_timeline_copy(path)?,
        None => TimelineCopy::default(),
    };

    let state = AppState {
        sources: Arc::new(FsSourceProvider::new(config.resume_sections_dir.clone())),
        compiler: Arc::new(LatexCompiler::new(
            &config.latex_program,
            config.resume_dir.clone(),
            config.resume_main.clone(),
            config.latex_timeout,
        )),
        notifier,
        global_limiter,
        contact_limiter,
        timeline_copy: Arc::new(timeline_copy),
        config: config.clone(),
    };

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .client_url
                .parse::<HeaderValue>()
                .context("CLIENT_URL must be a valid origin")?,
        )
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let app = build_router(state)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Redis-backed limiters when `REDIS_URL` is set, per-process counters otherwise.
fn build_limiters(config: &Config) -> Result<(Arc<dyn RateLimiter>, Arc<dyn RateLimiter>)> {
    match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str()).context("invalid REDIS_URL")?;
            info!("Rate limits shared through Redis");
            Ok((
                Arc::new(RedisRateLimiter::new(client.clone(), RatePolicy::GLOBAL)),
                Arc::new(RedisRateLimiter::new(client, RatePolicy::CONTACT)),
            ))
        }
        None => {
            info!("Rate limits kept in memory");
            Ok((
                Arc::new(MemoryRateLimiter::new(RatePolicy::GLOBAL)),
                Arc::new(MemoryRateLimiter::new(RatePolicy::CONTACT)),
            ))
        }
    }
}

fn load_timeline_copy(path: &Path) -> Result<TimelineCopy> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read timeline copy at {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid timeline copy JSON in {}", path.display()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
