//! Claims Portal - API Server Binary
//!
//! Hosts claim declaration wizards over HTTP, backed by the simulated claims
//! gateway.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin claims-portal-api
//!
//! API_PORT=8081 API_GATEWAY__SIMULATED_LATENCY_MS=500 API_LOG_FORMAT=json \
//!     cargo run --bin claims-portal-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level or `EnvFilter` directive (default: info, `RUST_LOG` wins)
//! * `API_LOG_FORMAT` - `text` or `json` (default: text)
//! * `API_WIZARD__MAX_PHOTOS` - Photo cap per declaration (default: 5)
//! * `API_WIZARD__MAX_PHOTO_BYTES` - Per-photo size limit (default: 10 MiB)
//! * `API_WIZARD__MIN_DESCRIPTION_CHARS` - Minimum description length (default: 20)
//! * `API_WIZARD__SUBMISSION_TIMEOUT_MS` - Gateway deadline (default: 30000)
//! * `API_WIZARD__SESSION_IDLE_TTL_SECS` - Idle time before a declaration is evicted (default: 1800)
//! * `API_GATEWAY__SIMULATED_LATENCY_MS` - Simulated backend latency (default: 2000)
//! * `API_GATEWAY__MAX_PAYLOAD_BYTES` - Simulated backend body limit (default: 50 MiB)

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_claims::gateway::SimulatedSubmissionGateway;
use interface_api::config::{ApiConfig, LogFormat};
use interface_api::create_router;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let (config, load_error) = match ApiConfig::from_env() {
        Ok(config) => (config, None),
        Err(e) => (ApiConfig::default(), Some(e)),
    };

    init_tracing(&config.log_level, config.log_format);
    if let Some(e) = load_error {
        tracing::warn!(error = %e, "Configuration could not be read, using defaults");
    }

    config.validate()?;

    let gateway = SimulatedSubmissionGateway::new(config.gateway.simulated_latency())
        .with_max_payload_bytes(config.gateway.max_payload_bytes);

    let addr: SocketAddr = config.server_addr().parse()?;
    tracing::info!(
        %addr,
        max_photos = config.wizard.max_photos,
        min_description_chars = config.wizard.min_description_chars,
        simulated_latency_ms = config.gateway.simulated_latency_ms,
        "Starting claims portal API"
    );

    let app = create_router(config, Arc::new(gateway));
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Claims portal API stopped");
    Ok(())
}

fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init(),
    }
}

/// Resolves on Ctrl+C or, on unix, SIGTERM
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        _ = interrupt => "interrupt",
        _ = terminate => "terminate",
    };
    tracing::info!(signal, "Draining in-flight requests");
}
