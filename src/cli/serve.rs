//! Serve command implementation

use crate::agent::{OpenAIAgent, StructuredAgent};
use crate::api::{create_router, AppState};
use crate::cli::ServeArgs;
use crate::config::{AdvisorConfig, LogFormat};
use crate::context::AdvisorContext;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load a config file if present, otherwise defaults, then apply env overrides.
pub fn load_config_file(path: &Path) -> Result<AdvisorConfig, Box<dyn std::error::Error>> {
    let config = if path.exists() {
        AdvisorConfig::load(Some(path))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        AdvisorConfig::default()
    };
    Ok(config.with_env_overrides())
}

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &ServeArgs,
) -> Result<AdvisorConfig, Box<dyn std::error::Error>> {
    let mut config = load_config_file(&args.config)?;

    // CLI overrides have the highest priority
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }
    if let Some(ref dir) = args.catalog_dir {
        config.catalog.dir = dir.clone();
    }

    Ok(config)
}

/// Initialize tracing based on configuration
pub fn init_tracing(
    config: &crate::config::LoggingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    if config.enable_content_logging {
        eprintln!("WARNING: Content logging is enabled. User messages will be logged.");
        eprintln!("         This may include sensitive data. Use only for debugging.");
    }

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
    }

    Ok(())
}

/// Build the structured-output agent, failing early when the API key is absent.
pub fn build_agent(
    config: &AdvisorConfig,
) -> Result<Arc<dyn StructuredAgent>, Box<dyn std::error::Error>> {
    let api_key = config.llm.api_key()?;
    let agent = OpenAIAgent::from_config(&config.llm, api_key)?;
    tracing::info!(agent = %agent.name(), "Structured-output agent ready");
    Ok(Arc::new(agent))
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
        _ = cancel_token.cancelled() => {}
    }

    cancel_token.cancel();
}

/// Main serve command handler
pub async fn run_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    init_tracing(&config.logging)?;

    tracing::info!("Starting build-advisor");
    tracing::debug!(?config, "Loaded configuration");

    // Catalogs must load before any request is served
    let context = AdvisorContext::load(&config.catalog.dir)?;
    for (category, rows) in context.catalogs.row_counts() {
        tracing::info!(category = %category, rows, "Catalog loaded");
    }

    let agent = build_agent(&config)?;

    let config = Arc::new(config);
    let state = Arc::new(AppState::new(context, agent, Arc::clone(&config)));
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "build-advisor listening");

    let cancel_token = CancellationToken::new();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token.clone()))
        .await?;

    tracing::info!("build-advisor stopped");
    Ok(())
}
