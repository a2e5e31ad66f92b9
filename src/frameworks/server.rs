// Framework bootstrap for the entries service.

use crate::frameworks::config::AppConfig;
use crate::interface_adapters::clients::NotionClient;
use crate::interface_adapters::routes;
use crate::interface_adapters::state::AppState;
use std::{io::Result, sync::Arc};

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener, config: AppConfig) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state(&config)?;

    // Start the web server with the HTTP routes wired up.
    let app = routes::app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking.
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        std::io::Error::other(e)
    })?;
    let address = config.listen_addr;

    // Bind TCP listener with error handling.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, config).await
}

fn build_state(config: &AppConfig) -> Result<Arc<AppState>> {
    if config.notion_token.is_none() {
        tracing::warn!("NOTION_TOKEN is not set; workspace queries will be rejected upstream");
    }

    let client = NotionClient::new(
        config.notion_api_url.clone(),
        config.notion_token.clone(),
        config.notion_version.clone(),
        config.notion_timeout,
    )
    .map_err(|e| std::io::Error::other(format!("failed to initialize workspace client: {e}")))?;

    let configured: Vec<_> = config
        .database_ids
        .iter()
        .map(|slot| slot.is_some())
        .collect();
    tracing::debug!(
        notion_api_url = %config.notion_api_url,
        notion_version = %config.notion_version,
        notion_timeout_ms = config.notion_timeout.as_millis(),
        ?configured,
        "workspace client configured"
    );

    Ok(Arc::new(AppState {
        database: Arc::new(client),
        slots: config.database_ids.clone(),
    }))
}
