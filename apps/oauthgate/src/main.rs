use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use oauthgate_core::{AmbientStore, Gateway, ProcessEnv, WreqUpstreamClient};
use oauthgate_router::{GatewayState, ScopeMode, oauth_router};

mod cli;

use crate::cli::{Cli, GatewayConfig};

fn main() {
    init_tracing();
    if let Err(err) = start() {
        eprintln!("oauthgate failed: {err}");
        std::process::exit(1);
    }
}

/// Env injection writes the process environment, so it gets a single-threaded
/// runtime; otherwise requests are served on the multi-threaded one.
fn start() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = Cli::parse().into_config()?;
    let runtime = build_runtime(config.mode)?;
    runtime.block_on(run(config))
}

fn build_runtime(mode: ScopeMode) -> std::io::Result<tokio::runtime::Runtime> {
    let mut builder = match mode {
        ScopeMode::SharedEnv => tokio::runtime::Builder::new_current_thread(),
        ScopeMode::ScopedOnly => tokio::runtime::Builder::new_multi_thread(),
    };
    builder.enable_all().build()
}

async fn run(config: GatewayConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!(
        bind = %config.bind,
        proxy = %config.client.proxy.as_deref().unwrap_or(""),
        antigravity_version = %config.settings.antigravity_version,
        max_retries = config.policy.max_retries,
        mode = ?config.mode,
        "config loaded"
    );
    if config.mode == ScopeMode::SharedEnv {
        warn!(
            "env injection enabled: serving on one thread; concurrent OAuth requests \
             still observe each other's credentials"
        );
    }

    let client = Arc::new(WreqUpstreamClient::new(&config.client)?);
    let gateway = Gateway::new(client, config.settings, config.policy);
    let ambient: Arc<dyn AmbientStore> = Arc::new(ProcessEnv);
    let app = oauth_router(GatewayState {
        gateway: Arc::new(gateway),
        ambient,
        mode: config.mode,
    });

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    info!(addr = %config.bind, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("shutdown complete");
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("oauthgate=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; serve until the process is killed.
        std::future::pending::<()>().await;
    }
}
