pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod credentials;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, UserCommands};
pub use config::Config;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    config.validate()?;

    init_tracing(&config);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(config).await,
        Commands::Ingest { title_id } => cli::cmd_ingest(config, title_id).await,
        Commands::List { series } => cli::cmd_list_titles(&config, series).await,
        Commands::User { command } => match command {
            UserCommands::Add { username, password } => {
                cli::cmd_user_add(&config, &username, &password).await
            }
            UserCommands::Remove { username } => cli::cmd_user_remove(&config, &username).await,
            UserCommands::List => cli::cmd_user_list(&config).await,
            UserCommands::Passwd { username, password } => {
                cli::cmd_user_passwd(&config, &username, &password).await
            }
        },
        Commands::SetTmdbKey { key } => cli::cmd_set_tmdb_key(&config, &key).await,
        Commands::Init => cli::cmd_init(),
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    info!("Filmoteca v{} starting...", env!("CARGO_PKG_VERSION"));

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        info!("Prometheus metrics recorder initialized");
        Some(handle)
    } else {
        None
    };

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let api_state = api::create_app_state_from_config(config, prometheus_handle).await?;
    let app = api::router(api_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("🌐 Web Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
