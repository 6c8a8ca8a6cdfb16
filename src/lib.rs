pub mod api;
pub mod cache;
pub mod cli;
pub mod clients;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cache::{HttpListApi, ListCache};
use cli::{Cli, Commands};
pub use config::Config;

pub async fn run(config: Config) -> anyhow::Result<()> {
    config.validate()?;

    init_tracing(&config)?;

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Serve => {
            let prometheus_handle = init_metrics(&config)?;
            run_server(config, prometheus_handle).await
        }

        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Set your OMDB API key in config.toml.");
            } else {
                println!("Config file already exists.");
            }
            Ok(())
        }

        command => {
            let cache = ListCache::new(HttpListApi::new(&config.client)?);
            run_client_command(&cache, command).await
        }
    }
}

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    // CLI output owns stdout, so logs go to stderr.
    let (plain_layer, json_layer) = if config.general.json_logs {
        (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        )
    } else {
        (
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
            None,
        )
    };

    let loki_layer = if config.observability.loki_enabled {
        let url = url::Url::parse(&config.observability.loki_url).context("Invalid Loki URL")?;

        let mut builder = tracing_loki::builder().label("app", "cinema")?;
        for (key, value) in &config.observability.loki_labels {
            builder = builder.label(key.as_str(), value.as_str())?;
        }

        let (layer, task) = builder.build_url(url)?;
        tokio::spawn(task);
        Some(layer)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(plain_layer)
        .with(json_layer)
        .with(loki_layer)
        .init();

    if config.observability.loki_enabled {
        info!(
            "Loki logging initialized at {}",
            config.observability.loki_url
        );
    }

    Ok(())
}

fn init_metrics(config: &Config) -> anyhow::Result<Option<PrometheusHandle>> {
    if !config.observability.metrics_enabled {
        return Ok(None);
    }

    let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics recorder initialized");
    Ok(Some(handle))
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    info!("cinema v{} starting...", env!("CARGO_PKG_VERSION"));

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);

    let state = api::create_app_state_from_config(config, prometheus_handle).await?;
    let app = api::router(state).await;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Web server running at http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {e}"),
    }
}

async fn run_client_command(
    cache: &ListCache<HttpListApi>,
    command: Commands,
) -> anyhow::Result<()> {
    match command {
        Commands::Search { query } => cli::cmd_search(cache, &query.join(" ")).await,
        Commands::Show { imdb_id } => cli::cmd_show(cache, &imdb_id).await,
        Commands::Add { imdb_id } => cli::cmd_add(cache, &imdb_id).await,
        Commands::List => cli::cmd_list(cache).await,
        Commands::Watched => cli::cmd_watched(cache).await,
        Commands::Reorder { from, to } => cli::cmd_reorder(cache, from, to).await,
        Commands::Watch { movie_id, review } => {
            cli::cmd_watch(cache, movie_id, review.as_deref()).await
        }
        Commands::Review { movie_id, text } => {
            cli::cmd_review(cache, movie_id, &text.join(" ")).await
        }
        Commands::Remove { movie_id, watched } => {
            if watched {
                cli::cmd_remove_watched(cache, movie_id).await
            } else {
                cli::cmd_remove(cache, movie_id).await
            }
        }
        Commands::Export { list, output } => {
            cli::cmd_export(cache, list.into(), output.as_deref()).await
        }
        Commands::Serve | Commands::Init => Ok(()),
    }
}
