mod action;
mod app;
mod app_state;
mod cli;
mod component;
mod components;
mod focus;
mod session;
mod theme;
mod widgets;

use clap::Parser;

use assist_proto::config::Config;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── Load config ──────────────────────────────────────────────────────────
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_default(),
    };
    if let Some(url) = cli.backend {
        config.backend.base_url = url;
    }

    match cli.command {
        Some(Command::Organize(args)) => {
            let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(log_filter.as_str())
                .init();

            let rendered = cli::organize(args, &config).await?;
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
            Ok(())
        }
        None => run_tui(config).await,
    }
}

async fn run_tui(config: Config) -> anyhow::Result<()> {
    let data_dir = assist_proto::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = assist_proto::platform::log_path();

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Keep connection-level DEBUG from the HTTP client out of the log.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    eprintln!("music-assistant log: {}", log_path.display());
    tracing::info!("music-assistant starting…");

    app::App::new(&config, log_path)?.run().await
}
