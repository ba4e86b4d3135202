use anyhow::Result;
use clap::Parser;
use resume_portal::cli::{handle_command, Cli};
use resume_portal::core::ConfigManager;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

const DEFAULT_LOG_FILTER: &str = "resume_portal=info,rocket::server=off";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so headless commands keep stdout for JSON
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if cli.json_logs {
        Registry::default()
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .with(filter)
            .init();
    } else {
        Registry::default()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    let config = ConfigManager::load(&cli.overrides())?;
    info!(
        "Environment: {}",
        std::env::var("RESUMEAI_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    );
    info!("Backend API: {}", config.api_base_url);

    handle_command(cli, config).await
}
