//! CareBridge CLI entry point.
//!
//! Commands:
//! - `serve` starts the HTTP gateway
//! - `check` loads and validates configuration, then exits

use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "carebridge",
    about = "CareBridge clinical FHIR chat agent backend",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate configuration and report what would be used
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port } => {
            let mut config = carebridge_config::AppConfig::load()?;
            if let Some(port) = port {
                config.gateway.port = port;
            }
            config.validate()?;
            if !config.has_api_key() {
                return Err("No OpenAI API key configured. Set CAREBRIDGE_OPENAI_API_KEY or add it to the config file.".into());
            }
            carebridge_gateway::start(config).await?;
        }
        Commands::Check => {
            let config = carebridge_config::AppConfig::load()?;
            config.validate()?;
            info!(
                model = %config.openai.model,
                fhir_base = %config.fhir.base_url,
                gateway = %format!("{}:{}", config.gateway.host, config.gateway.port),
                api_key = config.has_api_key(),
                "Configuration OK"
            );
        }
    }

    Ok(())
}
