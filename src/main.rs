use anyhow::Result;
use clap::{Parser, Subcommand};

/// smartmama - pregnancy and early childhood planner
#[derive(Parser)]
#[command(name = "smartmama")]
#[command(about = "Personal pregnancy and child development plans with a doctor chat", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = smartmama::Config::load(cli.config)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    smartmama::observability::init_observability(
        "smartmama",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => smartmama::cli::serve(config, host, port).await,
    }
}
