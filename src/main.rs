//! TicketMaster CLI
//!
//! Command-line front end for the ticket dashboard:
//! - Show today's open tickets grouped by status
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use ticketmaster::config::{generate_default_config, Config};
use ticketmaster::dashboard::{HttpTicketSource, TicketView};
use ticketmaster::logging::init_tracing;

#[derive(Parser)]
#[command(name = "ticketmaster")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Today's open support tickets, grouped by status")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Ticket listing URL (overrides the config file)
    #[arg(long, global = true)]
    pub url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch tickets once and show today's dashboard
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show { format, output } => {
            let (config, config_path) = match cli.config {
                Some(path) => (Config::load_with_env(&path)?, Some(path)),
                None => Config::load_default()?,
            };
            init_tracing(&config.logging, "");
            log_config_source(config_path.as_deref());

            let url = cli.url.unwrap_or(config.dashboard.tickets_url);
            tracing::debug!("Fetching tickets from {}", url);

            let mut view = TicketView::new(HttpTicketSource::new(url));
            view.mount().await;

            let rendered = match format {
                OutputFormat::Text => view.render().to_text(),
                OutputFormat::Html => view.render_page(),
                OutputFormat::Json => {
                    let mut json = serde_json::to_string_pretty(&view.snapshot())?;
                    json.push('\n');
                    json
                }
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, &rendered)
                        .with_context(|| format!("writing dashboard to {:?}", path))?;
                    println!("Dashboard written to {:?}", path);
                }
                None => print!("{}", rendered),
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn log_config_source(path: Option<&Path>) {
    match path {
        Some(path) => tracing::debug!("Loaded config from {:?}", path),
        None => tracing::debug!("No config file found, using defaults with environment overrides"),
    }
}
