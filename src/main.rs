use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use consultgen::api::ExportFormat;
use consultgen::cli;
use consultgen::config::Config;
use consultgen::tui;

#[derive(Parser)]
#[command(name = "consultgen")]
#[command(about = "Terminal client for streaming consulting-template generation", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Override the template service base URL
    #[arg(long, global = true, env = "CONSULTGEN_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive TUI
    #[command(alias = "tui")]
    Run {
        /// Company name to prefill (skips the entry screen with --domain)
        #[arg(short, long)]
        company: Option<String>,

        /// Task or domain to prefill
        #[arg(short, long)]
        domain: Option<String>,
    },

    /// Generate a template and stream it to stdout
    Generate {
        /// Company name
        #[arg(short, long)]
        company: String,

        /// Task or domain
        #[arg(short, long)]
        domain: String,

        /// Also write the document to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export an existing markdown template to pdf/docx/txt
    Export {
        /// Markdown file to export
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum)]
        format: ExportFormat,

        /// Company name sent as export metadata
        #[arg(short, long, default_value = "")]
        company: String,

        /// Task or domain sent as export metadata
        #[arg(short, long, default_value = "")]
        domain: String,

        /// Directory to write the file to (defaults to the configured export dir)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Show configuration file path
    Path,
    /// Initialize configuration file with defaults
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().await?;
    if let Some(base_url) = cli.base_url {
        config.base_url = Some(base_url);
    }

    // Initialize logging; the TUI shares the terminal, so default to warnings.
    let default_level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_deref().unwrap_or("warn")
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Some(Commands::Run { company, domain }) => {
            tui::run(config, company, domain).await?;
        }
        Some(Commands::Generate {
            company,
            domain,
            output,
        }) => {
            cli::generate::execute(&config, &company, &domain, output.as_deref()).await?;
        }
        Some(Commands::Export {
            input,
            format,
            company,
            domain,
            dir,
        }) => {
            cli::export::execute(&config, &input, format, &company, &domain, dir.as_deref())
                .await?;
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => {
                cli::config::show().await?;
            }
            ConfigCommands::Path => {
                cli::config::path().await?;
            }
            ConfigCommands::Init => {
                cli::config::init().await?;
            }
        },
        Some(Commands::Version) => {
            println!("consultgen {}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            // Default: start TUI
            tui::run(config, None, None).await?;
        }
    }

    Ok(())
}
