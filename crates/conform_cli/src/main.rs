mod commands;
mod output;
mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "conform")]
#[command(version, about = "Validate delimited data exports against declared schemas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every file declared in a configuration
    Validate {
        /// Path to the configuration file (JSON, YAML or TOML)
        config: String,

        /// Maximum number of files validated at once (defaults to all)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Directory receiving the error reports (defaults to next to each file)
        #[arg(long, conflicts_with = "no_report")]
        report_dir: Option<PathBuf>,

        /// Do not write error reports
        #[arg(long)]
        no_report: bool,
    },

    /// Check a configuration without reading any data
    Check {
        /// Path to the configuration file (JSON, YAML or TOML)
        config: String,
    },

    /// Translate a strftime-style date pattern and show the resulting layout
    Translate {
        /// Date pattern, e.g. "%Y-%m-%d %H:%M:%S"
        pattern: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Validate {
            config,
            jobs,
            format,
            report_dir,
            no_report,
        } => {
            let options = commands::validate::Options {
                jobs,
                format,
                report_dir,
                no_report,
            };
            commands::validate::execute(&config, options).await
        }

        Commands::Check { config } => commands::check::execute(&config),

        Commands::Translate { pattern } => commands::translate::execute(&pattern),
    }
}
