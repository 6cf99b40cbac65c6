mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use intake_validation::IntakeConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "intake")]
#[command(version, about = "Patient intake form checker", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = "intake.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full validation pass over a form snapshot (TOML or JSON)
    Validate {
        /// Snapshot file
        file: PathBuf,

        /// Pin "today" instead of using the local date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a snapshot and print its review summary
    Review {
        /// Snapshot file
        file: PathBuf,

        #[arg(long)]
        today: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// SSN helpers
    Ssn {
        #[command(subcommand)]
        command: SsnCommands,
    },

    /// Print the date input bounds and the header date
    Bounds {
        #[arg(long)]
        today: Option<String>,
    },
}

#[derive(Subcommand)]
enum SsnCommands {
    /// Group digits as 000-00-0000
    Format { value: String },

    /// Mask all but the last four digits
    Mask { value: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = IntakeConfig::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(config = ?cli.config, "configuration loaded");

    let passed = match cli.command {
        Commands::Validate { file, today, json } => {
            commands::validate::execute(&file, today.as_deref(), json, config)?
        }
        Commands::Review { file, today, json } => {
            commands::review::execute(&file, today.as_deref(), json, config)?
        }
        Commands::Ssn { command } => {
            match command {
                SsnCommands::Format { value } => commands::ssn::format(&value),
                SsnCommands::Mask { value } => commands::ssn::mask(&value, config.review.mask_char),
            }
            true
        }
        Commands::Bounds { today } => {
            commands::bounds::execute(today.as_deref(), &config)?;
            true
        }
    };

    if !passed {
        std::process::exit(1);
    }
    Ok(())
}
