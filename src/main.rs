//! Binary entry point for habitrack.
//!
//! This binary provides the CLI interface for the habitrack habit tracker.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use habitrack::cli;
use habitrack::config::HabitrackConfig;
use habitrack::observability::{self, LogFormat};
use std::process::ExitCode;

/// Habitrack - a personal habit tracker with an MCP tool surface.
#[derive(Parser)]
#[command(name = "habitrack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log format: pretty or json.
    #[arg(long, global = true, default_value = "pretty")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a new habit.
    Create {
        /// Name of the habit.
        name: String,

        /// Description of the habit.
        #[arg(short, long, default_value = "")]
        description: String,

        /// Category (e.g., health, productivity, learning).
        #[arg(short = 'C', long, default_value = "general")]
        category: String,

        /// Target frequency: daily, weekly, or monthly.
        #[arg(short, long, default_value = "daily")]
        frequency: String,

        /// How many times per frequency period.
        #[arg(short, long, default_value = "1")]
        target_count: u32,
    },

    /// List habits with current statistics.
    Habits {
        /// Include inactive habits.
        #[arg(long)]
        all: bool,
    },

    /// Log today's entry for a habit.
    Log {
        /// ID of the habit to log.
        habit_id: String,

        /// Record the habit as missed instead of completed.
        #[arg(long)]
        missed: bool,

        /// Optional notes about the completion.
        #[arg(short, long, default_value = "")]
        notes: String,
    },

    /// Show a progress report for one habit.
    Progress {
        /// ID of the habit.
        habit_id: String,

        /// Number of trailing days to cover.
        #[arg(short, long, default_value = "30")]
        days: u32,
    },

    /// Show analytics across all habits.
    Analytics,

    /// Show motivational insights.
    Insights,

    /// Show built-in habit templates.
    Templates,

    /// Print a shareable progress summary.
    Share,

    /// Show store health.
    Status,

    /// Start MCP server.
    Serve {
        /// Transport type: stdio or http.
        #[arg(short, long, default_value = "stdio")]
        transport: String,

        /// Port for HTTP transport.
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    // Pick up HABITRACK_TOKEN and friends from a local .env in development.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init(LogFormat::parse(&cli.log_format), cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: &HabitrackConfig) -> habitrack::Result<()> {
    match cli.command {
        Commands::Create {
            name,
            description,
            category,
            frequency,
            target_count,
        } => cli::cmd_create(
            config,
            &name,
            &description,
            &category,
            &frequency,
            target_count,
        ),

        Commands::Habits { all } => cli::cmd_habits(config, all),

        Commands::Log {
            habit_id,
            missed,
            notes,
        } => cli::cmd_log(config, &habit_id, missed, &notes),

        Commands::Progress { habit_id, days } => cli::cmd_progress(config, &habit_id, days),

        Commands::Analytics => cli::cmd_analytics(config),

        Commands::Insights => cli::cmd_insights(config),

        Commands::Templates => cli::cmd_templates(),

        Commands::Share => cli::cmd_share(config),

        Commands::Status => cli::cmd_status(config),

        Commands::Serve { transport, port } => cli::cmd_serve(config, &transport, port),
    }
}

/// Loads configuration.
fn load_config(path: Option<&str>) -> habitrack::Result<HabitrackConfig> {
    // If a path is provided, load from that file
    if let Some(config_path) = path {
        return HabitrackConfig::load_from_file(std::path::Path::new(config_path));
    }

    // Environment override for config path
    if let Ok(config_path) = std::env::var("HABITRACK_CONFIG_PATH") {
        if !config_path.trim().is_empty() {
            return HabitrackConfig::load_from_file(std::path::Path::new(&config_path));
        }
    }

    // Otherwise, load from default location
    Ok(HabitrackConfig::load_default())
}
