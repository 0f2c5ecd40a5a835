//! devscan CLI: capture device discovery through ffmpeg.
//!
//! Usage:
//!   devscan list [OPTIONS]          Build the device catalog and print it as JSON
//!   devscan parse <WHAT> <FILE>     Run a scraper over saved ffmpeg output
//!   devscan check                   Check that ffmpeg and the config are usable

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use devscan_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "devscan",
    about = "Enumerate capture devices and their capabilities via ffmpeg",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the standard location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List devices and probe each one for its capture options
    List {
        /// ffmpeg program name or path
        #[arg(long)]
        program: Option<PathBuf>,

        /// Device-enumeration backend passed via -f
        #[arg(long)]
        backend: Option<String>,

        /// Per-invocation timeout in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Probe calls allowed in flight at once
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Drop malformed capability lines instead of failing the device
        #[arg(long)]
        lenient: bool,

        /// Wrap the catalog with scan time, tool and backend
        #[arg(long)]
        report: bool,
    },

    /// Parse a saved ffmpeg diagnostic dump
    Parse {
        /// Which scraper to run
        #[arg(value_enum)]
        what: commands::parse::ParseTarget,

        /// File holding the captured stderr text
        file: PathBuf,

        /// Drop malformed capability lines instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Check that ffmpeg can be found and report the effective config
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?,
        None => AppConfig::load(),
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    devscan_common::logging::init_logging(&config.logging)?;

    match cli.command {
        Commands::List {
            program,
            backend,
            timeout_ms,
            jobs,
            lenient,
            report,
        } => {
            commands::list::run(
                config,
                commands::list::ListOverrides {
                    program,
                    backend,
                    timeout_ms,
                    jobs,
                    lenient,
                },
                report,
            )
            .await
        }
        Commands::Parse {
            what,
            file,
            lenient,
        } => commands::parse::run(what, file, lenient),
        Commands::Check => commands::check::run(&config).await,
    }
}
