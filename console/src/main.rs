//! Fleetops - Entry Point
//!
//! Command console for a single remotely managed host: inspect its
//! processes, containers, and databases over SSH, score its health, and
//! run operational actions (restart, logs, backup, deploy).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use fleetops::channel::SshChannel;
use fleetops::config::ConsoleConfig;
use fleetops::errors::ConsoleError;
use fleetops::logs::{effective_level, init_logging, LogOptions};
use fleetops::workflows;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_TIME"),
    ")"
);

/// Remote fleet health and operations console
#[derive(Parser)]
#[command(name = "fleetops")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Inspect and operate a remote fleet host over SSH")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "FLEETOPS_CONFIG")]
    config: Option<PathBuf>,

    /// Target host address (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Login user (overrides config)
    #[arg(long)]
    user: Option<String>,

    /// SSH identity file (overrides config)
    #[arg(long)]
    identity: Option<String>,

    /// Enable verbose diagnostics
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// System snapshot: CPU, memory, disk, uptime, load
    Status,

    /// Per-service status with process stats and health endpoints
    Services,

    /// Running containers and their resource usage
    Containers,

    /// Relational engine and key-value store status
    Databases,

    /// Restart a known service, or a container by name
    Restart {
        /// Service or container name
        name: String,
    },

    /// Tail service or container logs
    Logs {
        /// Service or container name
        name: String,

        /// Number of lines to show
        #[arg(long, default_value_t = workflows::logs::DEFAULT_LINES)]
        lines: usize,
    },

    /// Run the weighted health check battery
    Health,

    /// Single-screen overview of the whole host
    Quick,

    /// List monitoring dashboards and open the primary one
    Monitor,

    /// Attach an interactive shell inside a container
    ExecShell {
        /// Container name
        container: String,
    },

    /// Dump and compress every configured database
    Backup,

    /// Advisory checks for memory, images, and volumes
    Optimize,

    /// Transfer and run the monitoring deployment script
    Deploy,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Logging may not be initialized yet if config load failed
            eprintln!("fleetops: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ConsoleError> {
    let mut config = ConsoleConfig::load(cli.config.as_deref()).await?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(user) = cli.user {
        config.user = user;
    }
    if let Some(identity) = cli.identity {
        config.identity_file = identity;
    }

    let log_level = effective_level(cli.verbose, config.log_level.clone());
    if let Err(e) = init_logging(LogOptions { log_level }) {
        eprintln!("Failed to initialize logging: {e}");
    }

    config.validate()?;

    let channel = SshChannel::new(&config);

    match cli.command {
        Commands::Status => {
            print!("{}", workflows::status::report(&channel).await?);
        }
        Commands::Services => {
            print!("{}", workflows::services::report(&channel, &config).await?);
        }
        Commands::Containers => {
            print!("{}", workflows::containers::report(&channel).await?);
        }
        Commands::Databases => {
            print!("{}", workflows::databases::report(&channel, &config).await?);
        }
        Commands::Restart { name } => {
            print!(
                "{}",
                workflows::restart::report(&channel, &config, &name).await?
            );
        }
        Commands::Logs { name, lines } => {
            print!(
                "{}",
                workflows::logs::report(&channel, &config, &name, lines).await?
            );
        }
        Commands::Health => {
            print!("{}", workflows::health::report(&channel, &config).await?);
        }
        Commands::Quick => {
            print!("{}", workflows::quick::report(&channel, &config).await?);
        }
        Commands::Monitor => {
            print!("{}", workflows::monitor::report(&config));
            // Browser launch is best-effort; the URL list is the report
            match workflows::monitor::open_primary(&config) {
                Ok(note) => println!("\n{}", note),
                Err(e) => tracing::warn!("{}", e),
            }
        }
        Commands::ExecShell { container } => {
            workflows::shell::run(&channel, &container).await?;
        }
        Commands::Backup => {
            print!("{}", workflows::backup::report(&channel, &config).await?);
        }
        Commands::Optimize => {
            print!("{}", workflows::optimize::report(&channel, &config).await?);
        }
        Commands::Deploy => {
            workflows::deploy::run(&channel, &config).await?;
        }
    }

    Ok(())
}
