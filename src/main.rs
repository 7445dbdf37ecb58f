use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coca::CocaError;
use coca::commands::{self, AddArgs};
use coca::config::{self, ConfigBuilder, ConfigInput, EnvArgs};
use coca::invocation::{Composer, MigrationOptions};
use coca::layout::ProjectLayout;
use coca::runner::{DryRunExecutor, ProcessExecutor};
use dotenv::dotenv;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// Exit code used when a run is interrupted by a signal
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file, relative to the working directory
    #[arg(long, default_value = coca::constants::CONFIG_FILENAME, global = true)]
    config_file: String,

    /// Enable verbose output (info level)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress all non-essential output (error level only)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser, Debug)]
struct MigrateArgs {
    #[command(flatten)]
    env_args: EnvArgs,

    /// Print the commands instead of running them
    #[arg(long)]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an RSA keypair under config/rsa
    Rsa,

    /// Run migrations for every plugin, then for the project
    Migrate(MigrateArgs),

    /// Add a migration
    Add(AddArgs),

    /// List plugins and whether they carry migrations
    Plugins,
}

/// Rewrite the legacy `-ud` spelling of `--underscored`, which clap cannot
/// express as a short flag.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            if arg == "-ud" {
                OsString::from("--underscored")
            } else {
                arg
            }
        })
        .collect()
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    initialize_logging(&cli);

    // The run future is dropped before exiting, which kills any running child
    let outcome = tokio::select! {
        result = run_main(cli) => Some(result),
        _ = wait_for_shutdown_signal() => None,
    };

    match outcome {
        Some(Ok(())) => {}
        Some(Err(e)) => {
            eprintln!("Error: {:#}", e);
            let code = e
                .downcast_ref::<CocaError>()
                .map(CocaError::exit_code)
                .unwrap_or(1);
            std::process::exit(code);
        }
        None => {
            warn!("Received shutdown signal, external command terminated");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    }
}

async fn wait_for_shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn initialize_logging(cli: &Cli) {
    let level = if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn" // default level
    };

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    };

    // stdout is reserved for relayed tool output
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cli_env(env_args: &EnvArgs) -> ConfigInput {
    ConfigInput {
        directories: None,
        migration: Some(env_args.clone().into()),
        rsa: None,
    }
}

async fn run_main(cli: Cli) -> Result<()> {
    let working_dir: PathBuf =
        std::env::current_dir().context("Failed to determine the working directory")?;
    info!("Working directory: {}", working_dir.display());

    let file_config = config::load_config(&working_dir, &cli.config_file)?;

    match cli.command {
        Commands::Rsa => {
            let config = ConfigBuilder::new().with_file(file_config).resolve()?;
            let layout = ProjectLayout::new(&working_dir, &config);

            info!("Generating RSA keypair");
            commands::cmd_rsa(&config.rsa, &layout, &ProcessExecutor::new(&working_dir)).await
        }
        Commands::Migrate(args) => {
            let config = ConfigBuilder::new()
                .with_file(file_config)
                .with_cli_args(cli_env(&args.env_args))
                .resolve()?;
            let composer = Composer::new(
                ProjectLayout::new(&working_dir, &config),
                &config.migration,
            );
            let options = MigrationOptions::for_env(config.migration.env.clone());

            if args.dry_run {
                commands::cmd_migrate(&composer, &options, &DryRunExecutor).await
            } else {
                commands::cmd_migrate(&composer, &options, &ProcessExecutor::new(&working_dir))
                    .await
            }
        }
        Commands::Add(args) => {
            let config = ConfigBuilder::new()
                .with_file(file_config)
                .with_cli_args(cli_env(&args.env_args))
                .resolve()?;
            let composer = Composer::new(
                ProjectLayout::new(&working_dir, &config),
                &config.migration,
            );
            let dry_run = args.dry_run;
            let options = args.into_options(config.migration.env.clone());

            if dry_run {
                commands::cmd_add(&composer, &options, &DryRunExecutor).await
            } else {
                commands::cmd_add(&composer, &options, &ProcessExecutor::new(&working_dir)).await
            }
        }
        Commands::Plugins => {
            let config = ConfigBuilder::new().with_file(file_config).resolve()?;
            commands::cmd_plugins(&ProjectLayout::new(&working_dir, &config))
        }
    }
}
