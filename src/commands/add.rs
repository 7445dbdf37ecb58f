use crate::config::EnvArgs;
use crate::constants::{DEFAULT_MODELS_PATH, DEFAULT_SEEDERS_PATH};
use crate::invocation::{Composer, MigrationOptions, Mode, Target};
use crate::runner::{Executor, run_sequence};
use anyhow::Result;
use clap::Args;
use tracing::info;

/// Arguments for `coca add`
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Defines the name of the migration
    #[arg(long, short = 'n', required = true)]
    pub name: Option<String>,

    /// Plugin that receives the migration (directory `<prefix><plugin>`)
    #[arg(long, short = 'p')]
    pub plugin: Option<String>,

    #[command(flatten)]
    pub env_args: EnvArgs,

    /// The path to the config file
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// The path to a JSON file with additional options
    #[arg(long, short = 'o')]
    pub options_path: Option<String>,

    /// The path to the seeders folder
    #[arg(long, short = 's', default_value = DEFAULT_SEEDERS_PATH)]
    pub seeders_path: String,

    /// The path to the models folder
    #[arg(long, short = 'm', default_value = DEFAULT_MODELS_PATH)]
    pub models_path: String,

    /// The database connection string to use. Alternative to using --config files
    #[arg(long, short = 'u')]
    pub url: Option<String>,

    /// When available show various debug information
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Use snake case for the timestamp's attribute names (also `-ud`)
    #[arg(long)]
    pub underscored: bool,

    /// Print the command instead of running it
    #[arg(long)]
    pub dry_run: bool,
}

impl AddArgs {
    /// Build migration options; `env` is the already resolved environment.
    pub fn into_options(self, env: String) -> MigrationOptions {
        MigrationOptions {
            env,
            config_path: self.config,
            migrations_path: None,
            name: self.name,
            plugin_name: self.plugin,
            options_path: self.options_path,
            seeders_path: Some(self.seeders_path),
            models_path: Some(self.models_path),
            url: self.url,
            debug: self.debug,
            underscored: self.underscored,
        }
    }
}

pub async fn cmd_add<E: Executor>(
    composer: &Composer,
    options: &MigrationOptions,
    executor: &E,
) -> Result<()> {
    // Validation happens here, before anything is spawned
    let invocation = composer.compose(Target::Root, options, Mode::Add)?;

    match options.plugin_name.as_deref() {
        Some(plugin) => info!("Generating migration for plugin {}", plugin),
        None => info!("Generating migration for the root project"),
    }

    run_sequence(executor, std::slice::from_ref(&invocation)).await?;
    Ok(())
}
