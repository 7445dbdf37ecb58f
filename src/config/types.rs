use clap::Args;
use serde::{Deserialize, Serialize};

/// Raw configuration input - all fields Optional for merging
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigInput {
    pub directories: Option<DirectoriesInput>,
    pub migration: Option<MigrationInput>,
    pub rsa: Option<RsaInput>,
}

/// Resolved configuration with all defaults applied
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub directories: Directories,
    pub migration: Migration,
    pub rsa: Rsa,
}

// Directory configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DirectoriesInput {
    pub plugin_dir: Option<String>,
    pub plugin_prefix: Option<String>,
    pub database_config: Option<String>,
    pub rsa_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Directories {
    pub plugin_dir: String,
    pub plugin_prefix: String,
    pub database_config: String,
    pub rsa_dir: String,
}

// Migration tool configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MigrationInput {
    pub env: Option<String>,
    pub program: Option<String>,
    pub args: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Migration {
    pub env: String,
    /// Program launched for every migration invocation
    pub program: String,
    /// Tokens placed between the program and the action (e.g. `sequelize` for `npx`)
    pub args: Vec<String>,
}

// RSA key generation
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RsaInput {
    pub program: Option<String>,
    pub key_bits: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rsa {
    pub program: String,
    pub key_bits: u32,
}

/// Command line arguments shared by commands that target an environment
#[derive(Debug, Clone, Default, Args)]
pub struct EnvArgs {
    #[arg(
        long,
        short = 'e',
        help = "The environment to run the command in [default: development]"
    )]
    pub env: Option<String>,
}

impl From<EnvArgs> for MigrationInput {
    fn from(args: EnvArgs) -> Self {
        MigrationInput {
            // `-e ""` leaves the environment to the config file and COCA_ENV
            env: args.env.filter(|env| !env.is_empty()),
            program: None,
            args: None,
        }
    }
}
