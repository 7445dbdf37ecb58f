use crate::config::{merge::Merge, types::*};
use crate::constants::ENV_VAR;
use anyhow::{Result, anyhow};

pub struct ConfigBuilder {
    config_input: ConfigInput,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config_input: ConfigInput::default(),
        }
    }

    pub fn with_file(mut self, file_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(file_input);
        self
    }

    pub fn with_cli_args(mut self, cli_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(cli_input);
        self
    }

    pub fn resolve(self) -> Result<Config> {
        let defaults = Config::default();

        Ok(Config {
            directories: self.resolve_directories(&defaults.directories)?,
            migration: self.resolve_migration(&defaults.migration)?,
            rsa: self.resolve_rsa(&defaults.rsa)?,
        })
    }

    fn resolve_directories(&self, defaults: &Directories) -> Result<Directories> {
        let dir_input = self.config_input.directories.as_ref();

        let plugin_dir = dir_input
            .and_then(|d| d.plugin_dir.as_ref())
            .cloned()
            .unwrap_or_else(|| defaults.plugin_dir.clone());
        if plugin_dir.trim().is_empty() {
            return Err(anyhow!("directories.plugin_dir cannot be empty"));
        }

        Ok(Directories {
            plugin_dir,
            // An empty prefix is allowed: plugins are then named by their bare directory
            plugin_prefix: dir_input
                .and_then(|d| d.plugin_prefix.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.plugin_prefix.clone()),
            database_config: dir_input
                .and_then(|d| d.database_config.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.database_config.clone()),
            rsa_dir: dir_input
                .and_then(|d| d.rsa_dir.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.rsa_dir.clone()),
        })
    }

    fn resolve_migration(&self, defaults: &Migration) -> Result<Migration> {
        let migration_input = self.config_input.migration.as_ref();

        let env = migration_input
            .and_then(|m| m.env.as_ref())
            .cloned()
            .or_else(|| std::env::var(ENV_VAR).ok())
            .filter(|env| !env.is_empty())
            .unwrap_or_else(|| defaults.env.clone());

        let program = migration_input
            .and_then(|m| m.program.as_ref())
            .cloned()
            .unwrap_or_else(|| defaults.program.clone());
        if program.trim().is_empty() {
            return Err(anyhow!("migration.program cannot be empty"));
        }

        Ok(Migration {
            env,
            program,
            args: migration_input
                .and_then(|m| m.args.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.args.clone()),
        })
    }

    fn resolve_rsa(&self, defaults: &Rsa) -> Result<Rsa> {
        let rsa_input = self.config_input.rsa.as_ref();

        let key_bits = rsa_input
            .and_then(|r| r.key_bits)
            .unwrap_or(defaults.key_bits);
        if key_bits < 512 {
            return Err(anyhow!(
                "rsa.key_bits must be at least 512, got {}",
                key_bits
            ));
        }

        Ok(Rsa {
            program: rsa_input
                .and_then(|r| r.program.as_ref())
                .cloned()
                .unwrap_or_else(|| defaults.program.clone()),
            key_bits,
        })
    }
}
