//! Absolute project paths derived from the working directory and configuration.

use crate::config::Config;
use crate::constants::{MIGRATIONS_SUBDIR, RSA_PRIVATE_KEY_FILENAME, RSA_PUBLIC_KEY_FILENAME};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectLayout {
    /// Directory every relative convention is resolved against
    pub root: PathBuf,
    pub plugin_dir: PathBuf,
    pub plugin_prefix: String,
    pub database_config: PathBuf,
    pub rsa_dir: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>, config: &Config) -> Self {
        let root = root.into();
        let directories = &config.directories;

        Self {
            plugin_dir: root.join(&directories.plugin_dir),
            plugin_prefix: directories.plugin_prefix.clone(),
            database_config: root.join(&directories.database_config),
            rsa_dir: root.join(&directories.rsa_dir),
            root,
        }
    }

    /// Layout using only the built-in conventions.
    pub fn with_defaults(root: impl Into<PathBuf>) -> Self {
        Self::new(root, &Config::default())
    }

    /// Resolve a user supplied path against the project root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// `<plugin dir>/<prefix><name>/migrations`, for plugins referenced by short name.
    pub fn prefixed_plugin_migrations(&self, plugin_name: &str) -> PathBuf {
        self.plugin_dir
            .join(format!("{}{}", self.plugin_prefix, plugin_name))
            .join(MIGRATIONS_SUBDIR)
    }

    pub fn rsa_private_key(&self) -> PathBuf {
        self.rsa_dir.join(RSA_PRIVATE_KEY_FILENAME)
    }

    pub fn rsa_public_key(&self) -> PathBuf {
        self.rsa_dir.join(RSA_PUBLIC_KEY_FILENAME)
    }
}
