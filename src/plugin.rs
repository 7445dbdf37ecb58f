//! Plugin discovery under the project's plugin directory.
//!
//! A plugin takes part in migrations when it is a directory holding a
//! `migrations` subdirectory. Results are sorted by name so the order in which
//! plugins are migrated does not depend on how the platform lists directories.

use crate::constants::MIGRATIONS_SUBDIR;
use crate::error::CocaError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginEntry {
    /// Directory base name
    pub name: String,
    /// Plugin root joined with `name`
    pub path: PathBuf,
    pub has_migrations: bool,
}

impl PluginEntry {
    pub fn new(plugin_root: &Path, name: impl Into<String>) -> Self {
        let name = name.into();
        let path = plugin_root.join(&name);
        let has_migrations = path.join(MIGRATIONS_SUBDIR).is_dir();

        Self {
            name,
            path,
            has_migrations,
        }
    }

    pub fn migrations_path(&self) -> PathBuf {
        self.path.join(MIGRATIONS_SUBDIR)
    }
}

/// Every directory directly under `plugin_root`, sorted by name, with or without migrations.
pub fn scan_plugins(plugin_root: &Path) -> Result<Vec<PluginEntry>, CocaError> {
    if !plugin_root.is_dir() {
        return Err(CocaError::NotFound {
            path: plugin_root.to_path_buf(),
        });
    }

    let read_err = |source| CocaError::Io {
        path: plugin_root.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(plugin_root).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;

        // Follows symlinks, so a linked plugin directory counts as a plugin
        if !entry.path().is_dir() {
            debug!("Skipping non-directory {}", entry.path().display());
            continue;
        }

        let Ok(name) = entry.file_name().into_string() else {
            warn!(
                "Skipping plugin directory with non UTF-8 name: {}",
                entry.path().display()
            );
            continue;
        };

        entries.push(PluginEntry::new(plugin_root, name));
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Plugins that take part in a migration run, in the order they are migrated.
pub fn discover_plugins(plugin_root: &Path) -> Result<Vec<PluginEntry>, CocaError> {
    let plugins: Vec<PluginEntry> = scan_plugins(plugin_root)?
        .into_iter()
        .filter(|plugin| {
            if !plugin.has_migrations {
                debug!("Plugin {} has no migrations directory", plugin.name);
            }
            plugin.has_migrations
        })
        .collect();

    debug!(
        "Discovered {} migratable plugin(s) in {}",
        plugins.len(),
        plugin_root.display()
    );
    Ok(plugins)
}
