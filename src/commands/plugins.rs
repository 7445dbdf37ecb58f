use crate::layout::ProjectLayout;
use crate::plugin::scan_plugins;
use anyhow::Result;

pub fn cmd_plugins(layout: &ProjectLayout) -> Result<()> {
    let plugins = scan_plugins(&layout.plugin_dir)?;

    if plugins.is_empty() {
        println!("No plugins found in {}", layout.plugin_dir.display());
        return Ok(());
    }

    for plugin in &plugins {
        let status = if plugin.has_migrations {
            "migrations"
        } else {
            "no migrations"
        };
        println!("{}\t{}", plugin.name, status);
    }

    Ok(())
}
