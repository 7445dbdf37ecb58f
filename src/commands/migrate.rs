use crate::invocation::{Composer, Invocation, MigrationOptions, Mode, Target};
use crate::plugin::discover_plugins;
use crate::runner::{Executor, run_sequence};
use anyhow::{Context, Result};
use tracing::info;

/// Invocations for a migration run: one per migratable plugin, then the root project.
pub fn migration_plan(composer: &Composer, options: &MigrationOptions) -> Result<Vec<Invocation>> {
    let plugin_dir = &composer.layout().plugin_dir;
    let plugins = discover_plugins(plugin_dir)
        .with_context(|| "Plugin discovery failed; is this a coca project root?")?;

    let mut plan = Vec::with_capacity(plugins.len() + 1);
    for plugin in &plugins {
        info!("Plugin {} has migrations", plugin.name);
        plan.push(composer.compose(Target::Plugin(plugin), options, Mode::Migrate)?);
    }
    plan.push(composer.compose(Target::Root, options, Mode::Migrate)?);

    Ok(plan)
}

pub async fn cmd_migrate<E: Executor>(
    composer: &Composer,
    options: &MigrationOptions,
    executor: &E,
) -> Result<()> {
    let plan = migration_plan(composer, options)?;
    info!(
        "Running {} migration(s) in environment '{}'",
        plan.len(),
        options.env
    );

    run_sequence(executor, &plan).await?;
    Ok(())
}
