//! Composition of external migration-tool invocations.
//!
//! Flags are appended in a fixed order (env, config, options-path,
//! seeders-path, models-path, url, name, debug, underscored,
//! migrations-path) so identical options always render identical argument
//! lists. Composition never touches the filesystem; every path is derived
//! from the [`ProjectLayout`] handed in.

use crate::config::Migration;
use crate::constants::{
    DEFAULT_ENV, DEFAULT_MODELS_PATH, DEFAULT_SEEDERS_PATH, GENERATE_ACTION, MIGRATE_ACTION,
};
use crate::error::CocaError;
use crate::layout::ProjectLayout;
use crate::plugin::PluginEntry;
use std::fmt;
use std::path::Path;

/// A program plus its ordered arguments, ready to hand to an executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    fn push_flag(&mut self, name: &str, value: impl fmt::Display) {
        self.args.push(format!("--{}={}", name, value));
    }

    /// Emit `--name=value` only for present, non-empty values.
    fn push_optional(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.push_flag(name, value);
        }
    }

    fn push_switch(&mut self, name: &str, enabled: bool) {
        if enabled {
            self.args.push(format!("--{}", name));
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

fn shell_quote(token: &str) -> String {
    let needs_quotes = token.is_empty()
        || token.chars().any(|c| {
            c.is_whitespace() || matches!(c, '\'' | '"' | '$' | '`' | '\\' | ';' | '&' | '|')
        });

    if needs_quotes {
        format!("'{}'", token.replace('\'', r"'\''"))
    } else {
        token.to_string()
    }
}

/// Which project an invocation runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Root,
    Plugin(&'a PluginEntry),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Apply pending migrations
    Migrate,
    /// Generate a new migration skeleton
    Add,
}

/// User supplied options for a migration run or a migration skeleton.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationOptions {
    pub env: String,
    pub config_path: Option<String>,
    pub migrations_path: Option<String>,
    pub name: Option<String>,
    pub plugin_name: Option<String>,
    pub options_path: Option<String>,
    pub seeders_path: Option<String>,
    pub models_path: Option<String>,
    pub url: Option<String>,
    pub debug: bool,
    pub underscored: bool,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            env: DEFAULT_ENV.to_string(),
            config_path: None,
            migrations_path: None,
            name: None,
            plugin_name: None,
            options_path: None,
            seeders_path: Some(DEFAULT_SEEDERS_PATH.to_string()),
            models_path: Some(DEFAULT_MODELS_PATH.to_string()),
            url: None,
            debug: false,
            underscored: false,
        }
    }
}

impl MigrationOptions {
    /// Options for `migrate`: only the environment matters.
    pub fn for_env(env: impl Into<String>) -> Self {
        Self {
            env: env.into(),
            ..Default::default()
        }
    }
}

/// Builds migration-tool invocations for a project layout.
#[derive(Debug, Clone)]
pub struct Composer {
    layout: ProjectLayout,
    program: String,
    tool_args: Vec<String>,
}

impl Composer {
    pub fn new(layout: ProjectLayout, migration: &Migration) -> Self {
        Self {
            layout,
            program: migration.program.clone(),
            tool_args: migration.args.clone(),
        }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn compose(
        &self,
        target: Target<'_>,
        options: &MigrationOptions,
        mode: Mode,
    ) -> Result<Invocation, CocaError> {
        match mode {
            Mode::Migrate => Ok(self.compose_migrate(target, options)),
            Mode::Add => self.compose_add(target, options),
        }
    }

    fn base(&self, action: &str) -> Invocation {
        Invocation::new(&self.program)
            .args(self.tool_args.iter().cloned())
            .arg(action)
    }

    fn compose_migrate(&self, target: Target<'_>, options: &MigrationOptions) -> Invocation {
        let mut invocation = self.base(MIGRATE_ACTION);

        invocation.push_flag("env", &options.env);

        // Plugins share the root project's database config
        let config_path = match &options.config_path {
            Some(path) => self.layout.resolve(path),
            None => self.layout.database_config.clone(),
        };
        invocation.push_flag("config", config_path.display());

        if let Target::Plugin(plugin) = target {
            invocation.push_flag("migrations-path", plugin.migrations_path().display());
        }

        invocation
    }

    fn compose_add(
        &self,
        target: Target<'_>,
        options: &MigrationOptions,
    ) -> Result<Invocation, CocaError> {
        // Whitespace-only names count as missing
        let name = options
            .name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or(CocaError::MissingRequiredField { field: "name" })?;

        let mut invocation = self.base(GENERATE_ACTION);

        invocation.push_optional("env", Some(options.env.as_str()));
        invocation.push_optional("config", options.config_path.as_deref());
        invocation.push_optional("options-path", options.options_path.as_deref());
        invocation.push_optional("seeders-path", options.seeders_path.as_deref());
        invocation.push_optional("models-path", options.models_path.as_deref());
        invocation.push_optional("url", options.url.as_deref());
        invocation.push_flag("name", name);
        invocation.push_switch("debug", options.debug);
        invocation.push_switch("underscored", options.underscored);

        let plugin_name = options
            .plugin_name
            .as_deref()
            .filter(|plugin| !plugin.is_empty());
        let migrations_path = match (plugin_name, target) {
            (Some(plugin), _) => Some(self.layout.prefixed_plugin_migrations(plugin)),
            (None, Target::Plugin(plugin)) => Some(plugin.migrations_path()),
            (None, Target::Root) => options
                .migrations_path
                .as_deref()
                .filter(|path| !path.is_empty())
                .map(|path| self.layout.resolve(Path::new(path))),
        };
        if let Some(path) = migrations_path {
            invocation.push_flag("migrations-path", path.display());
        }

        Ok(invocation)
    }
}
