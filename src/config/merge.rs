use crate::config::types::*;

/// Trait for merging optional configuration values
pub trait Merge<T> {
    fn merge(self, other: T) -> T;
}

impl<T> Merge<Option<T>> for Option<T> {
    fn merge(self, other: Option<T>) -> Option<T> {
        other.or(self)
    }
}

impl Merge<ConfigInput> for ConfigInput {
    fn merge(self, other: ConfigInput) -> ConfigInput {
        ConfigInput {
            directories: match (self.directories, other.directories) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
            migration: match (self.migration, other.migration) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
            rsa: match (self.rsa, other.rsa) {
                (None, None) => None,
                (Some(a), None) => Some(a),
                (None, Some(b)) => Some(b),
                (Some(a), Some(b)) => Some(a.merge_with(b)),
            },
        }
    }
}

impl DirectoriesInput {
    pub fn merge_with(self, other: DirectoriesInput) -> DirectoriesInput {
        DirectoriesInput {
            plugin_dir: other.plugin_dir.or(self.plugin_dir),
            plugin_prefix: other.plugin_prefix.or(self.plugin_prefix),
            database_config: other.database_config.or(self.database_config),
            rsa_dir: other.rsa_dir.or(self.rsa_dir),
        }
    }
}

impl MigrationInput {
    pub fn merge_with(self, other: MigrationInput) -> MigrationInput {
        MigrationInput {
            env: other.env.or(self.env),
            program: other.program.or(self.program),
            args: other.args.or(self.args),
        }
    }
}

impl RsaInput {
    pub fn merge_with(self, other: RsaInput) -> RsaInput {
        RsaInput {
            program: other.program.or(self.program),
            key_bits: other.key_bits.or(self.key_bits),
        }
    }
}
