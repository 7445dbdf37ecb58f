use crate::config::types::*;
use crate::constants::*;

// Config derives Default

impl Default for Directories {
    fn default() -> Self {
        Self {
            plugin_dir: PLUGIN_DIR.to_string(),
            plugin_prefix: PLUGIN_PREFIX.to_string(),
            database_config: DATABASE_CONFIG_PATH.to_string(),
            rsa_dir: RSA_DIR.to_string(),
        }
    }
}

impl Default for Migration {
    fn default() -> Self {
        Self {
            env: DEFAULT_ENV.to_string(),
            program: MIGRATION_PROGRAM.to_string(),
            args: vec![MIGRATION_TOOL.to_string()],
        }
    }
}

impl Default for Rsa {
    fn default() -> Self {
        Self {
            program: OPENSSL_PROGRAM.to_string(),
            key_bits: RSA_KEY_BITS,
        }
    }
}
