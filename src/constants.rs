// Configuration file name
pub const CONFIG_FILENAME: &str = "coca.yaml";

// Project layout conventions, relative to the working directory
pub const PLUGIN_DIR: &str = "lib/plugin";
pub const PLUGIN_PREFIX: &str = "egg-coca-";
pub const DATABASE_CONFIG_PATH: &str = "database/config.json";
pub const RSA_DIR: &str = "config/rsa";
pub const MIGRATIONS_SUBDIR: &str = "migrations";

// RSA key file names
pub const RSA_PRIVATE_KEY_FILENAME: &str = "rsa_private_key.pem";
pub const RSA_PUBLIC_KEY_FILENAME: &str = "rsa_public_key.pem";
pub const RSA_KEY_BITS: u32 = 1024;

// External tools
pub const MIGRATION_PROGRAM: &str = "npx";
pub const MIGRATION_TOOL: &str = "sequelize";
pub const OPENSSL_PROGRAM: &str = "openssl";

// Migration tool actions
pub const MIGRATE_ACTION: &str = "db:migrate";
pub const GENERATE_ACTION: &str = "migration:generate";

// Option defaults
pub const DEFAULT_ENV: &str = "development";
pub const DEFAULT_SEEDERS_PATH: &str = "seeders";
pub const DEFAULT_MODELS_PATH: &str = "models";
pub const ENV_VAR: &str = "COCA_ENV";
