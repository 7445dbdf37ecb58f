pub mod add;
pub mod migrate;
pub mod plugins;
pub mod rsa;

// Re-export all command functions
pub use add::{AddArgs, cmd_add};
pub use migrate::{cmd_migrate, migration_plan};
pub use plugins::cmd_plugins;
pub use rsa::{cmd_rsa, rsa_invocations};
