pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod invocation;
pub mod layout;
pub mod plugin;
pub mod runner;

pub use error::CocaError;
