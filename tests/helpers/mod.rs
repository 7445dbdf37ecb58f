pub mod cli;
pub mod invocation;
