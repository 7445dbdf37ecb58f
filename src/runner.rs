//! Execution of composed invocations.
//!
//! Invocations run one at a time; the first failure stops the sequence.

use crate::error::CocaError;
use crate::invocation::Invocation;
use std::path::PathBuf;
use std::process::Stdio;
use tracing::{debug, info};

/// Runs one invocation to completion and returns its captured standard output.
#[allow(async_fn_in_trait)]
pub trait Executor {
    async fn execute(&self, invocation: &Invocation) -> Result<String, CocaError>;
}

/// Spawns real processes in the project's working directory.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    working_dir: PathBuf,
}

impl ProcessExecutor {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }
}

impl Executor for ProcessExecutor {
    async fn execute(&self, invocation: &Invocation) -> Result<String, CocaError> {
        debug!("Spawning {} in {}", invocation, self.working_dir.display());

        // Dropping the future (e.g. on Ctrl+C) kills the child
        let output = tokio::process::Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| CocaError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(CocaError::ExternalProcess {
                command: invocation.to_string(),
                code: output.status.code(),
                message,
            });
        }

        Ok(stdout)
    }
}

/// Prints the command line instead of running it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunExecutor;

impl Executor for DryRunExecutor {
    async fn execute(&self, invocation: &Invocation) -> Result<String, CocaError> {
        Ok(invocation.to_string())
    }
}

/// Run `invocations` in order, relaying each one's output.
///
/// Returns the number of invocations that completed.
pub async fn run_sequence<E: Executor>(
    executor: &E,
    invocations: &[Invocation],
) -> Result<usize, CocaError> {
    let total = invocations.len();

    for (index, invocation) in invocations.iter().enumerate() {
        info!("[{}/{}] {}", index + 1, total, invocation);

        let output = executor.execute(invocation).await?;
        relay_output(&output);
    }

    Ok(total)
}

fn relay_output(output: &str) {
    if output.is_empty() {
        return;
    }
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}
