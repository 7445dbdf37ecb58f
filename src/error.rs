use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by discovery, composition and external execution.
#[derive(Error, Debug)]
pub enum CocaError {
    #[error("directory not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("missing required option '--{field}'")]
    MissingRequiredField { field: &'static str },

    #[error("command failed{}: {command}\n{message}", exit_suffix(*code))]
    ExternalProcess {
        command: String,
        code: Option<i32>,
        message: String,
    },

    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn exit_suffix(code: Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {}", code),
        None => " (terminated by signal)".to_string(),
    }
}

impl CocaError {
    /// Exit code the binary should terminate with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CocaError::ExternalProcess {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}
