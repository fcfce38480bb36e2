use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("project has no main.tex: {0}")]
    MissingMainTex(PathBuf),
    #[error("{0} not found on PATH")]
    MissingBinary(String),
    #[error("{method} timed out after {secs}s")]
    Timeout { method: &'static str, secs: u64 },
    #[error("{method} failed: {stderr}")]
    Failed { method: &'static str, stderr: String },
    #[error("compiler exited cleanly but produced no main.pdf")]
    NoArtifact,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
