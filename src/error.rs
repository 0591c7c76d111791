use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::PipelineError;
use crate::tools::PreflightError;

/// Anything that ends a run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not determine the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error(transparent)]
    Preflight(#[from] PreflightError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}
