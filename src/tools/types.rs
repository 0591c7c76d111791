use std::path::Path;

use thiserror::Error;

use crate::pipeline::WorkDir;

/// Failure of a single external invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("could not start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} {}", describe_failure(.code, .stderr))]
    Failed {
        program: String,
        /// `None` when the process was killed by a signal.
        code: Option<i32>,
        stderr: String,
    },
}

fn describe_failure(code: &Option<i32>, stderr: &str) -> String {
    let status = match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    };
    match stderr.lines().rev().find(|l| !l.trim().is_empty()) {
        Some(last) => format!("{status}: {}", last.trim()),
        None => status,
    }
}

/// What the pipeline needs from the outside world.
///
/// Every call blocks until the program finishes. Paths live inside `work`;
/// implementations must not depend on the process working directory.
pub trait Toolchain {
    /// Read the disc into `work.image()` and `work.toc()`.
    fn extract(&self, work: &WorkDir) -> Result<(), ToolError>;
    /// Write `work.cue()` from `work.toc()`.
    fn bridge(&self, work: &WorkDir) -> Result<(), ToolError>;
    /// Cut `work.image()` into one `NN.cdr` file per track of `work.cue()`.
    fn split(&self, work: &WorkDir) -> Result<(), ToolError>;
    /// Convert one raw track into `output`; the format follows its extension.
    fn transcode(&self, input: &Path, output: &Path) -> Result<(), ToolError>;
}
