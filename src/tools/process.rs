use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::config::ToolSettings;
use crate::pipeline::{CUE_FILE, IMAGE_FILE, TOC_FILE, WorkDir};

use super::types::{ToolError, Toolchain};

/// `Toolchain` backed by cdrdao, toc2cue, bchunk and sox (or whatever the
/// settings point at). Each command runs with the working directory as its
/// cwd so relative names written into the TOC and cue sheet resolve there.
pub struct SystemToolchain {
    tools: ToolSettings,
}

impl SystemToolchain {
    pub fn new(tools: ToolSettings) -> Self {
        Self { tools }
    }
}

impl Toolchain for SystemToolchain {
    fn extract(&self, work: &WorkDir) -> Result<(), ToolError> {
        let mut cmd = Command::new(&self.tools.extractor);
        cmd.current_dir(work.path())
            .args(extract_args(self.tools.device.as_deref()));
        // Reading a disc takes minutes; let the extractor's progress through.
        run_attached(&self.tools.extractor, cmd)
    }

    fn bridge(&self, work: &WorkDir) -> Result<(), ToolError> {
        let mut cmd = Command::new(&self.tools.bridge);
        cmd.current_dir(work.path()).args([TOC_FILE, CUE_FILE]);
        run_captured(&self.tools.bridge, cmd)
    }

    fn split(&self, work: &WorkDir) -> Result<(), ToolError> {
        let mut cmd = Command::new(&self.tools.splitter);
        cmd.current_dir(work.path()).args(split_args());
        run_captured(&self.tools.splitter, cmd)
    }

    fn transcode(&self, input: &Path, output: &Path) -> Result<(), ToolError> {
        let mut cmd = Command::new(&self.tools.transcoder);
        cmd.arg(input).arg(output);
        run_captured(&self.tools.transcoder, cmd)
    }
}

pub(crate) fn extract_args(device: Option<&str>) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["read-cd".into()];
    if let Some(device) = device {
        args.push("--device".into());
        args.push(device.into());
    }
    args.extend(["--read-raw", "--datafile", IMAGE_FILE, TOC_FILE].map(OsString::from));
    args
}

/// An empty basename makes bchunk write `01.cdr`, `02.cdr`, ...
pub(crate) fn split_args() -> [&'static str; 3] {
    [IMAGE_FILE, CUE_FILE, ""]
}

/// Run with inherited stdio.
pub(crate) fn run_attached(program: &str, mut cmd: Command) -> Result<(), ToolError> {
    let args: Vec<_> = cmd.get_args().collect();
    debug!(program, ?args, "running");
    let status = cmd.status().map_err(|source| ToolError::Spawn {
        program: program.to_string(),
        source,
    })?;
    if status.success() {
        return Ok(());
    }
    Err(ToolError::Failed {
        program: program.to_string(),
        code: status.code(),
        stderr: String::new(),
    })
}

/// Run with output captured; stderr ends up in the error on failure.
pub(crate) fn run_captured(program: &str, mut cmd: Command) -> Result<(), ToolError> {
    let args: Vec<_> = cmd.get_args().collect();
    debug!(program, ?args, "running");
    let output = cmd.output().map_err(|source| ToolError::Spawn {
        program: program.to_string(),
        source,
    })?;
    if output.status.success() {
        return Ok(());
    }
    Err(ToolError::Failed {
        program: program.to_string(),
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}
