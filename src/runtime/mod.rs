use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Settings;
use crate::console::Console;
use crate::error::Error;
use crate::pipeline::{self, Progress, RipReport};
use crate::tools::{SystemToolchain, Toolchain, run_preflight};

pub mod logging;
mod settings;

pub fn run() -> Result<RipReport, Error> {
    let settings = settings::load_settings();
    let root = invocation_dir()?;
    let path_var = env::var_os("PATH").unwrap_or_default();

    let console = Console::new(settings.console.color);
    let tools = SystemToolchain::new(settings.tools.clone());
    let report = run_in(&root, &settings, &path_var, &tools, &mut |event| {
        console.report(&event)
    })?;
    console.summary(&report);
    Ok(report)
}

/// Rip the disc in `root`, looking programs up on `path_var`.
pub fn run_in<T: Toolchain + ?Sized>(
    root: &Path,
    settings: &Settings,
    path_var: &OsStr,
    tools: &T,
    observer: &mut dyn FnMut(Progress),
) -> Result<RipReport, Error> {
    info!(root = %root.display(), "starting");

    // Nothing on disk changes before every program is known to exist.
    run_preflight(&settings.tools, path_var)?;

    let report = pipeline::rip(root, settings, tools, observer)?;
    info!(dir = %report.album_dir.display(), extracted = report.extracted, "finished");
    Ok(report)
}

/// First argument if given, the current directory otherwise.
fn invocation_dir() -> Result<PathBuf, Error> {
    let dir = match env::args_os().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => env::current_dir().map_err(Error::CurrentDir)?,
    };
    absolute_dir(&dir)
}

fn absolute_dir(dir: &Path) -> Result<PathBuf, Error> {
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }
    Ok(dir
        .canonicalize()
        .unwrap_or_else(|_| dir.to_path_buf()))
}
