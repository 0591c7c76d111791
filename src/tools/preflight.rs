use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::ToolSettings;

#[derive(Debug, Error)]
pub enum PreflightError {
    #[error("{program} not found")]
    MissingProgram { program: String },
}

/// Check every configured program can be found on `path_var`, in pipeline
/// order.
///
/// Only looks, never runs anything. A program that is found can still fail
/// when it is invoked.
pub fn run_preflight(tools: &ToolSettings, path_var: &OsStr) -> Result<(), PreflightError> {
    check_programs(tools.programs().iter().map(|(_, p)| *p), path_var)
}

pub fn check_programs<'a>(
    programs: impl IntoIterator<Item = &'a str>,
    path_var: &OsStr,
) -> Result<(), PreflightError> {
    for program in programs {
        match find_program(program, path_var) {
            Some(found) => debug!(program, path = %found.display(), "found"),
            None => {
                return Err(PreflightError::MissingProgram {
                    program: program.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Resolve `program` the way a shell would: as a path when it contains a
/// separator, otherwise by searching each directory of `path_var`.
pub fn find_program(program: &str, path_var: &OsStr) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }
    if program.chars().any(std::path::is_separator) {
        let path = PathBuf::from(program);
        return is_executable(&path).then_some(path);
    }

    env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidates(&dir, program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(not(windows))]
fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    vec![dir.join(program)]
}

#[cfg(windows)]
fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    vec![dir.join(program), dir.join(format!("{program}.exe"))]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
