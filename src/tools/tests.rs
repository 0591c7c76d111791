use super::process::{extract_args, run_captured, split_args};
use super::*;
use std::ffi::OsString;
use tempfile::tempdir;

#[test]
fn extract_args_match_cdrdao_raw_read() {
    let args = extract_args(None);
    assert_eq!(
        args,
        ["read-cd", "--read-raw", "--datafile", "disk.bin", "disk.toc"]
            .map(OsString::from)
            .to_vec()
    );
}

#[test]
fn extract_args_pass_device_first() {
    let args = extract_args(Some("/dev/sr1"));
    assert_eq!(args[1], OsString::from("--device"));
    assert_eq!(args[2], OsString::from("/dev/sr1"));
    assert_eq!(args.last().unwrap(), &OsString::from("disk.toc"));
}

#[test]
fn split_uses_empty_basename() {
    assert_eq!(split_args(), ["disk.bin", "disk.cue", ""]);
}

#[test]
fn failed_error_shows_status_and_last_stderr_line() {
    let err = ToolError::Failed {
        program: "sox".into(),
        code: Some(2),
        stderr: "sox FAIL formats: can't open input\nsox FAIL: bad header\n\n".into(),
    };
    assert_eq!(err.to_string(), "sox exited with status 2: sox FAIL: bad header");

    let err = ToolError::Failed {
        program: "cdrdao".into(),
        code: None,
        stderr: String::new(),
    };
    assert_eq!(err.to_string(), "cdrdao was terminated by a signal");
}

#[cfg(unix)]
fn fake_program(dir: &std::path::Path, name: &str, mode: u32) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();
    path
}

#[cfg(unix)]
#[test]
fn find_program_searches_path_in_order() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    fake_program(second.path(), "bchunk", 0o755);

    let path_var = std::env::join_paths([first.path(), second.path()]).unwrap();
    assert_eq!(
        find_program("bchunk", &path_var).unwrap(),
        second.path().join("bchunk")
    );
    assert!(find_program("sox", &path_var).is_none());
}

#[cfg(unix)]
#[test]
fn find_program_ignores_non_executables() {
    let dir = tempdir().unwrap();
    fake_program(dir.path(), "toc2cue", 0o644);
    std::fs::create_dir(dir.path().join("sox")).unwrap();

    let path_var = dir.path().as_os_str().to_owned();
    assert!(find_program("toc2cue", &path_var).is_none());
    assert!(find_program("sox", &path_var).is_none());
}

#[cfg(unix)]
#[test]
fn find_program_accepts_explicit_paths() {
    let dir = tempdir().unwrap();
    let path = fake_program(dir.path(), "cdrdao", 0o755);

    let found = find_program(path.to_str().unwrap(), &OsString::new()).unwrap();
    assert_eq!(found, path);
}

#[cfg(unix)]
#[test]
fn check_programs_names_the_first_missing_one() {
    let dir = tempdir().unwrap();
    fake_program(dir.path(), "cdrdao", 0o755);
    fake_program(dir.path(), "bchunk", 0o755);

    let path_var = dir.path().as_os_str().to_owned();
    let err = check_programs(["cdrdao", "toc2cue", "bchunk", "sox"], &path_var).unwrap_err();
    let PreflightError::MissingProgram { program } = &err;
    assert_eq!(program, "toc2cue");
    assert_eq!(err.to_string(), "toc2cue not found");

    fake_program(dir.path(), "toc2cue", 0o755);
    fake_program(dir.path(), "sox", 0o755);
    assert!(check_programs(["cdrdao", "toc2cue", "bchunk", "sox"], &path_var).is_ok());
}

#[cfg(unix)]
#[test]
fn run_captured_reports_exit_status_and_stderr() {
    let mut cmd = std::process::Command::new("sh");
    cmd.args(["-c", "echo 'bad cue sheet' >&2; exit 3"]);
    let err = run_captured("sh", cmd).unwrap_err();
    match err {
        ToolError::Failed { code, stderr, .. } => {
            assert_eq!(code, Some(3));
            assert_eq!(stderr, "bad cue sheet");
        }
        other => panic!("unexpected error: {other}"),
    }

    let mut cmd = std::process::Command::new("sh");
    cmd.args(["-c", "exit 0"]);
    assert!(run_captured("sh", cmd).is_ok());
}

#[test]
fn run_captured_reports_spawn_failures() {
    let cmd = std::process::Command::new("discrip-no-such-program-anywhere");
    let err = run_captured("discrip-no-such-program-anywhere", cmd).unwrap_err();
    assert!(matches!(err, ToolError::Spawn { .. }));
}
