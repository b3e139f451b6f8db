//! Real child processes with a hard deadline.

use std::{
    io::{self, Read},
    path::{Path, PathBuf},
    process::{Command, Stdio},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use stackseed_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner, Invocation},
    },
    error::{SeedError, SeedResult},
};
use tracing::{debug, instrument, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Production runner using `std::process`.
///
/// Output is drained on background threads so a chatty child cannot block
/// on a full pipe while we poll for its exit.
#[derive(Debug, Clone, Copy)]
pub struct SystemRunner {
    poll_interval: Duration,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
        }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SystemRunner {
    #[instrument(skip_all, fields(command = %invocation.display()))]
    fn run(&self, invocation: &Invocation, cwd: &Path) -> SeedResult<CommandOutput> {
        // A missing cwd also fails spawn with NotFound.
        if !cwd.is_dir() {
            return Err(ApplicationError::FilesystemError {
                path: cwd.to_path_buf(),
                reason: "working directory does not exist".into(),
            }
            .into());
        }

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(&invocation.program, e))?;

        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);
        let deadline = Instant::now() + invocation.timeout;

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    // Reader threads are left to finish on their own; a
                    // grandchild may still hold the pipes open.
                    let _ = child.kill();
                    let _ = child.wait();
                    warn!(timeout_secs = invocation.timeout.as_secs(), "Command timed out");
                    return Err(ApplicationError::CommandTimedOut {
                        command: invocation.display(),
                        timeout: invocation.timeout,
                    }
                    .into());
                }
                Ok(None) => thread::sleep(self.poll_interval),
                Err(e) => {
                    let _ = child.kill();
                    return Err(ApplicationError::SpawnFailed {
                        program: invocation.program.clone(),
                        reason: e.to_string(),
                    }
                    .into());
                }
            }
        };

        let output = CommandOutput {
            status: status.code(),
            stdout: collect(stdout),
            stderr: collect(stderr),
        };
        debug!(status = ?output.status, "Command finished");
        Ok(output)
    }

    fn is_available(&self, program: &str) -> bool {
        find_on_path(program).is_some()
    }
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        buf
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

fn spawn_error(program: &str, e: io::Error) -> SeedError {
    if e.kind() == io::ErrorKind::NotFound && find_on_path(program).is_none() {
        ApplicationError::ToolMissing {
            tool: program.to_string(),
        }
        .into()
    } else {
        ApplicationError::SpawnFailed {
            program: program.to_string(),
            reason: e.to_string(),
        }
        .into()
    }
}

/// Locate an executable the way a shell would.
fn find_on_path(program: &str) -> Option<PathBuf> {
    let direct = Path::new(program);
    if direct.components().count() > 1 {
        return direct.is_file().then(|| direct.to_path_buf());
    }

    let extensions: &[&str] = if cfg!(windows) {
        &["", ".exe", ".cmd", ".bat"]
    } else {
        &[""]
    };

    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path).find_map(|dir| {
        extensions
            .iter()
            .map(|ext| dir.join(format!("{program}{ext}")))
            .find(|candidate| candidate.is_file())
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sh(script: &str, timeout: Duration) -> Invocation {
        Invocation::new("sh", ["-c", script], timeout)
    }

    #[test]
    fn captures_output_and_exit_code() {
        let tmp = TempDir::new().unwrap();
        let out = SystemRunner::new()
            .run(
                &sh("echo hello; echo oops >&2; exit 3", Duration::from_secs(5)),
                tmp.path(),
            )
            .unwrap();
        assert_eq!(out.status, Some(3));
        assert_eq!(out.stdout.trim(), "hello");
        assert_eq!(out.summary(), "oops");
        assert!(!out.success());
    }

    #[test]
    fn runs_in_the_given_directory() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("go.mod"), "module x\n").unwrap();
        let out = SystemRunner::new()
            .run(&sh("cat go.mod", Duration::from_secs(5)), tmp.path())
            .unwrap();
        assert!(out.success());
        assert_eq!(out.stdout, "module x\n");
    }

    #[test]
    fn kills_a_process_past_its_deadline() {
        let tmp = TempDir::new().unwrap();
        let started = Instant::now();
        let err = SystemRunner::new()
            .run(&sh("sleep 5", Duration::from_millis(200)), tmp.path())
            .unwrap_err();
        assert!(started.elapsed() < Duration::from_secs(4));
        assert!(matches!(
            err,
            SeedError::Application(ApplicationError::CommandTimedOut { .. })
        ));
    }

    #[test]
    fn unknown_program_is_tool_missing() {
        let tmp = TempDir::new().unwrap();
        let runner = SystemRunner::new();
        let inv = Invocation::new("stackseed-no-such-tool", ["--version"], Duration::from_secs(1));
        let err = runner.run(&inv, tmp.path()).unwrap_err();
        assert!(err.is_precondition_failure());
        assert!(!runner.is_available("stackseed-no-such-tool"));
        assert!(runner.is_available("sh"));
    }

    #[test]
    fn missing_working_dir_is_not_a_missing_tool() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("nowhere");
        let err = SystemRunner::new()
            .run(&sh("true", Duration::from_secs(5)), &gone)
            .unwrap_err();
        assert!(!err.is_precondition_failure());
        assert!(matches!(
            err,
            SeedError::Application(ApplicationError::FilesystemError { ref path, .. }) if *path == gone
        ));
    }
}
