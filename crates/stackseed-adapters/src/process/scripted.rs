//! Scripted command runner for tests.

use std::{
    collections::HashSet,
    path::Path,
    sync::{Arc, Mutex},
};

use stackseed_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner, Invocation},
    },
    error::SeedResult,
};

#[derive(Debug, Clone)]
enum Reply {
    Output(CommandOutput),
    TimedOut,
}

#[derive(Debug, Default)]
struct Script {
    replies: Vec<(String, Reply)>,
    missing: HashSet<String>,
    calls: Vec<String>,
}

/// Answers invocations by command-line prefix and records every call.
///
/// Unscripted commands succeed with empty output. Clones share state, so a
/// test can keep one handle after boxing another.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    inner: Arc<Mutex<Script>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, prefix: &str, reply: Reply) -> Self {
        if let Ok(mut script) = self.inner.lock() {
            script.replies.push((prefix.to_string(), reply));
        }
        self
    }

    /// Reply with `stdout` and exit 0 to commands starting with `prefix`.
    pub fn succeed(self, prefix: &str, stdout: &str) -> Self {
        self.push(
            prefix,
            Reply::Output(CommandOutput {
                status: Some(0),
                stdout: stdout.to_string(),
                stderr: String::new(),
            }),
        )
    }

    /// Exit with `code` and `stderr` for commands starting with `prefix`.
    pub fn fail(self, prefix: &str, code: i32, stderr: &str) -> Self {
        self.push(
            prefix,
            Reply::Output(CommandOutput {
                status: Some(code),
                stdout: String::new(),
                stderr: stderr.to_string(),
            }),
        )
    }

    pub fn time_out(self, prefix: &str) -> Self {
        self.push(prefix, Reply::TimedOut)
    }

    /// Report `program` as not installed.
    pub fn without_tool(self, program: &str) -> Self {
        if let Ok(mut script) = self.inner.lock() {
            script.missing.insert(program.to_string());
        }
        self
    }

    /// Command lines run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|script| script.calls.clone())
            .unwrap_or_default()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation, _cwd: &Path) -> SeedResult<CommandOutput> {
        let mut script = self
            .inner
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        let line = invocation.display();
        script.calls.push(line.clone());

        if script.missing.contains(&invocation.program) {
            return Err(ApplicationError::ToolMissing {
                tool: invocation.program.clone(),
            }
            .into());
        }

        let reply = script
            .replies
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Output(output)) => Ok(output),
            Some(Reply::TimedOut) => Err(ApplicationError::CommandTimedOut {
                command: line,
                timeout: invocation.timeout,
            }
            .into()),
            None => Ok(CommandOutput {
                status: Some(0),
                ..CommandOutput::default()
            }),
        }
    }

    fn is_available(&self, program: &str) -> bool {
        self.inner
            .lock()
            .map(|script| !script.missing.contains(program))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_matching_prefix_wins() {
        let runner = ScriptedRunner::new()
            .fail("go get github.com/bad", 1, "module not found")
            .succeed("go", "ok");
        let cwd = Path::new(".");
        let t = Duration::from_secs(1);

        let bad = runner
            .run(&Invocation::new("go", ["get", "github.com/bad/pkg@v1.0.0"], t), cwd)
            .unwrap();
        assert_eq!(bad.status, Some(1));

        let good = runner.run(&Invocation::new("go", ["mod", "tidy"], t), cwd).unwrap();
        assert_eq!(good.stdout, "ok");
        assert_eq!(runner.calls().len(), 2);
    }

    #[test]
    fn clones_share_the_call_log() {
        let runner = ScriptedRunner::new().without_tool("pnpm");
        let boxed: Box<dyn CommandRunner> = Box::new(runner.clone());
        assert!(!boxed.is_available("pnpm"));
        assert!(boxed.is_available("npm"));
        let _ = boxed.run(
            &Invocation::new("npm", ["install"], Duration::from_secs(1)),
            Path::new("."),
        );
        assert_eq!(runner.calls(), vec!["npm install"]);
    }
}
