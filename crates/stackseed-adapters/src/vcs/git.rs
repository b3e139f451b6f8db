//! Repository bootstrap through the `git` binary.

use std::{path::Path, time::Duration};

use stackseed_core::{
    application::{
        ApplicationError,
        ports::{CommandRunner, Invocation, VersionControl},
    },
    error::SeedResult,
};
use tracing::{info, instrument};

const GIT: &str = "git";

pub struct GitCli {
    runner: Box<dyn CommandRunner>,
    timeout: Duration,
}

impl GitCli {
    pub fn new(runner: Box<dyn CommandRunner>, timeout: Duration) -> Self {
        Self { runner, timeout }
    }

    fn git<const N: usize>(&self, dir: &Path, args: [&str; N]) -> SeedResult<()> {
        let invocation = Invocation::new(GIT, args, self.timeout);
        let output = self.runner.run(&invocation, dir)?;
        if output.success() {
            Ok(())
        } else {
            Err(ApplicationError::SpawnFailed {
                program: invocation.display(),
                reason: output.summary().to_string(),
            }
            .into())
        }
    }
}

impl VersionControl for GitCli {
    #[instrument(skip_all, fields(dir = %dir.display()))]
    fn bootstrap(&self, dir: &Path, message: &str) -> SeedResult<()> {
        if !self.runner.is_available(GIT) {
            return Err(ApplicationError::ToolMissing { tool: GIT.into() }.into());
        }
        self.git(dir, ["init"])?;
        self.git(dir, ["add", "."])?;
        self.git(dir, ["commit", "-m", message])?;
        info!("Repository initialized");
        Ok(())
    }

    fn is_repository(&self, dir: &Path) -> bool {
        let invocation = Invocation::new(GIT, ["rev-parse", "--is-inside-work-tree"], self.timeout);
        self.runner
            .run(&invocation, dir)
            .is_ok_and(|out| out.success() && out.stdout.trim() == "true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ScriptedRunner;

    #[test]
    fn bootstrap_runs_init_add_commit() {
        let runner = ScriptedRunner::new();
        let git = GitCli::new(Box::new(runner.clone()), Duration::from_secs(5));
        git.bootstrap(Path::new("/tmp/orders"), "Initial commit: orders generated")
            .unwrap();
        assert_eq!(
            runner.calls(),
            [
                "git init",
                "git add .",
                "git commit -m Initial commit: orders generated"
            ]
        );
    }

    #[test]
    fn failed_commit_stops_with_reason() {
        let runner = ScriptedRunner::new().fail("git commit", 128, "Please tell me who you are.");
        let git = GitCli::new(Box::new(runner), Duration::from_secs(5));
        let err = git.bootstrap(Path::new("."), "msg").unwrap_err();
        assert!(err.to_string().contains("Please tell me who you are."));
    }

    #[test]
    fn detects_existing_work_tree() {
        let inside = ScriptedRunner::new().succeed("git rev-parse", "true\n");
        assert!(GitCli::new(Box::new(inside), Duration::from_secs(5)).is_repository(Path::new(".")));

        let outside = ScriptedRunner::new().fail("git rev-parse", 128, "not a git repository");
        assert!(!GitCli::new(Box::new(outside), Duration::from_secs(5)).is_repository(Path::new(".")));
    }

    #[test]
    fn missing_git_is_reported_before_running_anything() {
        let runner = ScriptedRunner::new().without_tool("git");
        let git = GitCli::new(Box::new(runner.clone()), Duration::from_secs(5));
        assert!(git.bootstrap(Path::new("."), "msg").unwrap_err().is_precondition_failure());
        assert!(runner.calls().is_empty());
    }
}
