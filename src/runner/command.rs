use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, info};

use super::{tail_lines, RunOutcome, TestRunner};
use crate::config::{RunnerKind, FAILURE_TAIL_LINES};
use crate::error::DashboardError;

/// Placeholder in argument templates replaced by the requested test name.
pub const TEST_PLACEHOLDER: &str = "{test}";

/// Launches one test-tool subprocess per run and buffers its output.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    label: String,
    program: String,
    args: Vec<String>,
    cwd: PathBuf,
    headed: bool,
}

impl CommandRunner {
    pub fn new(
        label: impl Into<String>,
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            label: label.into(),
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.into(),
            headed: false,
        }
    }

    pub fn headed(mut self, headed: bool) -> Self {
        self.headed = headed;
        self
    }

    /// `dotnet test dotnet-tests --filter Name=<test>`
    pub fn dotnet(project_dir: &Path) -> Self {
        Self::new(
            "C#",
            "dotnet",
            ["test", "dotnet-tests", "--filter", "Name={test}"],
            project_dir,
        )
    }

    /// `npx playwright test --project=chromium -g <test>`
    pub fn playwright(project_dir: &Path) -> Self {
        #[cfg(windows)]
        let npx = "npx.cmd";
        #[cfg(not(windows))]
        let npx = "npx";

        Self::new(
            "Playwright",
            npx,
            ["playwright", "test", "--project=chromium", "-g", "{test}"],
            project_dir,
        )
    }

    pub fn for_kind(kind: RunnerKind, project_dir: &Path, headed: bool) -> Self {
        let runner = match kind {
            RunnerKind::Dotnet => Self::dotnet(project_dir),
            RunnerKind::Playwright => Self::playwright(project_dir),
        };
        runner.headed(headed)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args_for(&self, test_name: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace(TEST_PLACEHOLDER, test_name))
            .collect()
    }

    fn command(&self, test_name: &str, base_url: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args_for(test_name))
            .current_dir(&self.cwd)
            .env("CI", "false")
            .env("BASE_URL", base_url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if self.headed {
            cmd.env("HEADED", "1");
        } else {
            cmd.env_remove("HEADED");
        }
        cmd
    }
}

#[async_trait]
impl TestRunner for CommandRunner {
    fn label(&self) -> &str {
        &self.label
    }

    async fn run(&self, test_name: &str, base_url: &str) -> Result<RunOutcome, DashboardError> {
        info!(
            "Running {} test: {} {}",
            self.label,
            self.program,
            self.args_for(test_name).join(" ")
        );

        let child = match self.command(test_name, base_url).spawn() {
            Ok(child) => child,
            Err(e) => {
                error!("Process error ({}): {}", self.program, e);
                return Ok(RunOutcome::launch_failure(&self.label, e.to_string()));
            }
        };
        debug!("Test process started (PID: {:?})", child.id());

        let output = child.wait_with_output().await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        info!(
            "Process exited with status: {} (stdout {} bytes, stderr {} bytes)",
            output.status,
            stdout.len(),
            stderr.len()
        );

        if output.status.success() {
            return Ok(RunOutcome::passed());
        }

        let captured = if stderr.is_empty() { &stdout } else { &stderr };
        Ok(RunOutcome::failed(
            format!("{} test failed", self.label),
            Some(tail_lines(captured, FAILURE_TAIL_LINES)),
        ))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::results::ResultStatus;

    fn sh(script: &str) -> CommandRunner {
        CommandRunner::new("Stub", "sh", ["-c", script], std::env::temp_dir())
    }

    #[tokio::test]
    async fn test_exit_zero_passes_without_error() {
        let outcome = sh("echo running; exit 0")
            .run("Anything", "http://localhost:3000")
            .await
            .unwrap();
        assert_eq!(outcome, RunOutcome::passed());
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn test_failure_keeps_last_ten_stderr_lines() {
        let outcome = sh("for i in $(seq 1 15); do echo \"err $i\" >&2; done; echo out; exit 1")
            .run("Anything", "http://localhost:3000")
            .await
            .unwrap();

        assert_eq!(outcome.status, ResultStatus::Failed);
        assert_eq!(outcome.message, "Stub test failed");
        let expected: Vec<String> = (6..=15).map(|i| format!("err {}", i)).collect();
        assert_eq!(outcome.error.unwrap(), expected.join("\n"));
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_stdout() {
        let outcome = sh("echo first; echo last; exit 2")
            .run("Anything", "http://localhost:3000")
            .await
            .unwrap();
        assert_eq!(outcome.status, ResultStatus::Failed);
        assert_eq!(outcome.error.as_deref(), Some("first\nlast"));
    }

    #[tokio::test]
    async fn test_environment_passed_to_subprocess() {
        let outcome = sh("echo \"$BASE_URL $CI $HEADED\" >&2; exit 1")
            .headed(true)
            .run("Anything", "https://staging.example.com")
            .await
            .unwrap();
        assert_eq!(
            outcome.error.as_deref(),
            Some("https://staging.example.com false 1")
        );
    }

    #[tokio::test]
    async fn test_headless_clears_headed() {
        let outcome = sh("echo \"[${HEADED:-unset}]\" >&2; exit 1")
            .run("Anything", "http://localhost:3000")
            .await
            .unwrap();
        assert_eq!(outcome.error.as_deref(), Some("[unset]"));
    }

    #[tokio::test]
    async fn test_test_name_substituted_into_args() {
        let runner = CommandRunner::new(
            "Stub",
            "sh",
            ["-c", "echo \"$0\" >&2; exit 1", "{test}"],
            std::env::temp_dir(),
        );
        let outcome = runner
            .run("HomepageLoadsDotNet", "http://localhost:3000")
            .await
            .unwrap();
        assert_eq!(outcome.error.as_deref(), Some("HomepageLoadsDotNet"));
    }

    #[tokio::test]
    async fn test_missing_program_is_launch_failure() {
        let runner = CommandRunner::new(
            "C#",
            "definitely-not-a-real-test-tool",
            Vec::<String>::new(),
            std::env::temp_dir(),
        );
        let outcome = runner
            .run("HomepageLoadsDotNet", "http://localhost:3000")
            .await
            .unwrap();
        assert_eq!(outcome.status, ResultStatus::Error);
        assert_eq!(outcome.message, "Failed to run C# test");
        // The launch error's own message, without any wrapper prefix
        let error = outcome.error.unwrap();
        assert!(!error.is_empty());
        assert!(!error.starts_with("Failed to launch"), "got {:?}", error);
    }

    #[test]
    fn test_adapter_command_lines() {
        let dotnet = CommandRunner::dotnet(Path::new("/srv/app"));
        assert_eq!(dotnet.program(), "dotnet");
        assert_eq!(
            dotnet.args_for("HomepageLoadsDotNet"),
            vec!["test", "dotnet-tests", "--filter", "Name=HomepageLoadsDotNet"]
        );
        assert_eq!(dotnet.label(), "C#");

        let pw = CommandRunner::for_kind(RunnerKind::Playwright, Path::new("/srv/app"), true);
        assert_eq!(
            pw.args_for("homepage loads"),
            vec!["playwright", "test", "--project=chromium", "-g", "homepage loads"]
        );
        assert_eq!(pw.label(), "Playwright");
    }
}
