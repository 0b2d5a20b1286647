//! adb client for adbscope

use std::process::{ExitStatus, Stdio};

use tokio::process::Command;

use crate::AdbError;

/// Result of a finished adb invocation
#[derive(Clone, Copy, Debug)]
pub struct CommandOutcome {
    status: ExitStatus,
}

impl CommandOutcome {
    /// Whether adb exited with status 0
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Exit code, if the process was not killed by a signal
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }
}

/// adb wrapper bound to a single device target
#[derive(Clone, Debug)]
pub struct AdbClient {
    program: String,
    target: String,
}

impl AdbClient {
    /// Create a client for `target` using the given adb executable
    pub fn new(program: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            target: target.into(),
        }
    }

    /// Device serial or address every command is issued against
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The adb executable
    pub fn program(&self) -> &str {
        &self.program
    }

    /// `adb connect <target>`
    pub async fn connect(&self) -> Result<CommandOutcome, AdbError> {
        let mut command = Command::new(&self.program);
        command.args(["connect", self.target.as_str()]);
        self.run(command, "connect").await
    }

    /// `adb -s <target> root`
    pub async fn root(&self) -> Result<CommandOutcome, AdbError> {
        let mut command = self.device_command();
        command.arg("root");
        self.run(command, "root").await
    }

    /// Connect, then elevate. Failures are logged and otherwise ignored;
    /// adb prints its own diagnostics to the terminal.
    pub async fn prepare_session(&self) {
        let steps: [(&str, Result<CommandOutcome, AdbError>); 2] = [
            ("connect", self.connect().await),
            ("root", self.root().await),
        ];

        for (operation, result) in steps {
            match result {
                Ok(outcome) if outcome.success() => {
                    tracing::debug!(device = %self.target, operation, "adb step succeeded");
                }
                Ok(outcome) => {
                    tracing::warn!(
                        device = %self.target,
                        operation,
                        code = ?outcome.code(),
                        "adb step failed, continuing"
                    );
                }
                Err(e) => {
                    tracing::warn!(operation, error = %e, "adb step could not run, continuing");
                }
            }
        }
    }

    /// Build `adb -s <target> logcat` with stdout piped for line reading.
    ///
    /// The child is killed when its handle is dropped.
    pub fn logcat_command(&self) -> Command {
        let mut command = self.device_command();
        command
            .arg("logcat")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        command
    }

    fn device_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(["-s", self.target.as_str()]);
        command
    }

    async fn run(
        &self,
        mut command: Command,
        operation: &'static str,
    ) -> Result<CommandOutcome, AdbError> {
        let status = command
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|source| AdbError::Spawn {
                program: self.program.clone(),
                operation,
                source,
            })?;

        Ok(CommandOutcome { status })
    }
}
