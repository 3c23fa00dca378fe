//! Remote command channel
//!
//! Every remote action goes through a fresh `ssh` subprocess to the one
//! configured target host. No pooling, no retries: this tool is
//! operator-invoked, and a new session per command keeps failure modes
//! obvious.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::config::ConsoleConfig;
use crate::errors::ConsoleError;

/// ssh(1) reserves this exit code for its own failures (unreachable
/// host, rejected key). Anything else means the remote command ran.
const SSH_TRANSPORT_EXIT: i32 = 255;

/// Outcome of one remote command that actually executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Whether the command ran but produced nothing usable.
    pub fn is_blank(&self) -> bool {
        self.stdout.trim().is_empty()
    }
}

/// Executes command text on the managed host.
///
/// Workflows depend on this trait so tests can substitute a scripted
/// channel; interactive attach and file transfer stay on the concrete
/// [`SshChannel`].
#[async_trait]
pub trait RemoteChannel: Send + Sync {
    /// Run `command` on the host and capture its output.
    ///
    /// A transport failure (host unreachable, authentication rejected)
    /// is a `ConsoleError::Transport`; a command that ran and failed
    /// comes back as a `CommandOutput` with a non-zero exit code.
    async fn execute(&self, command: &str) -> Result<CommandOutput, ConsoleError>;
}

/// SSH-backed channel to the configured target host.
#[derive(Debug, Clone)]
pub struct SshChannel {
    host: String,
    user: String,
    identity_file: String,
}

impl SshChannel {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            host: config.host.clone(),
            user: config.user.clone(),
            identity_file: expand_home(&config.identity_file),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn target(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    fn base_args(&self) -> Vec<String> {
        vec![
            "-i".to_string(),
            self.identity_file.clone(),
            "-o".to_string(),
            "BatchMode=yes".to_string(),
            "-o".to_string(),
            "ConnectTimeout=10".to_string(),
        ]
    }

    /// Attach an interactive session (TTY allocated, stdio inherited)
    /// and block until the operator exits. Returns the remote exit code.
    pub async fn interactive(&self, command: &str) -> Result<i32, ConsoleError> {
        debug!("Attaching interactive session: {}", command);

        let status = Command::new("ssh")
            .arg("-i")
            .arg(&self.identity_file)
            .arg("-t")
            .arg(self.target())
            .arg(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| ConsoleError::Transport(format!("failed to run ssh: {}", e)))?;

        let code = status.code().unwrap_or(-1);
        if code == SSH_TRANSPORT_EXIT {
            return Err(ConsoleError::Transport(format!(
                "ssh session to {} failed",
                self.target()
            )));
        }
        Ok(code)
    }

    /// Copy a local file to `remote_dir` on the host via scp.
    pub async fn copy_to(&self, local: &Path, remote_dir: &str) -> Result<(), ConsoleError> {
        debug!("Copying {} to {}:{}", local.display(), self.host, remote_dir);

        let output = Command::new("scp")
            .args(self.base_args())
            .arg(local)
            .arg(format!("{}:{}/", self.target(), remote_dir))
            .output()
            .await
            .map_err(|e| ConsoleError::Transport(format!("failed to run scp: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConsoleError::Transport(format!(
                "scp to {} failed: {}",
                self.target(),
                stderr.trim()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteChannel for SshChannel {
    async fn execute(&self, command: &str) -> Result<CommandOutput, ConsoleError> {
        debug!("Executing on {}: {}", self.target(), command);

        let output = Command::new("ssh")
            .args(self.base_args())
            .arg(self.target())
            .arg(command)
            .output()
            .await
            .map_err(|e| ConsoleError::Transport(format!("failed to run ssh: {}", e)))?;

        classify_output(
            output.status.code(),
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
            &self.target(),
        )
    }
}

/// Separate "transport failed" from "command ran". Downstream checks
/// treat empty stdout as "feature absent", which is only valid when the
/// command genuinely executed.
fn classify_output(
    code: Option<i32>,
    stdout: String,
    stderr: String,
    target: &str,
) -> Result<CommandOutput, ConsoleError> {
    match code {
        Some(SSH_TRANSPORT_EXIT) => Err(ConsoleError::Transport(format!(
            "ssh to {} failed: {}",
            target,
            stderr.trim()
        ))),
        Some(exit_code) => Ok(CommandOutput {
            stdout,
            stderr,
            exit_code,
        }),
        // Killed by a signal before exiting
        None => Err(ConsoleError::Transport(format!(
            "ssh to {} terminated by signal",
            target
        ))),
    }
}

/// Expand a leading `~` since the path is passed to ssh without a shell.
fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return format!("{}/{}", home, rest);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_transport_failure() {
        let result = classify_output(
            Some(255),
            String::new(),
            "Connection refused".to_string(),
            "ubuntu@10.0.0.5",
        );
        assert!(matches!(result, Err(ConsoleError::Transport(_))));
    }

    #[test]
    fn test_classify_command_failure_is_not_transport() {
        let result = classify_output(
            Some(1),
            String::new(),
            "no such container".to_string(),
            "ubuntu@10.0.0.5",
        )
        .unwrap();
        assert!(!result.success());
        assert!(result.is_blank());
    }

    #[test]
    fn test_classify_success() {
        let result = classify_output(Some(0), "ok\n".to_string(), String::new(), "ubuntu@h")
            .unwrap();
        assert!(result.success());
        assert_eq!(result.stdout, "ok\n");
    }

    #[test]
    fn test_classify_signal_is_transport() {
        let result = classify_output(None, String::new(), String::new(), "ubuntu@h");
        assert!(matches!(result, Err(ConsoleError::Transport(_))));
    }
}
