use std::path::Path;
use std::process::Command;

use crate::error::PublishError;

/// Run `command` through the platform shell with inherited stdio, blocking
/// until it exits. Any non-zero exit is an error.
pub fn run_shell(command: &str, cwd: Option<&Path>) -> Result<(), PublishError> {
    let mut cmd = shell(command);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    tracing::debug!(command, cwd = ?cwd, "spawning");
    let status = cmd.status().map_err(|e| PublishError::CommandFailed {
        command: command.to_string(),
        reason: format!("could not spawn shell: {e}"),
    })?;

    if !status.success() {
        return Err(PublishError::CommandFailed {
            command: command.to_string(),
            reason: match status.code() {
                Some(code) => format!("exited with status {code}"),
                None => "terminated by signal".to_string(),
            },
        });
    }
    Ok(())
}

#[cfg(unix)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
