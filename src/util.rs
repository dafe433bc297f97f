use std::process::{ExitStatus, Stdio};

use tokio::process::Command;

/// Hands a command string to the host shell and waits for it to exit.
/// The child inherits stdin/stdout/stderr; only the exit status is
/// inspected.
pub async fn run_shell_command(command: &str) -> std::io::Result<ExitStatus> {
    let mut cmd = if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", command]);
        c
    } else {
        let mut c = Command::new("sh");
        c.args(["-c", command]);
        c
    };

    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let mut child = cmd.spawn()?;
    child.wait().await
}
