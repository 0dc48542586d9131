// Helper functions for driving external tools

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::sync::mpsc;
use tokio::time::timeout;

/// Which pipe a line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Locate a tool binary: well-known install dirs first, then `PATH`.
pub fn find_binary(name: &str) -> String {
    let common_dirs = [
        "/opt/homebrew/bin", // Homebrew on Apple Silicon
        "/usr/local/bin",    // Homebrew on Intel Mac
        "/usr/bin",          // System installation
    ];

    for dir in common_dirs {
        let candidate = Path::new(dir).join(name);
        if candidate.exists() {
            return candidate.to_string_lossy().into_owned();
        }
    }

    if let Ok(output) = std::process::Command::new("which").arg(name).output() {
        if output.status.success() {
            let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !path.is_empty() {
                return path;
            }
        }
    }

    // Last resort: let the OS resolve it
    name.to_string()
}

/// Run `program --version`, returning the trimmed version string.
pub async fn query_version(program: &str, timeout_secs: u64) -> Result<String, String> {
    let mut cmd = TokioCommand::new(program);
    cmd.arg("--version").stdin(Stdio::null()).kill_on_drop(true);

    let output = timeout(Duration::from_secs(timeout_secs), cmd.output())
        .await
        .map_err(|_| format!("{} --version timed out after {}s", program, timeout_secs))?
        .map_err(|e| format!("Failed to start {}: {}", program, e))?;

    if !output.status.success() {
        return Err(format!("{} --version exited with {}", program, output.status));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

async fn forward_lines<R>(pipe: R, stream: Stream, tx: mpsc::UnboundedSender<(Stream, String)>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(pipe).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if tx.send((stream, line)).is_err() {
            break;
        }
    }
}

/// Spawn `program` and hand every stdout/stderr line to `on_line` as it arrives.
///
/// Lines from one pipe keep their order; the two pipes interleave in arrival order.
pub async fn stream_lines<F>(
    program: &str,
    args: &[String],
    mut on_line: F,
) -> Result<ExitStatus, String>
where
    F: FnMut(Stream, &str),
{
    let mut child = TokioCommand::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| format!("Failed to start {}: {}", program, e))?;

    let stdout_pipe = child
        .stdout
        .take()
        .ok_or_else(|| format!("Failed to capture stdout from {}", program))?;
    let stderr_pipe = child
        .stderr
        .take()
        .ok_or_else(|| format!("Failed to capture stderr from {}", program))?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let stdout_task = tokio::spawn(forward_lines(stdout_pipe, Stream::Stdout, tx.clone()));
    let stderr_task = tokio::spawn(forward_lines(stderr_pipe, Stream::Stderr, tx));

    // Closes once both readers hit EOF
    while let Some((stream, line)) = rx.recv().await {
        on_line(stream, &line);
    }

    let _ = stdout_task.await;
    let _ = stderr_task.await;

    child
        .wait()
        .await
        .map_err(|e| format!("Failed to wait for {}: {}", program, e))
}
