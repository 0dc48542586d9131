// Error types for the download pipeline

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    /// yt-dlp could not be found or does not answer `--version`
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Output directory could not be created
    #[error("Cannot create output directory {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The engine process could not be started or supervised
    #[error("Execution error: {0}")]
    ExecutionError(String),

    /// The engine exited in a way skip-and-continue does not cover
    #[error("yt-dlp exited with status {code}")]
    EngineFailed { code: i32 },
}

impl DownloadError {
    /// Whether the engine binary itself is unavailable
    pub fn is_tool_missing(&self) -> bool {
        matches!(self, Self::ToolNotFound(_))
    }
}

/// Errors raised while collecting the user's choices.
#[derive(Debug, Error)]
pub enum InputError {
    /// The user closed the input stream or cancelled a prompt
    #[error("input aborted by user")]
    Aborted,

    #[error("failed to read user input: {0}")]
    Io(#[from] std::io::Error),
}
