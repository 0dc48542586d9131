//! Session settings.

use std::path::{Path, PathBuf};

/// Folder created under the platform downloads directory
const APP_DIR_NAME: &str = "yt-batch";

/// Settings threaded through the translator and the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root directory for every file the engine writes
    pub output_dir: PathBuf,
}

impl Settings {
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: dirs::download_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR_NAME),
        }
    }
}
