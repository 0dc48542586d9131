// Engine and sink trait definitions

use async_trait::async_trait;

use super::errors::DownloadError;
use super::models::{EngineConfig, MediaLink, ProgressEvent};

/// Receives the engine's free-form log lines at four severities
pub trait EngineLogger: Send + Sync {
    fn debug(&self, msg: &str);
    fn info(&self, msg: &str);
    fn warning(&self, msg: &str);
    fn error(&self, msg: &str);
}

/// Receives structured progress events
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);
}

/// Sinks handed to the engine for one run
#[derive(Clone, Copy)]
pub struct Sinks<'a> {
    pub logger: &'a dyn EngineLogger,
    pub progress: &'a dyn ProgressSink,
}

/// External download/extraction engine
#[async_trait]
pub trait DownloadEngine: Send + Sync {
    /// Name of the engine (for logging)
    fn name(&self) -> &'static str;

    /// Attempt every link once, reporting through `sinks`.
    ///
    /// A per-link failure under skip-and-continue is not an error here;
    /// only failures to run the engine at all are returned.
    async fn download(
        &self,
        config: &EngineConfig,
        links: &[MediaLink],
        sinks: Sinks<'_>,
    ) -> Result<(), DownloadError>;
}
