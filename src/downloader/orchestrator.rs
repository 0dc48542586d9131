// Orchestrator: prepares the output directory and drives the engine once

use std::path::Path;

use super::errors::DownloadError;
use super::models::{EngineConfig, MediaLink};
use super::traits::{DownloadEngine, EngineLogger, ProgressSink, Sinks};

/// Create `dir` and its parents. Succeeds if it already exists.
pub async fn ensure_output_dir(dir: &Path) -> Result<(), DownloadError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| DownloadError::Filesystem {
            path: dir.to_path_buf(),
            source,
        })
}

pub struct Downloader {
    engine: Box<dyn DownloadEngine>,
    logger: Box<dyn EngineLogger>,
    progress: Box<dyn ProgressSink>,
}

impl Downloader {
    pub fn new(
        engine: Box<dyn DownloadEngine>,
        logger: Box<dyn EngineLogger>,
        progress: Box<dyn ProgressSink>,
    ) -> Self {
        Self {
            engine,
            logger,
            progress,
        }
    }

    /// Download every link with `config`. Blocks until the engine has tried them all.
    pub async fn run(
        &self,
        config: &EngineConfig,
        links: &[MediaLink],
    ) -> Result<(), DownloadError> {
        ensure_output_dir(&config.output_dir).await?;

        if links.is_empty() {
            tracing::info!("no links collected, nothing to download");
            return Ok(());
        }

        tracing::info!(
            "[Downloader] {} link(s) via {} into {}",
            links.len(),
            self.engine.name(),
            config.output_dir.display()
        );

        let sinks = Sinks {
            logger: self.logger.as_ref(),
            progress: self.progress.as_ref(),
        };

        match self.engine.download(config, links, sinks).await {
            Ok(()) => {
                tracing::info!("[Downloader] ✓ {} finished", self.engine.name());
                Ok(())
            }
            Err(e) => {
                tracing::error!("[Downloader] ✗ {} failed: {}", self.engine.name(), e);
                Err(e)
            }
        }
    }
}
