pub mod banner;
pub mod config;
pub mod downloader;
pub mod input;
pub mod logging;

use thiserror::Error;

use config::Settings;
use downloader::{translate, DownloadError, Downloader, InputError, UserIntent};
use input::Prompter;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Download(#[from] DownloadError),
}

/// One interactive session: collect, translate, download.
///
/// Returns the collected intent so callers can report on it.
pub async fn run_session(
    prompter: &mut dyn Prompter,
    settings: &Settings,
    downloader: &Downloader,
) -> Result<UserIntent, SessionError> {
    let intent = input::collect(prompter)?;
    tracing::info!(
        "collected {:?} request with {} link(s)",
        intent.kind(),
        intent.links.len()
    );

    let config = translate(&intent, settings);
    downloader.run(&config, &intent.links).await?;

    Ok(intent)
}
