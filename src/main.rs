use anyhow::Context;

use yt_batch_lib::config::Settings;
use yt_batch_lib::downloader::{Downloader, TerminalLogger, TerminalProgress, YtDlpCli};
use yt_batch_lib::input::LinePrompter;
use yt_batch_lib::{banner, logging, run_session, SessionError};

#[tokio::main]
async fn main() {
    logging::init_logging();

    if let Err(err) = run().await {
        eprintln!("yt-batch error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    banner::print_banner(&mut std::io::stdout()).context("failed to write to terminal")?;

    let settings = Settings::default();
    let downloader = Downloader::new(
        Box::new(YtDlpCli::new()),
        Box::new(TerminalLogger::stdout()),
        Box::new(TerminalProgress::stdout()),
    );
    let mut prompter = LinePrompter::stdio();

    match run_session(&mut prompter, &settings, &downloader).await {
        Ok(_) => Ok(()),
        Err(SessionError::Download(e)) if e.is_tool_missing() => {
            Err(e).context("yt-dlp is required; install it and make sure it is on PATH")
        }
        Err(e) => Err(e.into()),
    }
}
