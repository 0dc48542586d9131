// yt-dlp command-line backend
//
// Translates an EngineConfig into yt-dlp flags, runs it once for the whole
// link list and routes its output:
// - marker-prefixed JSON lines -> progress sink
// - stderr: `WARNING:` -> warning, `[debug] ` -> debug, anything else -> error
// - stdout -> debug (the logger filters it)

use async_trait::async_trait;

use crate::downloader::errors::DownloadError;
use crate::downloader::models::{EngineConfig, ErrorPolicy, MediaLink, PostProcessor, ProgressEvent};
use crate::downloader::traits::{DownloadEngine, Sinks};
use crate::downloader::utils::{find_binary, query_version, stream_lines, Stream};

/// Prefix of the lines rendered by our progress template
pub const PROGRESS_MARKER: &str = "[progress-event] ";

/// Seconds to wait for `yt-dlp --version`
const VERSION_TIMEOUT_SECS: u64 = 15;

/// yt-dlp exits with 1 when some downloads failed under `--ignore-errors`
const PARTIAL_FAILURE_EXIT_CODE: i32 = 1;

/// One classified line of engine output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineLine {
    Progress(ProgressEvent),
    Debug(String),
    Warning(String),
    Error(String),
}

/// Classify a raw output line from yt-dlp.
pub fn route_line(stream: Stream, line: &str) -> EngineLine {
    if let Some(payload) = line.strip_prefix(PROGRESS_MARKER) {
        match serde_json::from_str::<ProgressEvent>(payload) {
            Ok(event) => return EngineLine::Progress(event),
            Err(e) => tracing::debug!("undecodable progress line ({}): {}", e, payload),
        }
    }

    let line = line.to_string();
    match stream {
        Stream::Stdout => EngineLine::Debug(line),
        Stream::Stderr if line.starts_with("WARNING:") => EngineLine::Warning(line),
        Stream::Stderr if line.starts_with("[debug] ") || line.trim().is_empty() => {
            EngineLine::Debug(line)
        }
        // Usage errors and tracebacks come without an `ERROR:` prefix
        Stream::Stderr => EngineLine::Error(line),
    }
}

fn progress_template() -> String {
    format!(
        "download:{}{{\"status\":%(progress.status)j,\"info_dict\":{{\"title\":%(info.title)j}}}}",
        PROGRESS_MARKER
    )
}

/// Build yt-dlp arguments for a config and link list.
pub fn build_args(config: &EngineConfig, links: &[MediaLink]) -> Vec<String> {
    let mut args = vec![
        "-f".to_string(),
        config.format.expression(),
        "-o".to_string(),
        config.output_template.clone(),
        "--newline".to_string(),
        "--progress-template".to_string(),
        progress_template(),
    ];

    match config.error_policy {
        ErrorPolicy::SkipAndContinue => args.push("--ignore-errors".to_string()),
        ErrorPolicy::Abort => args.push("--abort-on-error".to_string()),
    }

    for processor in &config.post_processors {
        match processor {
            PostProcessor::ExtractAudio {
                codec,
                bitrate_kbps,
            } => {
                args.extend(vec![
                    "-x".to_string(),
                    "--audio-format".to_string(),
                    codec.as_str().to_string(),
                    "--audio-quality".to_string(),
                    format!("{}K", bitrate_kbps),
                ]);
            }
        }
    }

    // Links never start with '-', but keep them out of option parsing anyway
    args.push("--".to_string());
    args.extend(links.iter().map(|link| link.as_str().to_string()));
    args
}

/// Backend running the native `yt-dlp` binary
pub struct YtDlpCli {
    ytdlp_path: String,
}

impl YtDlpCli {
    pub fn new() -> Self {
        Self {
            ytdlp_path: find_binary("yt-dlp"),
        }
    }

    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            ytdlp_path: path.into(),
        }
    }
}

impl Default for YtDlpCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DownloadEngine for YtDlpCli {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn download(
        &self,
        config: &EngineConfig,
        links: &[MediaLink],
        sinks: Sinks<'_>,
    ) -> Result<(), DownloadError> {
        let version = query_version(&self.ytdlp_path, VERSION_TIMEOUT_SECS)
            .await
            .map_err(DownloadError::ToolNotFound)?;
        tracing::info!("using {} {} at {}", self.name(), version, self.ytdlp_path);

        let args = build_args(config, links);
        tracing::debug!("{} {}", self.ytdlp_path, args.join(" "));

        let status = stream_lines(&self.ytdlp_path, &args, |stream, line| {
            match route_line(stream, line) {
                EngineLine::Progress(event) => sinks.progress.on_progress(&event),
                EngineLine::Debug(msg) => sinks.logger.debug(&msg),
                EngineLine::Warning(msg) => sinks.logger.warning(&msg),
                EngineLine::Error(msg) => sinks.logger.error(&msg),
            }
        })
        .await
        .map_err(DownloadError::ExecutionError)?;

        match status.code() {
            Some(0) => Ok(()),
            Some(PARTIAL_FAILURE_EXIT_CODE)
                if config.error_policy == ErrorPolicy::SkipAndContinue =>
            {
                tracing::warn!("some links could not be downloaded; continuing");
                Ok(())
            }
            Some(code) => Err(DownloadError::EngineFailed { code }),
            None => Err(DownloadError::ExecutionError(format!(
                "{} was terminated by a signal",
                self.ytdlp_path
            ))),
        }
    }
}
