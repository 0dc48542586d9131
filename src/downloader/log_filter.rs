// Terminal sinks for engine output
//
// yt-dlp reports info and debug messages through the same channel; debug
// lines carry a `[debug] ` prefix. Only a short allow-list of notices is
// echoed, warnings and errors always are.

use std::io::{self, Stdout, Write};
use std::sync::Mutex;

use regex::Regex;

use super::models::{ProgressEvent, ProgressStatus};
use super::traits::{EngineLogger, ProgressSink};

/// Categories of engine notices worth showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Extractor resolving the page, e.g. `[youtube] abc: Downloading webpage`
    SiteResolution,
    /// Streams being merged or audio being extracted
    PostProcessing,
    /// `Downloading 1 format(s): 137+140`
    FormatListing,
    /// Intermediate file removed after post-processing
    Cleanup,
    /// `[download] Downloading item 2 of 5` and friends
    DownloadStart,
}

impl Notice {
    pub fn classify(msg: &str) -> Option<Self> {
        lazy_static::lazy_static! {
            static ref SITE_RE: Regex = Regex::new(r"^\[youtube(:tab)?\]").unwrap();
        }

        if SITE_RE.is_match(msg) {
            Some(Self::SiteResolution)
        } else if msg.starts_with("[Merger]") || msg.starts_with("[ExtractAudio]") {
            Some(Self::PostProcessing)
        } else if msg.contains("format(s)") {
            Some(Self::FormatListing)
        } else if msg.contains("Deleting original file") {
            Some(Self::Cleanup)
        } else if msg.starts_with("[download] Downloading") {
            Some(Self::DownloadStart)
        } else {
            None
        }
    }
}

/// Whether a debug-channel message should reach the terminal
pub fn should_surface(msg: &str) -> bool {
    !msg.starts_with("[debug] ") && Notice::classify(msg).is_some()
}

/// Logger that prints high-signal engine lines
pub struct TerminalLogger<W = Stdout> {
    out: Mutex<W>,
}

impl TerminalLogger<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalLogger<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn print(&self, msg: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writeln!(out, "{}", msg);
        let _ = out.flush();
    }
}

impl<W: Write + Send> EngineLogger for TerminalLogger<W> {
    fn debug(&self, msg: &str) {
        if should_surface(msg) {
            self.info(msg);
        } else {
            tracing::trace!(target: "engine", "{}", msg);
        }
    }

    fn info(&self, msg: &str) {
        self.print(msg);
    }

    fn warning(&self, msg: &str) {
        self.print(msg);
    }

    fn error(&self, msg: &str) {
        self.print(msg);
    }
}

/// Progress sink announcing post-processing once an item is downloaded
pub struct TerminalProgress<W = Stdout> {
    out: Mutex<W>,
}

impl TerminalProgress<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalProgress<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> ProgressSink for TerminalProgress<W> {
    fn on_progress(&self, event: &ProgressEvent) {
        if event.status != ProgressStatus::Finished {
            return;
        }

        let title = event
            .info_dict
            .as_ref()
            .map(|info| info.title.as_str())
            .unwrap_or("Unknown");

        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writeln!(
            out,
            "[download] \"{}\" was downloaded, now post-processing...",
            title
        );
        let _ = out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloader::models::ItemInfo;

    fn output(logger: TerminalLogger<Vec<u8>>) -> String {
        String::from_utf8(logger.into_inner()).unwrap()
    }

    #[test]
    fn debug_tagged_lines_are_dropped() {
        let logger = TerminalLogger::new(Vec::new());
        logger.debug("[debug] Command-line config: ['-f', 'best']");
        logger.debug("[debug] yt-dlp version stable@2024.08.06");
        assert_eq!(output(logger), "");
    }

    #[test]
    fn unlisted_lines_are_dropped() {
        let logger = TerminalLogger::new(Vec::new());
        logger.debug("[info] abc: Writing video thumbnail");
        logger.debug("[download]  42.0% of 10.00MiB at 1.00MiB/s ETA 00:06");
        logger.debug("[download] Destination: /out/Song.webm");
        assert_eq!(output(logger), "");
    }

    #[test]
    fn format_listing_is_shown() {
        let logger = TerminalLogger::new(Vec::new());
        logger.debug("[info] dQw4w9WgXcQ: Downloading 1 format(s): 137+140");
        assert_eq!(
            output(logger),
            "[info] dQw4w9WgXcQ: Downloading 1 format(s): 137+140\n"
        );
    }

    #[test]
    fn allow_list_categories() {
        assert_eq!(
            Notice::classify("[youtube] abc: Downloading webpage"),
            Some(Notice::SiteResolution)
        );
        assert_eq!(
            Notice::classify("[youtube:tab] Extracting URL"),
            Some(Notice::SiteResolution)
        );
        assert_eq!(
            Notice::classify("[Merger] Merging formats into \"/out/x.mkv\""),
            Some(Notice::PostProcessing)
        );
        assert_eq!(
            Notice::classify("[ExtractAudio] Destination: /out/Song X.mp3"),
            Some(Notice::PostProcessing)
        );
        assert_eq!(
            Notice::classify("Deleting original file /out/x.f137.mp4 (pass -k to keep)"),
            Some(Notice::Cleanup)
        );
        assert_eq!(
            Notice::classify("[download] Downloading item 1 of 3"),
            Some(Notice::DownloadStart)
        );
        assert_eq!(Notice::classify("[youtubeX] nope"), None);
    }

    #[test]
    fn audio_extraction_is_shown() {
        let logger = TerminalLogger::new(Vec::new());
        logger.debug("[ExtractAudio] Destination: /out/Song X.mp3");
        logger.debug("[ExtractAudio] Not converting audio /out/a.mp3; already in target format");
        assert_eq!(output(logger).lines().count(), 2);
    }

    #[test]
    fn warnings_and_errors_always_print() {
        let logger = TerminalLogger::new(Vec::new());
        logger.warning("WARNING: [youtube] abc: nsig extraction failed");
        logger.error("ERROR: [youtube] xyz: Video unavailable");
        let text = output(logger);
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("Video unavailable"));
    }

    #[test]
    fn finished_event_prints_one_line_with_title() {
        let progress = TerminalProgress::new(Vec::new());
        progress.on_progress(&ProgressEvent {
            status: ProgressStatus::Finished,
            info_dict: Some(ItemInfo {
                title: "Song X".to_string(),
            }),
        });

        let text = String::from_utf8(progress.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("Song X"));
        assert!(text.contains("post-processing"));
    }

    #[test]
    fn in_progress_events_are_silent() {
        let progress = TerminalProgress::new(Vec::new());
        progress.on_progress(&ProgressEvent {
            status: ProgressStatus::Downloading,
            info_dict: Some(ItemInfo {
                title: "Song X".to_string(),
            }),
        });
        assert!(progress.into_inner().is_empty());
    }
}
