// Common data models for the download pipeline

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::{Host, Url};

use super::format_selector::FormatSelector;

/// Type of content the user wants to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Video,
    Audio,
}

impl ContentKind {
    /// Prompt order
    pub const ALL: [ContentKind; 2] = [ContentKind::Video, ContentKind::Audio];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Video => "Video",
            Self::Audio => "Audio",
        }
    }
}

/// Standard video heights, highest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Resolution {
    P2160,
    P1440,
    P1080,
    P720,
    P480,
    P360,
    P240,
    P144,
}

impl Resolution {
    pub const ALL: [Resolution; 8] = [
        Resolution::P2160,
        Resolution::P1440,
        Resolution::P1080,
        Resolution::P720,
        Resolution::P480,
        Resolution::P360,
        Resolution::P240,
        Resolution::P144,
    ];

    /// Height in pixels
    pub fn height(&self) -> u32 {
        match self {
            Self::P2160 => 2160,
            Self::P1440 => 1440,
            Self::P1080 => 1080,
            Self::P720 => 720,
            Self::P480 => 480,
            Self::P360 => 360,
            Self::P240 => 240,
            Self::P144 => 144,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::P2160 => "2160p",
            Self::P1440 => "1440p",
            Self::P1080 => "1080p",
            Self::P720 => "720p",
            Self::P480 => "480p",
            Self::P360 => "360p",
            Self::P240 => "240p",
            Self::P144 => "144p",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What to fetch. A resolution exists only for video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaRequest {
    Video(Resolution),
    Audio,
}

impl MediaRequest {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Video(_) => ContentKind::Video,
            Self::Audio => ContentKind::Audio,
        }
    }

    pub fn resolution(&self) -> Option<Resolution> {
        match self {
            Self::Video(res) => Some(*res),
            Self::Audio => None,
        }
    }
}

/// A link that passed URL syntax validation. Keeps the text exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLink(String);

/// Schemes yt-dlp can fetch from directly
const ACCEPTED_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

impl MediaLink {
    pub fn parse(input: &str) -> Option<Self> {
        let url = Url::parse(input).ok()?;
        if !ACCEPTED_SCHEMES.contains(&url.scheme()) {
            return None;
        }

        let host_ok = match url.host()? {
            Host::Domain(domain) => {
                domain == "localhost"
                    || (domain.contains('.')
                        && domain.split('.').all(|label| !label.is_empty()))
            }
            Host::Ipv4(_) | Host::Ipv6(_) => true,
        };

        host_ok.then(|| Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the user chose during one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIntent {
    pub request: MediaRequest,
    pub links: Vec<MediaLink>,
}

impl UserIntent {
    pub fn kind(&self) -> ContentKind {
        self.request.kind()
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.request.resolution()
    }
}

/// Lossy codecs the audio extractor can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodec {
    Mp3,
}

impl AudioCodec {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
        }
    }
}

/// Transformation applied after a download finishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PostProcessor {
    /// Convert the downloaded stream to an audio file
    ExtractAudio { codec: AudioCodec, bitrate_kbps: u32 },
}

/// What the engine does when a single link fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ErrorPolicy {
    #[default]
    SkipAndContinue,
    Abort,
}

/// Engine configuration derived from a [`UserIntent`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineConfig {
    /// Directory the output template is rooted at
    pub output_dir: PathBuf,
    /// yt-dlp output template, e.g. `/out/%(title)s.%(ext)s`
    pub output_template: String,
    pub format: FormatSelector,
    pub post_processors: Vec<PostProcessor>,
    pub error_policy: ErrorPolicy,
}

/// Lifecycle phase reported by the engine for one item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Downloading,
    Finished,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemInfo {
    pub title: String,
}

/// Structured progress event emitted by the engine
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProgressEvent {
    pub status: ProgressStatus,
    #[serde(default)]
    pub info_dict: Option<ItemInfo>,
}
