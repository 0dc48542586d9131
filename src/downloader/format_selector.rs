// FormatSelector - typed yt-dlp format selection
//
// Each variant renders to a yt-dlp `-f` expression:
// - Video with a height ceiling, merged with the best audio stream
// - Audio only
// Both fall back to the single best combined stream.

use std::fmt;

use serde::Serialize;

use super::models::Resolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormatSelector {
    /// Best video no taller than `max_height`, plus best audio
    VideoWithAudio { max_height: u32 },
    /// Best audio-only stream
    BestAudio,
}

impl FormatSelector {
    pub fn for_resolution(resolution: Resolution) -> Self {
        Self::VideoWithAudio {
            max_height: resolution.height(),
        }
    }

    /// yt-dlp format specification
    pub fn expression(&self) -> String {
        match self {
            Self::VideoWithAudio { max_height } => {
                format!("bestvideo[height<={}]+bestaudio/best", max_height)
            }
            Self::BestAudio => "bestaudio/best".to_string(),
        }
    }

    pub fn is_audio(&self) -> bool {
        matches!(self, Self::BestAudio)
    }
}

impl fmt::Display for FormatSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression())
    }
}
