// Option translation: UserIntent -> EngineConfig

use std::path::Path;

use crate::config::Settings;

use super::format_selector::FormatSelector;
use super::models::{
    AudioCodec, EngineConfig, ErrorPolicy, MediaRequest, PostProcessor, UserIntent,
};

/// Files are named after the media title
pub const OUTPUT_NAME_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Target bitrate for extracted audio
pub const AUDIO_BITRATE_KBPS: u32 = 192;

/// Derive the engine configuration for a session. Pure: no I/O.
pub fn translate(intent: &UserIntent, settings: &Settings) -> EngineConfig {
    let (format, post_processors) = match intent.request {
        MediaRequest::Video(resolution) => {
            (FormatSelector::for_resolution(resolution), Vec::new())
        }
        MediaRequest::Audio => (
            FormatSelector::BestAudio,
            vec![PostProcessor::ExtractAudio {
                codec: AudioCodec::Mp3,
                bitrate_kbps: AUDIO_BITRATE_KBPS,
            }],
        ),
    };

    EngineConfig {
        output_dir: settings.output_dir.clone(),
        output_template: output_template(&settings.output_dir),
        format,
        post_processors,
        error_policy: ErrorPolicy::SkipAndContinue,
    }
}

/// Full `-o` value for `dir`. yt-dlp expands `%` sequences in the whole
/// template, so the directory part has its `%` doubled.
fn output_template(dir: &Path) -> String {
    let escaped = dir.to_string_lossy().replace('%', "%%");
    Path::new(&escaped)
        .join(OUTPUT_NAME_TEMPLATE)
        .to_string_lossy()
        .into_owned()
}
