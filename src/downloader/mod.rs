// Downloader module - translation, orchestration and engine backends

pub mod backends;
pub mod errors;
pub mod format_selector;
pub mod log_filter;
pub mod models;
pub mod options;
pub mod orchestrator;
pub mod traits;
pub mod utils;

pub use backends::YtDlpCli;
pub use errors::{DownloadError, InputError};
pub use format_selector::FormatSelector;
pub use log_filter::{TerminalLogger, TerminalProgress};
pub use models::{
    ContentKind, EngineConfig, ErrorPolicy, MediaLink, MediaRequest, PostProcessor, ProgressEvent,
    ProgressStatus, Resolution, UserIntent,
};
pub use options::translate;
pub use orchestrator::Downloader;
pub use traits::{DownloadEngine, EngineLogger, ProgressSink, Sinks};
