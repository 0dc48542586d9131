// Download engine backends

pub mod ytdlp;

pub use ytdlp::YtDlpCli;
