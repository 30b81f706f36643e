use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum BarError {
    #[error("config error: {0}")]
    Config(String),

    #[error("IPC error: {0}")]
    Ipc(String),

    #[error("MPD error: {0}")]
    Mpd(String),

    #[error("system error: {0}")]
    System(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("action error: {0}")]
    Action(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = BarError> = std::result::Result<T, E>;
