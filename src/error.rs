use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning styling attributes into a widget.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required {0} drawable")]
    MissingDrawable(&'static str),

    #[error("duration must be at least one second")]
    InvalidDuration,

    #[error("cannot read image {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Errors from the window host.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("pixel surface: {0}")]
    Pixels(#[from] pixels::Error),
}
