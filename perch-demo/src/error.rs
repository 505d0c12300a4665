use std::io;

use perchdom::PlatformError;
use thiserror::Error;

/// Errors that end the demo.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("could not determine a cache directory for logs")]
    NoCacheDir,

    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}
