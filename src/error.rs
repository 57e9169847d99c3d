// Crate error type. Every variant states *where* things went wrong.
// Per-frame paths never produce these: a missing image or a bogus resize is
// skipped quietly and retried on the next frame.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Creating the window failed
    #[error("window init error: {0}")]
    WindowInit(String),

    /// Updating the window buffer failed
    #[error("window update error: {0}")]
    WindowUpdate(String),

    /// Opening/decoding the background photo failed
    #[error("failed to load background image '{}': {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The decode thread went away without reporting back
    #[error("background loader error: {0}")]
    Loader(String),

    /// A tunable is outside the range the engine can work with
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Reading/writing the session marker failed
    #[error("session marker error: {0}")]
    Session(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
