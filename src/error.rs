use thiserror::Error;

/// Error type for the record/playback core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid sample layout: {0}")]
    InvalidLayout(String),

    #[error("store write failed: {0}")]
    StoreWrite(String),

    #[error("store read failed: {0}")]
    StoreRead(String),

    #[error("store mode transition failed: {0}")]
    StoreTransition(String),

    #[error("store operation '{op}' called in {mode} mode")]
    InvalidStoreState { op: &'static str, mode: &'static str },
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
