//! Error types for the client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("server returned {code}: {message}")]
    Status { code: u16, message: String },

    /// The request never produced a usable response
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
