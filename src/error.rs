//! Error handling for lyrfetch
//!
//! Typed errors for the few ways a lookup can fail. A missing page element,
//! an unmatched search candidate, or an HTTP 404 on a direct lyrics URL are
//! *not* errors: they are the `NotFound` outcome and handled by the chain.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LyrfetchError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} for {url}")]
    Status { status: u16, url: String },
}

/// A failure inside one provider's attempt. The chain logs these and moves
/// on; they only surface to the caller when every attempt failed.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Network(#[from] NetworkError),

    #[error("unexpected page structure: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Config file not readable: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LyrfetchError>;
