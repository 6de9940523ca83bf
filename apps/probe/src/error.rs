//! Error types for the CRUD probe

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response (connect, TLS, timeout, body read).
    #[error("transport failure: {0}")]
    TransportFailure(String),

    #[error("expected status code <{expected}> but was <{actual}>")]
    UnexpectedStatus {
        expected: StatusCode,
        actual: StatusCode,
    },

    /// Creation returned the expected status but no usable `_id` in the body.
    #[error("User ID should not be null")]
    MissingIdentifier,

    #[error("configuration error: {0}")]
    Config(String),

    /// The evaluated ledger held at least one failed check.
    #[error("{} assertion(s) failed:\n{}", .0.len(), .0.join("\n"))]
    Assertions(Vec<String>),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::TransportFailure(e.to_string())
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}
