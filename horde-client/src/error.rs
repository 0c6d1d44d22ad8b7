//! Error type for the transport clients.

use horde_core::ApiError;
use thiserror::Error;

/// Errors surfaced by the blocking and async clients.
///
/// `Api` means the server answered and the core rejected the response (bad
/// status, validation failure, undecodable body). The transport variants mean
/// the round-trip itself failed — DNS, connect, timeout — and no response was
/// available to interpret.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("http transport failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("http transport failed: {0}")]
    BlockingHttp(#[from] ureq::Error),
}
