//! Error types for the horde API client core.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the job does not exist (or has been cancelled)" from "the server returned
//! an unexpected status." The horde wraps most 4xx failures in a uniform
//! `{"message"}` body, which surfaces as `Api`; any other non-2xx lands in
//! `HttpError` with the raw status code and body for debugging.

use std::fmt;

/// Errors returned by `HordeClient` build and parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404 — the requested job or resource does not exist.
    NotFound,

    /// The server rejected the request with a `{"message"}` error body.
    Api { status: u16, message: String },

    /// The server returned a non-2xx status without a recognizable error body.
    HttpError { status: u16, body: String },

    /// The server returned a 2xx status other than the documented success code.
    UnexpectedStatus { status: u16, expected: u16 },

    /// A model field violated a declared constraint.
    Validation(String),

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::Api { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::UnexpectedStatus { status, expected } => {
                write!(f, "unexpected status {status}, expected {expected}")
            }
            ApiError::Validation(msg) => {
                write!(f, "validation failed: {msg}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
