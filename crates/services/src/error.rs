//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use vdesk_core::model::WorksheetError;

/// Errors from talking to the worksheet backend.
///
/// Transport failures, non-2xx statuses and bodies that do not decode are all
/// the same "request failed" case to callers; the variants only exist for the
/// log line.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("response payload rejected: {0}")]
    InvalidPayload(#[from] vdesk_core::Error),
}

/// Errors while resolving the API configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid API base URL {raw:?}: {reason}")]
    InvalidBaseUrl { raw: String, reason: String },
    #[error("API base URL must use http or https, got {0:?}")]
    UnsupportedScheme(String),
}

/// Errors emitted by `SessionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `TaskService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TaskLoadError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Worksheet(#[from] WorksheetError),
}

/// Errors emitted by `AnswerService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnswerError {
    #[error("no session token available")]
    MissingToken,
    #[error(transparent)]
    Worksheet(#[from] WorksheetError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
