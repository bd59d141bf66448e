//! Shared HTTP plumbing for remote adapters.

use lumiere_error::{StorageError, StorageErrorKind};
use reqwest::{Client, Response};
use std::time::Duration;

const USER_AGENT: &str = concat!("lumiere/", env!("CARGO_PKG_VERSION"));

pub(crate) fn client(timeout: Duration) -> Result<Client, StorageError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| {
            StorageError::new(StorageErrorKind::Unavailable(format!(
                "Failed to build HTTP client: {}",
                e
            )))
        })
}

pub(crate) fn transport(e: reqwest::Error) -> StorageError {
    tracing::error!(error = ?e, "Storage request failed");
    StorageError::new(StorageErrorKind::Unavailable(format!(
        "Request failed: {}",
        e
    )))
}

/// Pass 2xx responses through, turning anything else into an HTTP error.
pub(crate) async fn check(response: Response) -> Result<Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::error!(status = %status, body = %body, "Storage backend returned error");
    Err(StorageError::new(StorageErrorKind::Http {
        status: status.as_u16(),
        message: body,
    }))
}

pub(crate) async fn json<T: serde::de::DeserializeOwned>(
    response: Response,
) -> Result<T, StorageError> {
    response.json().await.map_err(|e| {
        StorageError::new(StorageErrorKind::Serialization(format!(
            "Failed to parse response: {}",
            e
        )))
    })
}
