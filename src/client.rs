use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::user::{SubmissionPayload, SubmissionRecord, SubmissionResponse};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server rejected submission: {0}")]
    Status(StatusCode),
}

/// POSTs the form payload to `{base_url}/api/users` and returns the stored
/// record. Non-2xx statuses and transport failures both surface as errors;
/// no timeout is configured, a hanging request simply never resolves.
pub async fn send_submission(
    http: &Client,
    base_url: &str,
    payload: &SubmissionPayload,
) -> Result<SubmissionRecord, ClientError> {
    let response = http
        .post(format!("{base_url}/api/users"))
        .json(payload)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ClientError::Status(response.status()));
    }

    let body: SubmissionResponse = response.json().await?;

    Ok(body.user)
}
