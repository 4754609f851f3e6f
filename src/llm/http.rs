//! HTTP plumbing shared by the provider clients.

use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::LlmError;

/// Build a `reqwest` client with the configured timeouts.
pub(crate) fn client(timeouts: LlmTimeouts) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeouts.request_secs))
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .build()
        .map_err(|e| LlmError::HttpClientBuild(e.to_string()))
}

/// Send a prepared POST and return the body of a 2xx reply.
///
/// Transport failures map to [`LlmError::ApiRequest`]; any other status keeps
/// its body in [`LlmError::ApiResponse`] for logging.
pub(crate) async fn send(request: reqwest::RequestBuilder) -> Result<String, LlmError> {
    let response = request.send().await.map_err(|e| LlmError::ApiRequest(e.to_string()))?;
    let status = response.status();
    let body = response.text().await.map_err(|e| LlmError::ApiRequest(e.to_string()))?;
    if !status.is_success() {
        return Err(LlmError::ApiResponse { status: status.as_u16(), body });
    }
    Ok(body)
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
