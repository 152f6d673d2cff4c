use reqwest::{Response, StatusCode};
use serde_json::Value;
use tracing::error;

use crate::error::{Result, TagsmithError};

/// Convert a reqwest error into a classified failure. Timeouts and
/// connectivity problems all collapse into `TransportFailure`; the concrete
/// cause is logged here and kept in the detail field.
pub(crate) fn handle_http_error(e: reqwest::Error, provider_name: &str) -> TagsmithError {
    error!(error = %e, "HTTP request to {} failed", provider_name);
    let detail = if e.is_timeout() {
        format!("request to {} timed out", provider_name)
    } else {
        e.to_string()
    };
    TagsmithError::TransportFailure { detail }
}

/// Check the HTTP response status and classify an unsuccessful response.
pub(crate) async fn check_response_status(
    response: Response,
    provider_name: &str,
) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response
        .text()
        .await
        .map_err(|e| handle_http_error(e, provider_name))?;
    error!(
        status = %status,
        error = %error_text,
        "{} API returned error response", provider_name
    );
    Err(classify_api_error(status, &error_text))
}

/// Classify an error response body: a rejected API key becomes
/// `CredentialInvalid`, everything else `TransportFailure`.
pub(crate) fn classify_api_error(status: StatusCode, body: &str) -> TagsmithError {
    if is_credential_rejection(body) {
        return TagsmithError::CredentialInvalid;
    }
    TagsmithError::TransportFailure {
        detail: format!("{}: {}", status, body),
    }
}

/// Detect a key rejection, preferring the structured signal in the Gemini
/// error body over message text. The substring fallback covers proxies and
/// older endpoints that return plain text.
fn is_credential_rejection(body: &str) -> bool {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let error = &value["error"];
        if let Some(details) = error["details"].as_array()
            && details.iter().any(|d| d["reason"] == "API_KEY_INVALID")
        {
            return true;
        }
        if error["status"] == "UNAUTHENTICATED" {
            return true;
        }
        if let Some(message) = error["message"].as_str() {
            return message.contains("API key not valid");
        }
    }

    body.contains("API key not valid")
}
