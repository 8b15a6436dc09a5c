use crate::backend::client::BackendClient;
use crate::backend::models::{ApiError, DownloadParams, DownloadReport};

const FALLBACK_ERROR: &str = "Request failed";

#[derive(Debug)]
pub enum DownloadOutcome {
    Success(DownloadReport),
    /// Local validation failure. Never reaches the network.
    Invalid { error: String },
    ChallengeRequired { error: String },
    RateLimited { error: String },
    Failed { error: String },
}

/// Runs a download. The target username is validated before any request is
/// built; a missing target is a local outcome, not a backend call.
pub async fn run(client: &BackendClient, params: &DownloadParams) -> DownloadOutcome {
    if let Some(invalid) = validate(params) {
        return invalid;
    }

    match client.download(params).await {
        Ok(response) => classify_response(response.ok, &response.body),
        Err(err) => DownloadOutcome::Failed { error: err.message },
    }
}

pub fn validate(params: &DownloadParams) -> Option<DownloadOutcome> {
    if params.target_username.trim().is_empty() {
        return Some(DownloadOutcome::Invalid {
            error: "Target username required".to_string(),
        });
    }
    None
}

/// Maps an HTTP success flag plus response body to a download outcome.
/// Challenge detection is structural (`challenge_required` marker); rate
/// limits are detected from the error text, see [`is_rate_limit_error`].
pub fn classify_response(ok: bool, body: &str) -> DownloadOutcome {
    if ok {
        return match serde_json::from_str::<DownloadReport>(body) {
            Ok(report) => DownloadOutcome::Success(report),
            Err(err) => DownloadOutcome::Failed {
                error: format!("Failed to decode download response: {err}"),
            },
        };
    }

    let err = ApiError::from_body(body);
    let error = err.message_or(FALLBACK_ERROR);
    if err.challenge_required {
        return DownloadOutcome::ChallengeRequired { error };
    }
    if is_rate_limit_error(&error) {
        return DownloadOutcome::RateLimited { error };
    }

    DownloadOutcome::Failed { error }
}

/// Rate-limit classifier over the backend's error text. The backend has no
/// structured code for this, so compatibility hangs on these exact
/// substrings; keep them in sync with what the backend relays from
/// Instagram. Isolated here so a structured code can replace it later.
pub fn is_rate_limit_error(error: &str) -> bool {
    error.contains("Please wait a few minutes") || error.contains("401 Unauthorized")
}
