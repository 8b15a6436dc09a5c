use crate::backend::client::BackendClient;
use crate::backend::models::{ApiError, MessageResponse};

const FALLBACK_ERROR: &str = "Logout failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    Success { message: String },
    Failed { error: String },
}

/// Ends the backend session. Saved accounts are deliberately untouched:
/// logging out never forgets credentials.
pub async fn run(client: &BackendClient) -> LogoutOutcome {
    match client.logout().await {
        Ok(response) => classify_response(response.ok, &response.body),
        Err(err) => LogoutOutcome::Failed { error: err.message },
    }
}

pub fn classify_response(ok: bool, body: &str) -> LogoutOutcome {
    if ok {
        return match serde_json::from_str::<MessageResponse>(body) {
            Ok(decoded) => LogoutOutcome::Success {
                message: decoded.message,
            },
            Err(err) => LogoutOutcome::Failed {
                error: format!("Failed to decode logout response: {err}"),
            },
        };
    }

    LogoutOutcome::Failed {
        error: ApiError::from_body(body).message_or(FALLBACK_ERROR),
    }
}

pub fn render(outcome: &LogoutOutcome) -> String {
    match outcome {
        LogoutOutcome::Success { message } => message.clone(),
        LogoutOutcome::Failed { error } => format!("Error: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_yields_message() {
        let outcome = classify_response(true, r#"{"message":"Logged out"}"#);
        assert_eq!(
            outcome,
            LogoutOutcome::Success {
                message: "Logged out".to_string()
            }
        );
    }

    #[test]
    fn malformed_success_body_is_not_a_logout() {
        let outcome = classify_response(true, "<html>garbage</html>");
        match outcome {
            LogoutOutcome::Failed { error } => {
                assert!(error.starts_with("Failed to decode logout response"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn failure_without_error_text_uses_fallback() {
        let outcome = classify_response(false, "{}");
        assert_eq!(
            outcome,
            LogoutOutcome::Failed {
                error: FALLBACK_ERROR.to_string()
            }
        );
    }
}
