use crate::backend::client::BackendClient;
use crate::backend::models::{ApiError, LoginBody, MessageResponse};
use crate::error::AppResult;
use crate::features::accounts::store::AccountStore;

const FALLBACK_ERROR: &str = "Login failed";

/// The two credential shapes the backend accepts, exactly one per request.
#[derive(Debug, Clone)]
pub enum Credentials {
    Password { username: String, password: String },
    BrowserCookies,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success { message: String },
    /// Instagram wants out-of-band verification before login can succeed.
    ChallengeRequired { error: String },
    /// No usable Instagram session could be loaded from the browser.
    BrowserCookiesFailed { error: String },
    Failed { error: String },
}

/// Runs a login. A password-based success upserts the saved account before
/// returning, so switching back to this account later is a single click.
/// Transport failures become a `Failed` outcome, never a process error.
pub async fn run(
    client: &BackendClient,
    store: &AccountStore,
    credentials: Credentials,
) -> AppResult<LoginOutcome> {
    let body = match &credentials {
        Credentials::Password { username, password } => {
            LoginBody::with_password(username.clone(), password.clone())
        }
        Credentials::BrowserCookies => LoginBody::browser_cookies(),
    };

    let outcome = match client.login(&body).await {
        Ok(response) => classify_response(response.ok, &response.body),
        Err(err) => LoginOutcome::Failed { error: err.message },
    };

    if let Some((username, password)) = should_persist(&outcome, &credentials) {
        store.upsert(username, password)?;
    }

    Ok(outcome)
}

/// Credentials to save after a login: only a password-based success
/// persists anything. Browser-cookie logins carry no password to keep, and
/// no failure class may touch the store.
pub fn should_persist<'c>(
    outcome: &LoginOutcome,
    credentials: &'c Credentials,
) -> Option<(&'c str, &'c str)> {
    match (outcome, credentials) {
        (LoginOutcome::Success { .. }, Credentials::Password { username, password }) => {
            Some((username, password))
        }
        _ => None,
    }
}

/// Maps an HTTP success flag plus response body to a login outcome. The
/// backend marks non-2xx payloads with `challenge_required`,
/// `checkpoint_required` or `browser_cookies_failed`; anything unmarked is
/// a generic failure carrying the backend's error text.
pub fn classify_response(ok: bool, body: &str) -> LoginOutcome {
    if ok {
        return match serde_json::from_str::<MessageResponse>(body) {
            Ok(decoded) => LoginOutcome::Success {
                message: decoded.message,
            },
            // A 2xx status with a body that is not the success shape must
            // not count as a login; nothing gets persisted off garbage.
            Err(err) => LoginOutcome::Failed {
                error: format!("Failed to decode login response: {err}"),
            },
        };
    }

    let err = ApiError::from_body(body);
    if err.challenge_required || err.checkpoint_required {
        return LoginOutcome::ChallengeRequired {
            error: err.message_or(FALLBACK_ERROR),
        };
    }
    if err.browser_cookies_failed {
        return LoginOutcome::BrowserCookiesFailed {
            error: err.message_or(FALLBACK_ERROR),
        };
    }

    LoginOutcome::Failed {
        error: err.message_or(FALLBACK_ERROR),
    }
}

pub fn render(outcome: &LoginOutcome) -> String {
    match outcome {
        LoginOutcome::Success { message } => message.clone(),
        LoginOutcome::ChallengeRequired { error } => format!(
            "{error}\n\n\
             Steps to fix:\n\
             1. Open Instagram.com in your browser\n\
             2. Log in and complete any verification\n\
             3. Return here and try again"
        ),
        LoginOutcome::BrowserCookiesFailed { error } => format!(
            "{error}\n\n\
             Please:\n\
             1. Log in to Instagram.com in your browser\n\
             2. Make sure you stay logged in\n\
             3. Try again\n\n\
             Or use username/password login instead"
        ),
        LoginOutcome::Failed { error } => format!("Error: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_yields_success_with_message() {
        let outcome = classify_response(true, r#"{"message":"Logged in as alice"}"#);
        assert_eq!(
            outcome,
            LoginOutcome::Success {
                message: "Logged in as alice".to_string()
            }
        );
    }

    #[test]
    fn challenge_marker_wins_over_generic_failure() {
        let outcome = classify_response(false, r#"{"challenge_required":true,"error":"X"}"#);
        assert_eq!(
            outcome,
            LoginOutcome::ChallengeRequired {
                error: "X".to_string()
            }
        );
    }

    #[test]
    fn checkpoint_marker_classifies_as_challenge() {
        let outcome = classify_response(false, r#"{"checkpoint_required":true,"error":"check"}"#);
        assert_eq!(
            outcome,
            LoginOutcome::ChallengeRequired {
                error: "check".to_string()
            }
        );
    }

    #[test]
    fn browser_cookie_marker_gets_its_own_outcome() {
        let outcome =
            classify_response(false, r#"{"browser_cookies_failed":true,"error":"no session"}"#);
        assert_eq!(
            outcome,
            LoginOutcome::BrowserCookiesFailed {
                error: "no session".to_string()
            }
        );
    }

    #[test]
    fn unmarked_failure_carries_backend_error_text() {
        let outcome = classify_response(false, r#"{"error":"Invalid username or password"}"#);
        assert_eq!(
            outcome,
            LoginOutcome::Failed {
                error: "Invalid username or password".to_string()
            }
        );
    }

    #[test]
    fn malformed_success_body_is_not_a_login() {
        let outcome = classify_response(true, "<html>garbage</html>");
        match outcome {
            LoginOutcome::Failed { error } => {
                assert!(error.starts_with("Failed to decode login response"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn password_success_persists_the_credentials() {
        let credentials = Credentials::Password {
            username: "alice".to_string(),
            password: "pw1".to_string(),
        };
        let outcome = LoginOutcome::Success {
            message: "Logged in as alice".to_string(),
        };
        assert_eq!(
            should_persist(&outcome, &credentials),
            Some(("alice", "pw1"))
        );
    }

    #[test]
    fn failures_and_browser_logins_persist_nothing() {
        let password = Credentials::Password {
            username: "alice".to_string(),
            password: "pw1".to_string(),
        };
        let failed = LoginOutcome::Failed {
            error: "Invalid username or password".to_string(),
        };
        let challenge = LoginOutcome::ChallengeRequired {
            error: "verify first".to_string(),
        };
        let success = LoginOutcome::Success {
            message: "Logged in using browser cookies".to_string(),
        };

        assert_eq!(should_persist(&failed, &password), None);
        assert_eq!(should_persist(&challenge, &password), None);
        assert_eq!(should_persist(&success, &Credentials::BrowserCookies), None);
    }

    #[test]
    fn malformed_failure_body_falls_back_to_generic() {
        let outcome = classify_response(false, "<html>502</html>");
        assert_eq!(
            outcome,
            LoginOutcome::Failed {
                error: FALLBACK_ERROR.to_string()
            }
        );
    }

    #[test]
    fn challenge_rendering_includes_remediation_steps() {
        let rendered = render(&LoginOutcome::ChallengeRequired {
            error: "verify first".to_string(),
        });
        assert!(rendered.starts_with("verify first"));
        assert!(rendered.contains("Open Instagram.com in your browser"));
    }
}
