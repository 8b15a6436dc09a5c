//! Explicit UI state for the interactive shell: one value, updated by a
//! pure reducer per action, rendered in a separate read-only pass.

use crate::features::accounts::store::SavedAccount;
use crate::features::download::render as download_render;
use crate::features::download::run::DownloadOutcome;
use crate::features::session::login::{self, LoginOutcome};
use crate::features::session::logout::{self, LogoutOutcome};
use crate::features::session::status::{self, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    LoggedOut,
    LoggedIn,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub mode: Mode,
    pub status_text: String,
    pub result_text: String,
    pub saved_accounts: Vec<SavedAccount>,
    pub current_user: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            mode: Mode::LoggedOut,
            status_text: String::new(),
            result_text: String::new(),
            saved_accounts: Vec::new(),
            current_user: None,
        }
    }
}

#[derive(Debug)]
pub enum Action {
    StatusRefreshed(SessionState),
    AccountsLoaded(Vec<SavedAccount>),
    /// A backend request went out; `status` is the in-flight line
    /// ("Logging in...", "Processing...").
    RequestStarted { status: String },
    LoginFinished(LoginOutcome),
    LogoutFinished(LogoutOutcome),
    DownloadFinished(DownloadOutcome),
}

impl UiState {
    /// Pure transition function. The backend is ground truth for the mode:
    /// saved accounts never flip it, only status/login/logout results do.
    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            Action::StatusRefreshed(state) => {
                self.status_text = status::render(&state);
                match state {
                    SessionState::LoggedIn { username } => {
                        self.mode = Mode::LoggedIn;
                        self.current_user = Some(username);
                    }
                    SessionState::LoggedOut | SessionState::Unreachable => {
                        self.mode = Mode::LoggedOut;
                        self.current_user = None;
                    }
                }
            }
            Action::AccountsLoaded(accounts) => {
                self.saved_accounts = accounts;
            }
            Action::RequestStarted { status } => {
                self.status_text = status;
            }
            Action::LoginFinished(outcome) => {
                self.status_text = login::render(&outcome);
                if matches!(outcome, LoginOutcome::Success { .. }) {
                    self.mode = Mode::LoggedIn;
                }
            }
            Action::LogoutFinished(outcome) => {
                self.status_text = logout::render(&outcome);
                if matches!(outcome, LogoutOutcome::Success { .. }) {
                    self.mode = Mode::LoggedOut;
                    self.current_user = None;
                    self.result_text.clear();
                }
            }
            Action::DownloadFinished(outcome) => {
                self.result_text = download_render::render(&outcome);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved(username: &str, password: &str) -> SavedAccount {
        SavedAccount {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn login_success_enters_logged_in_mode() {
        let state = UiState::default().reduce(Action::LoginFinished(LoginOutcome::Success {
            message: "Logged in as alice".to_string(),
        }));
        assert_eq!(state.mode, Mode::LoggedIn);
        assert_eq!(state.status_text, "Logged in as alice");
    }

    #[test]
    fn login_failure_stays_logged_out() {
        let state = UiState::default().reduce(Action::LoginFinished(LoginOutcome::Failed {
            error: "Invalid username or password".to_string(),
        }));
        assert_eq!(state.mode, Mode::LoggedOut);
        assert_eq!(state.status_text, "Error: Invalid username or password");
    }

    #[test]
    fn status_refresh_is_ground_truth_for_current_user() {
        let state = UiState::default().reduce(Action::StatusRefreshed(SessionState::LoggedIn {
            username: "alice".to_string(),
        }));
        assert_eq!(state.mode, Mode::LoggedIn);
        assert_eq!(state.current_user.as_deref(), Some("alice"));

        let state = state.reduce(Action::StatusRefreshed(SessionState::LoggedOut));
        assert_eq!(state.mode, Mode::LoggedOut);
        assert!(state.current_user.is_none());
    }

    #[test]
    fn unreachable_backend_renders_distinctly() {
        let state = UiState::default().reduce(Action::StatusRefreshed(SessionState::Unreachable));
        assert_eq!(state.status_text, "Backend not running");
        assert_eq!(state.mode, Mode::LoggedOut);
    }

    #[test]
    fn logout_success_clears_session_but_keeps_saved_accounts() {
        let state = UiState {
            mode: Mode::LoggedIn,
            status_text: String::new(),
            result_text: "old result".to_string(),
            saved_accounts: vec![saved("alice", "pw1")],
            current_user: Some("alice".to_string()),
        };

        let state = state.reduce(Action::LogoutFinished(LogoutOutcome::Success {
            message: "Logged out".to_string(),
        }));
        assert_eq!(state.mode, Mode::LoggedOut);
        assert!(state.current_user.is_none());
        assert!(state.result_text.is_empty());
        assert_eq!(state.saved_accounts, vec![saved("alice", "pw1")]);
    }

    #[test]
    fn request_start_sets_in_flight_status() {
        let state = UiState::default().reduce(Action::RequestStarted {
            status: "Logging in...".to_string(),
        });
        assert_eq!(state.status_text, "Logging in...");
    }

    #[test]
    fn download_result_does_not_change_mode() {
        let state = UiState::default().reduce(Action::DownloadFinished(
            DownloadOutcome::Invalid {
                error: "Target username required".to_string(),
            },
        ));
        assert_eq!(state.mode, Mode::LoggedOut);
        assert_eq!(state.result_text, "Target username required");
    }
}
