use crate::backend::client::BackendClient;

/// Backend-reported session state, re-derived on every query. The backend
/// is ground truth for who is logged in; saved accounts play no part here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedIn { username: String },
    LoggedOut,
    /// The backend could not be reached or returned garbage. Rendered
    /// distinctly from LoggedOut so a dead backend is never mistaken for
    /// a missing session.
    Unreachable,
}

pub async fn run(client: &BackendClient) -> SessionState {
    match client.status().await {
        Ok(status) => match status.logged_in_as {
            Some(username) if status.logged_in => SessionState::LoggedIn { username },
            _ => SessionState::LoggedOut,
        },
        Err(_) => SessionState::Unreachable,
    }
}

pub fn render(state: &SessionState) -> String {
    match state {
        SessionState::LoggedIn { username } => format!("Logged in as @{username}"),
        SessionState::LoggedOut => "Not logged in".to_string(),
        SessionState::Unreachable => "Backend not running".to_string(),
    }
}
