//! Interactive account panel: the LoggedOut/LoggedIn state machine over a
//! serial prompt loop. At most one backend request is ever outstanding
//! because the loop blocks on each action before offering the next menu.

use crate::backend::client::BackendClient;
use crate::backend::models::DownloadParams;
use crate::error::{AppError, AppResult};
use crate::features::accounts::store::AccountStore;
use crate::features::download;
use crate::features::session::login::{self, Credentials, LoginOutcome};
use crate::features::session::{logout, status};
use crate::state::{Action, Mode, UiState};
use crate::ui;
use colored::Colorize;
use dialoguer::{Input, Password, Select};

#[derive(Debug, Clone)]
enum MenuEntry {
    LoginSaved { username: String, password: String },
    LoginPassword,
    LoginBrowser,
    Download,
    Logout,
    RemoveAccount,
    Refresh,
    Quit,
}

pub async fn run(client: &BackendClient, store: &AccountStore) -> AppResult<()> {
    let mut state = UiState::default();
    state = refresh(client, store, state).await?;

    loop {
        render(&state);

        let entries = menu_entries(&state);
        let labels: Vec<String> = entries.iter().map(label).collect();
        let selection = Select::with_theme(&ui::prompt_theme())
            .with_prompt("Choose an action")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(|err| AppError::invalid_input(format!("Failed to read selection: {err}")))?;

        match entries[selection].clone() {
            MenuEntry::LoginSaved { username, password } => {
                state = do_login(
                    client,
                    store,
                    state,
                    Credentials::Password { username, password },
                )
                .await?;
            }
            MenuEntry::LoginPassword => {
                let username: String = Input::with_theme(&ui::prompt_theme())
                    .with_prompt("Username")
                    .interact_text()
                    .map_err(|err| {
                        AppError::invalid_input(format!("Failed to read username: {err}"))
                    })?;
                let password = Password::with_theme(&ui::prompt_theme())
                    .with_prompt("Password")
                    .interact()
                    .map_err(|err| {
                        AppError::invalid_input(format!("Failed to read password: {err}"))
                    })?;
                state = do_login(
                    client,
                    store,
                    state,
                    Credentials::Password {
                        username: username.trim().to_string(),
                        password,
                    },
                )
                .await?;
            }
            MenuEntry::LoginBrowser => {
                state = do_login(client, store, state, Credentials::BrowserCookies).await?;
            }
            MenuEntry::Download => {
                let params = prompt_download_params()?;
                ui::progress("Processing...");
                state = state.reduce(Action::RequestStarted {
                    status: "Processing...".to_string(),
                });
                let outcome = download::run::run(client, &params).await;
                state = state.reduce(Action::DownloadFinished(outcome));
            }
            MenuEntry::Logout => {
                ui::progress("Logging out...");
                state = state.reduce(Action::RequestStarted {
                    status: "Logging out...".to_string(),
                });
                let outcome = logout::run(client).await;
                state = state.reduce(Action::LogoutFinished(outcome));
                state = state.reduce(Action::AccountsLoaded(store.list()?));
            }
            MenuEntry::RemoveAccount => {
                state = remove_account(store, state)?;
            }
            MenuEntry::Refresh => {
                state = refresh(client, store, state).await?;
            }
            MenuEntry::Quit => return Ok(()),
        }
    }
}

async fn do_login(
    client: &BackendClient,
    store: &AccountStore,
    state: UiState,
    credentials: Credentials,
) -> AppResult<UiState> {
    let in_flight = match credentials {
        Credentials::Password { .. } => "Logging in...",
        Credentials::BrowserCookies => "Loading browser cookies...",
    };
    ui::progress(in_flight);
    let state = state.reduce(Action::RequestStarted {
        status: in_flight.to_string(),
    });

    let outcome = login::run(client, store, credentials).await?;
    let success = matches!(outcome, LoginOutcome::Success { .. });
    let state = state.reduce(Action::LoginFinished(outcome));

    if success {
        // Confirm against the backend's own status and rebuild the selector
        // in case the login saved a new account.
        refresh(client, store, state).await
    } else {
        // Keep the failure/remediation text on screen; only the selector is
        // re-derived.
        Ok(state.reduce(Action::AccountsLoaded(store.list()?)))
    }
}

async fn refresh(
    client: &BackendClient,
    store: &AccountStore,
    state: UiState,
) -> AppResult<UiState> {
    let session = status::run(client).await;
    let state = state.reduce(Action::StatusRefreshed(session));
    Ok(state.reduce(Action::AccountsLoaded(store.list()?)))
}

fn remove_account(store: &AccountStore, state: UiState) -> AppResult<UiState> {
    let usernames: Vec<String> = state
        .saved_accounts
        .iter()
        .map(|account| format!("@{}", account.username))
        .collect();
    if usernames.is_empty() {
        return Ok(state);
    }

    let selection = Select::with_theme(&ui::prompt_theme())
        .with_prompt("Remove which account?")
        .items(&usernames)
        .default(0)
        .interact()
        .map_err(|err| AppError::invalid_input(format!("Failed to read selection: {err}")))?;

    let username = state.saved_accounts[selection].username.clone();
    store.remove(&username)?;
    Ok(state.reduce(Action::AccountsLoaded(store.list()?)))
}

fn prompt_download_params() -> AppResult<DownloadParams> {
    let defaults = DownloadParams::default();

    let target: String = Input::with_theme(&ui::prompt_theme())
        .with_prompt("Target username")
        .allow_empty(true)
        .interact_text()
        .map_err(|err| AppError::invalid_input(format!("Failed to read target: {err}")))?;

    let limit: u32 = prompt_with_default("Post/reel limit", defaults.limit)?;
    let delay: f64 = prompt_with_default("Delay between items (seconds)", defaults.delay_seconds)?;
    let stories = Select::with_theme(&ui::prompt_theme())
        .with_prompt("Download stories?")
        .items(&["No", "Yes"])
        .default(0)
        .interact()
        .map_err(|err| AppError::invalid_input(format!("Failed to read selection: {err}")))?
        == 1;
    let story_limit: u32 = if stories {
        prompt_with_default("Story limit", defaults.story_limit)?
    } else {
        defaults.story_limit
    };
    let backoff: f64 =
        prompt_with_default("Rate-limit backoff (seconds)", defaults.backoff_seconds)?;

    Ok(DownloadParams {
        target_username: target.trim().to_string(),
        limit,
        delay_seconds: delay,
        story_limit,
        backoff_seconds: backoff,
        include_posts: true,
        include_reels: true,
        include_stories: stories,
    })
}

fn prompt_with_default<T>(prompt: &str, default: T) -> AppResult<T>
where
    T: Clone + std::fmt::Display + std::str::FromStr,
    T::Err: std::fmt::Display,
{
    Input::with_theme(&ui::prompt_theme())
        .with_prompt(prompt)
        .default(default)
        .interact_text()
        .map_err(|err| AppError::invalid_input(format!("Failed to read {prompt}: {err}")))
}

fn render(state: &UiState) {
    println!();
    if !state.status_text.is_empty() {
        println!("{}", state.status_text.bold());
    }
    if let Some(username) = &state.current_user {
        println!("{}", format!("Current account: @{username}").green());
    }
    if !state.saved_accounts.is_empty() {
        let names: Vec<String> = state
            .saved_accounts
            .iter()
            .map(|account| format!("@{}", account.username))
            .collect();
        println!(
            "{}",
            format!("Saved accounts: {}", names.join(", ")).bright_black()
        );
    }
    if !state.result_text.is_empty() {
        println!("{}", state.result_text);
    }
}

fn menu_entries(state: &UiState) -> Vec<MenuEntry> {
    let mut entries = Vec::new();

    match state.mode {
        Mode::LoggedOut => {
            for account in &state.saved_accounts {
                entries.push(MenuEntry::LoginSaved {
                    username: account.username.clone(),
                    password: account.password.clone(),
                });
            }
            entries.push(MenuEntry::LoginPassword);
            entries.push(MenuEntry::LoginBrowser);
            entries.push(MenuEntry::Download);
        }
        Mode::LoggedIn => {
            entries.push(MenuEntry::Download);
            for account in &state.saved_accounts {
                if state.current_user.as_deref() != Some(account.username.as_str()) {
                    entries.push(MenuEntry::LoginSaved {
                        username: account.username.clone(),
                        password: account.password.clone(),
                    });
                }
            }
            entries.push(MenuEntry::Logout);
        }
    }

    if !state.saved_accounts.is_empty() {
        entries.push(MenuEntry::RemoveAccount);
    }
    entries.push(MenuEntry::Refresh);
    entries.push(MenuEntry::Quit);
    entries
}

fn label(entry: &MenuEntry) -> String {
    match entry {
        MenuEntry::LoginSaved { username, .. } => format!("Log in as @{username}"),
        MenuEntry::LoginPassword => "Log in with username/password".to_string(),
        MenuEntry::LoginBrowser => "Log in with browser cookies".to_string(),
        MenuEntry::Download => "Download posts/reels/stories".to_string(),
        MenuEntry::Logout => "Log out".to_string(),
        MenuEntry::RemoveAccount => "Remove a saved account".to_string(),
        MenuEntry::Refresh => "Refresh status".to_string(),
        MenuEntry::Quit => "Quit".to_string(),
    }
}
