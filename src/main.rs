mod backend;
mod cli;
mod error;
mod features;
mod state;
mod ui;

use clap::Parser;
use colored::Colorize;
use dialoguer::{Input, Password};

use crate::backend::client::BackendClient;
use crate::backend::models::DownloadParams;
use crate::cli::{AccountsArgs, AccountsCommand, Cli, Command, DownloadArgs, LoginArgs};
use crate::error::{AppError, AppResult};
use crate::features::accounts::store::AccountStore;
use crate::features::download;
use crate::features::session::login::{self, Credentials, LoginOutcome};
use crate::features::session::{logout, status};
use crate::features::shell;
use crate::ui::prompt_theme;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{}", format!("Error: {}", err.message).red());
            err.code
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Status => handle_status().await,
        Command::Login(args) => handle_login(args).await,
        Command::Logout => handle_logout().await,
        Command::Download(args) => handle_download(args).await,
        Command::Accounts(args) => handle_accounts(args),
        Command::Shell => handle_shell().await,
    }
}

async fn handle_status() -> AppResult<()> {
    let client = BackendClient::new()?;
    let session = status::run(&client).await;

    let rendered = status::render(&session);
    match session {
        status::SessionState::LoggedIn { .. } => println!("{}", rendered.green()),
        status::SessionState::LoggedOut => println!("{rendered}"),
        status::SessionState::Unreachable => println!("{}", rendered.red()),
    }

    Ok(())
}

async fn handle_login(args: LoginArgs) -> AppResult<()> {
    let client = BackendClient::new()?;
    let store = AccountStore::open_default()?;
    let credentials = resolve_credentials(args)?;

    let in_flight = match credentials {
        Credentials::Password { .. } => "Logging in...",
        Credentials::BrowserCookies => "Loading browser cookies...",
    };
    ui::progress(in_flight);

    let outcome = login::run(&client, &store, credentials).await?;
    let rendered = login::render(&outcome);
    match outcome {
        LoginOutcome::Success { .. } => println!("{}", rendered.green()),
        _ => println!("{}", rendered.red()),
    }

    Ok(())
}

async fn handle_logout() -> AppResult<()> {
    let client = BackendClient::new()?;

    ui::progress("Logging out...");
    let outcome = logout::run(&client).await;
    let rendered = logout::render(&outcome);
    match outcome {
        logout::LogoutOutcome::Success { .. } => println!("{}", rendered.green()),
        logout::LogoutOutcome::Failed { .. } => println!("{}", rendered.red()),
    }

    Ok(())
}

async fn handle_download(args: DownloadArgs) -> AppResult<()> {
    let client = BackendClient::new()?;
    let params = DownloadParams {
        target_username: args.username,
        limit: args.limit,
        delay_seconds: args.delay,
        story_limit: args.stories_limit,
        backoff_seconds: args.backoff,
        include_posts: !args.no_posts,
        include_reels: !args.no_reels,
        include_stories: args.stories,
    };

    ui::progress("Processing...");
    let outcome = download::run::run(&client, &params).await;
    let rendered = download::render::render(&outcome);
    match outcome {
        download::run::DownloadOutcome::Success(_) => println!("{rendered}"),
        _ => println!("{}", rendered.red()),
    }

    Ok(())
}

fn handle_accounts(args: AccountsArgs) -> AppResult<()> {
    let store = AccountStore::open_default()?;

    match args.command {
        AccountsCommand::List => {
            let accounts = store.list()?;
            if accounts.is_empty() {
                println!("No saved accounts.");
                return Ok(());
            }
            for account in accounts {
                println!("@{}", account.username);
            }
        }
        AccountsCommand::Remove(args) => {
            store.remove(&args.username)?;
            println!("{}", format!("Removed @{}.", args.username).green());
        }
    }

    Ok(())
}

async fn handle_shell() -> AppResult<()> {
    let client = BackendClient::new()?;
    let store = AccountStore::open_default()?;
    shell::run(&client, &store).await
}

fn resolve_credentials(args: LoginArgs) -> AppResult<Credentials> {
    if args.browser_cookies {
        return Ok(Credentials::BrowserCookies);
    }

    let username = match normalize_optional(args.username) {
        Some(value) => value,
        None => Input::<String>::with_theme(&prompt_theme())
            .with_prompt("Username")
            .interact_text()
            .map(|value| value.trim().to_string())
            .map_err(|err| AppError::invalid_input(format!("Failed to read username: {err}")))?,
    };

    if username.is_empty() {
        return Err(AppError::invalid_input("Username cannot be empty."));
    }

    let password = match args.password {
        Some(value) => value,
        None => Password::with_theme(&prompt_theme())
            .with_prompt("Password")
            .allow_empty_password(false)
            .interact()
            .map_err(|err| AppError::invalid_input(format!("Failed to read password: {err}")))?,
    };

    Ok(Credentials::Password { username, password })
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim().to_string();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    })
}
