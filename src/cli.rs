use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "igsaver",
    bin_name = "igsaver",
    version,
    about = "Instagram story/post downloader client"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show backend login status.
    Status,
    /// Log in to Instagram through the backend.
    Login(LoginArgs),
    /// Log out of the current backend session.
    Logout,
    /// Download posts, reels and stories for a profile.
    Download(DownloadArgs),
    /// Manage saved account credentials.
    Accounts(AccountsArgs),
    /// Interactive account panel.
    Shell,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Instagram username. Prompted for when omitted.
    #[arg(long)]
    pub username: Option<String>,
    /// Instagram password. Prompted for (hidden) when omitted.
    #[arg(long)]
    pub password: Option<String>,
    /// Reuse an Instagram session from the browser instead of credentials.
    #[arg(long, conflicts_with_all = ["username", "password"])]
    pub browser_cookies: bool,
}

#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Target profile to download from.
    pub username: String,
    /// Maximum number of posts/reels to fetch.
    #[arg(long, default_value_t = 5)]
    pub limit: u32,
    /// Seconds to sleep between items.
    #[arg(long, default_value_t = 0.0)]
    pub delay: f64,
    /// Also download stories (requires a logged-in session).
    #[arg(long)]
    pub stories: bool,
    /// Maximum number of story items to fetch.
    #[arg(long, default_value_t = 20)]
    pub stories_limit: u32,
    /// Base backoff in seconds when the backend retries a rate limit.
    #[arg(long, default_value_t = 15.0)]
    pub backoff: f64,
    /// Skip regular (non-video) posts.
    #[arg(long)]
    pub no_posts: bool,
    /// Skip reels.
    #[arg(long)]
    pub no_reels: bool,
}

#[derive(Debug, Args)]
pub struct AccountsArgs {
    #[command(subcommand)]
    pub command: AccountsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AccountsCommand {
    /// List saved accounts.
    List,
    /// Remove a saved account.
    Remove(AccountsRemoveArgs),
}

#[derive(Debug, Args)]
pub struct AccountsRemoveArgs {
    pub username: String,
}
