use crate::backend::models::DownloadReport;
use crate::features::download::run::DownloadOutcome;

/// Renders any download outcome to its display string. Total over the
/// outcome type: every variant has exactly one template.
pub fn render(outcome: &DownloadOutcome) -> String {
    match outcome {
        DownloadOutcome::Success(report) => render_report(report),
        DownloadOutcome::Invalid { error } => error.clone(),
        DownloadOutcome::ChallengeRequired { .. } => CHALLENGE_TEMPLATE.to_string(),
        DownloadOutcome::RateLimited { .. } => RATE_LIMIT_TEMPLATE.to_string(),
        DownloadOutcome::Failed { error } => format!("Error: {error}"),
    }
}

const CHALLENGE_TEMPLATE: &str = "Instagram challenge required\n\n\
    Please follow these steps:\n\
    1. Open Instagram.com in your browser\n\
    2. Log in to your account\n\
    3. Complete any verification/challenges\n\
    4. Return here and try again\n\n\
    Tip: try waiting 10-15 minutes before retrying";

const RATE_LIMIT_TEMPLATE: &str = "Instagram rate limit detected\n\n\
    Instagram is temporarily blocking requests.\n\
    This happens when too many requests are made.\n\n\
    Solutions:\n\
    - Wait 10-15 minutes before trying again\n\
    - Try with a different account\n\
    - Increase delay between requests\n\
    - Reduce the download limit\n\n\
    Suggested settings:\n\
    - Delay: 3-5 seconds\n\
    - Limit: 3-5 posts\n\
    - Backoff: 30 seconds";

/// Success rendering. Missing numerics show as 0, missing lists as empty,
/// missing optional strings are omitted.
pub fn render_report(report: &DownloadReport) -> String {
    let stats = format!(
        "Posts:{} Reels:{} RateRetries:{}",
        report.stats.posts_downloaded,
        report.stats.reels_downloaded,
        report.stats.rate_limit_retries
    );
    let stories_status = report
        .stories_status
        .as_deref()
        .map(|status| format!("Stories: {status}"))
        .unwrap_or_default();

    let posts: String = report
        .posts
        .iter()
        .map(|post| {
            format!(
                "- {} {} {}\n",
                post.shortcode.as_deref().unwrap_or(""),
                post.date_utc.as_deref().unwrap_or(""),
                if post.is_video { "[VIDEO]" } else { "" }
            )
        })
        .collect();

    let mut stories = String::new();
    if !report.stories.is_empty() {
        stories.push_str("Stories:\n");
        for story in &report.stories {
            stories.push_str(&format!(
                "* STORY {} {}\n",
                story.date_utc.as_deref().unwrap_or(""),
                if story.is_video { "[VIDEO]" } else { "" }
            ));
        }
    }

    format!(
        "{}\n{stats} {stories_status}\n{posts}{stories}Base: {}",
        report.message, report.folders.base
    )
}
