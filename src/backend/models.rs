use serde::{Deserialize, Serialize};

/// GET /status payload. Both fields must be present and truthy for the
/// client to consider a session active.
#[derive(Debug, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub logged_in: bool,
    #[serde(default)]
    pub logged_in_as: Option<String>,
}

/// POST /login body. Exactly one of the two credential shapes is sent:
/// `{username, password}` or `{use_browser_cookies: true}`.
#[derive(Debug, Serialize)]
pub struct LoginBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_browser_cookies: Option<bool>,
}

impl LoginBody {
    pub fn with_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            use_browser_cookies: None,
        }
    }

    pub fn browser_cookies() -> Self {
        Self {
            username: None,
            password: None,
            use_browser_cookies: Some(true),
        }
    }
}

/// Success body of /login and /logout.
#[derive(Debug, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Failure body shared by all endpoints. Marker fields select the outcome
/// class; everything defaults so a malformed body classifies as generic.
#[derive(Debug, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub challenge_required: bool,
    #[serde(default)]
    pub checkpoint_required: bool,
    #[serde(default)]
    pub browser_cookies_failed: bool,
}

impl ApiError {
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    pub fn message_or(&self, fallback: &str) -> String {
        match self.error.as_deref() {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// GET /download query parameters with the client-side defaults. Values
/// travel as strings; booleans as "0"/"1".
#[derive(Debug, Clone)]
pub struct DownloadParams {
    pub target_username: String,
    pub limit: u32,
    pub delay_seconds: f64,
    pub story_limit: u32,
    pub backoff_seconds: f64,
    pub include_posts: bool,
    pub include_reels: bool,
    pub include_stories: bool,
}

impl Default for DownloadParams {
    fn default() -> Self {
        Self {
            target_username: String::new(),
            limit: 5,
            delay_seconds: 0.0,
            story_limit: 20,
            backoff_seconds: 15.0,
            include_posts: true,
            include_reels: true,
            include_stories: false,
        }
    }
}

impl DownloadParams {
    pub fn for_target(target_username: impl Into<String>) -> Self {
        Self {
            target_username: target_username.into(),
            ..Self::default()
        }
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("username", self.target_username.clone()),
            ("limit", self.limit.to_string()),
            ("delay", self.delay_seconds.to_string()),
            ("stories", flag(self.include_stories)),
            ("include_posts", flag(self.include_posts)),
            ("include_reels", flag(self.include_reels)),
            ("stories_limit", self.story_limit.to_string()),
            ("backoff", self.backoff_seconds.to_string()),
        ]
    }
}

fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

/// Success body of /download. Every field is defaultable: the backend may
/// omit any of them and the report must still render.
#[derive(Debug, Default, Deserialize)]
pub struct DownloadReport {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub stats: DownloadStats,
    #[serde(default)]
    pub stories_status: Option<String>,
    #[serde(default)]
    pub posts: Vec<PostEntry>,
    #[serde(default)]
    pub stories: Vec<StoryEntry>,
    #[serde(default)]
    pub folders: Folders,
}

#[derive(Debug, Default, Deserialize)]
pub struct DownloadStats {
    #[serde(default)]
    pub posts_downloaded: u64,
    #[serde(default)]
    pub reels_downloaded: u64,
    #[serde(default)]
    pub rate_limit_retries: u64,
}

/// A downloaded post/reel. The backend appends `{"error": ...}` entries to
/// the same list when an item fails, so every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct PostEntry {
    #[serde(default)]
    pub shortcode: Option<String>,
    #[serde(default)]
    pub date_utc: Option<String>,
    #[serde(default)]
    pub is_video: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct StoryEntry {
    #[serde(default)]
    pub date_utc: Option<String>,
    #[serde(default)]
    pub is_video: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct Folders {
    #[serde(default)]
    pub base: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_body_password_shape_omits_cookie_flag() {
        let body = LoginBody::with_password("alice", "pw1");
        let encoded = serde_json::to_value(&body).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({"username": "alice", "password": "pw1"})
        );
    }

    #[test]
    fn login_body_browser_shape_omits_credentials() {
        let body = LoginBody::browser_cookies();
        let encoded = serde_json::to_value(&body).unwrap();
        assert_eq!(encoded, serde_json::json!({"use_browser_cookies": true}));
    }

    #[test]
    fn download_query_uses_string_flags_and_defaults() {
        let params = DownloadParams::for_target("target");
        let query = params.to_query();
        assert_eq!(
            query,
            vec![
                ("username", "target".to_string()),
                ("limit", "5".to_string()),
                ("delay", "0".to_string()),
                ("stories", "0".to_string()),
                ("include_posts", "1".to_string()),
                ("include_reels", "1".to_string()),
                ("stories_limit", "20".to_string()),
                ("backoff", "15".to_string()),
            ]
        );
    }

    #[test]
    fn report_with_missing_fields_decodes_to_defaults() {
        let report: DownloadReport = serde_json::from_str(r#"{"message":"ok"}"#).unwrap();
        assert_eq!(report.message, "ok");
        assert_eq!(report.stats.posts_downloaded, 0);
        assert!(report.posts.is_empty());
        assert!(report.stories_status.is_none());
        assert_eq!(report.folders.base, "");
    }

    #[test]
    fn post_entries_tolerate_error_rows() {
        let report: DownloadReport =
            serde_json::from_str(r#"{"posts":[{"error":"boom"},{"shortcode":"abc"}]}"#).unwrap();
        assert_eq!(report.posts.len(), 2);
        assert!(report.posts[0].shortcode.is_none());
        assert_eq!(report.posts[1].shortcode.as_deref(), Some("abc"));
    }

    #[test]
    fn api_error_falls_back_on_malformed_body() {
        let err = ApiError::from_body("not json");
        assert!(err.error.is_none());
        assert!(!err.challenge_required);
        assert_eq!(err.message_or("fallback"), "fallback");
    }
}
