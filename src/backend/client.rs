use crate::backend::models::{DownloadParams, LoginBody, StatusResponse};
use crate::error::{AppError, AppResult};
use reqwest::{Client, Response};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Base endpoint of the local downloader backend. Fixed at build time.
const BASE_URL: &str = "http://127.0.0.1:5000";

/// Thin client over the backend's four endpoints. Non-2xx responses are
/// returned to the caller together with their body: the failure payload
/// carries the marker fields outcome classification depends on.
pub struct BackendClient {
    http: Client,
    base_url: String,
}

/// Raw exchange result: HTTP success flag plus the undecoded body.
#[derive(Debug)]
pub struct RawResponse {
    pub ok: bool,
    pub body: String,
}

impl BackendClient {
    pub fn new() -> AppResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| AppError::generic(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: BASE_URL.to_string(),
        })
    }

    pub async fn status(&self) -> AppResult<StatusResponse> {
        let response = self
            .http
            .get(self.url("/status"))
            .send()
            .await
            .map_err(|err| AppError::generic(format!("Failed to request status: {err}")))?;

        response
            .json::<StatusResponse>()
            .await
            .map_err(|err| AppError::generic(format!("Failed to decode status response: {err}")))
    }

    pub async fn login(&self, body: &LoginBody) -> AppResult<RawResponse> {
        let response = self
            .http
            .post(self.url("/login"))
            .json(body)
            .send()
            .await
            .map_err(|err| AppError::generic(format!("Failed to request login: {err}")))?;

        Self::collect(response, "login").await
    }

    pub async fn logout(&self) -> AppResult<RawResponse> {
        let response = self
            .http
            .post(self.url("/logout"))
            .send()
            .await
            .map_err(|err| AppError::generic(format!("Failed to request logout: {err}")))?;

        Self::collect(response, "logout").await
    }

    pub async fn download(&self, params: &DownloadParams) -> AppResult<RawResponse> {
        let response = self
            .http
            .get(self.url("/download"))
            .query(&params.to_query())
            .send()
            .await
            .map_err(|err| AppError::generic(format!("Failed to request download: {err}")))?;

        Self::collect(response, "download").await
    }

    async fn collect(response: Response, request_context: &str) -> AppResult<RawResponse> {
        let ok = response.status().is_success();
        let body = response.text().await.map_err(|err| {
            AppError::generic(format!("Failed to read {request_context} response: {err}"))
        })?;

        Ok(RawResponse { ok, body })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
