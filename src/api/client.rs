use crate::config;
use crate::error::{AppError, AppResult};
use crate::logging::{log, LogLevel};
use bytes::Bytes;
use reqwest::header::{HeaderValue, COOKIE};
use reqwest::{redirect, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub fn new() -> AppResult<Self> {
        let client = Client::builder()
            .default_headers((*config::BASE_UA_HEADERS).clone())
            .timeout(Duration::from_secs(config::HTTP_TIMEOUT_SECONDS))
            .connect_timeout(Duration::from_secs(config::HTTP_CONNECT_TIMEOUT))
            .build()
            .map_err(AppError::from)?;
        Ok(ApiClient { client })
    }

    /// Client for the destination workspace: carries the `d` session cookie
    /// and never follows redirects (a redirect means the session is stale).
    pub fn with_session_cookie(cookie: &str) -> AppResult<Self> {
        let mut headers = (*config::BASE_UA_HEADERS).clone();
        let cookie_value = HeaderValue::from_str(&format!("d={}", cookie.trim()))
            .map_err(|_| AppError::Argument("Session cookie contains invalid characters".into()))?;
        headers.insert(COOKIE, cookie_value);

        let client = Client::builder()
            .default_headers(headers)
            .redirect(redirect::Policy::none())
            .timeout(Duration::from_secs(config::HTTP_TIMEOUT_SECONDS))
            .connect_timeout(Duration::from_secs(config::HTTP_CONNECT_TIMEOUT))
            .build()
            .map_err(AppError::from)?;
        Ok(ApiClient { client })
    }

    pub fn http(&self) -> &Client {
        &self.client
    }

    pub async fn get_bytes<Q>(&self, url: &str, query: Option<&Q>, endpoint: &str) -> AppResult<Bytes>
    where
        Q: Serialize + ?Sized,
    {
        let mut request = self.client.get(url);
        if let Some(q) = query {
            request = request.query(q);
        }
        let resp = self.send_checked(request, endpoint).await?;
        resp.bytes().await.map_err(|e| {
            log(
                LogLevel::Warning,
                &format!("{} - Error reading response body: {}", endpoint, e),
            );
            AppError::from(e)
        })
    }

    pub async fn get_text(&self, url: &str, endpoint: &str) -> AppResult<String> {
        let resp = self.send_checked(self.client.get(url), endpoint).await?;
        resp.text().await.map_err(AppError::from)
    }

    pub async fn post_form<F, T>(&self, url: &str, form: &F, endpoint: &str) -> AppResult<T>
    where
        F: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .send_checked(self.client.post(url).form(form), endpoint)
            .await?;
        let bytes = resp.bytes().await?;
        parse_json(&bytes, endpoint)
    }

    async fn send_checked(&self, request: RequestBuilder, endpoint: &str) -> AppResult<Response> {
        let resp = request.send().await.map_err(|e| {
            log(
                LogLevel::Warning,
                &format!("{} - Request error: {}", endpoint, e),
            );
            AppError::from(e)
        })?;
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            Err(error_from_response(resp, status, endpoint).await)
        }
    }
}

pub async fn error_from_response(resp: Response, status: StatusCode, endpoint: &str) -> AppError {
    let body = resp
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error body".to_string());
    AppError::http_status(status, endpoint, &body)
}

pub fn parse_json<T: DeserializeOwned>(bytes: &[u8], endpoint: &str) -> AppResult<T> {
    serde_json::from_slice(bytes).map_err(|e| {
        let snippet_len = bytes.len().min(200);
        let snippet = String::from_utf8_lossy(&bytes[..snippet_len]);
        log(
            LogLevel::Error,
            &format!(
                "Fail parse response for {} Type {}: {}. Snippet: '{}'",
                endpoint,
                std::any::type_name::<T>(),
                e,
                snippet
            ),
        );
        AppError::from(e)
    })
}
