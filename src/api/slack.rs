use super::client::{error_from_response, parse_json, ApiClient};
use super::model::{AddResponse, AdminListResponse};
use crate::config;
use crate::error::{AppError, AppResult};
use crate::logging::{log, LogLevel};
use crate::model::remote::RemoteNameSet;
use crate::utils::Sleeper;
use bytes::Bytes;
use once_cell::sync::Lazy;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, StatusCode};
use scraper::{Html, Selector};
use std::time::Duration;

static SCRIPT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script").expect("Invalid script selector"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlackEndpoints {
    pub customize: String,
    pub add: String,
    pub list: String,
}

impl SlackEndpoints {
    pub fn from_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        SlackEndpoints {
            customize: format!("{}{}", base, config::SLACK_CUSTOMIZE_PATH),
            add: format!("{}{}", base, config::SLACK_ADD_PATH),
            list: format!("{}{}", base, config::SLACK_LIST_PATH),
        }
    }

    pub fn for_team(team: &str) -> Self {
        Self::from_base(&config::slack_base_url(team))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Rejected(String),
}

pub struct SlackSession {
    client: ApiClient,
    endpoints: SlackEndpoints,
    token: String,
}

impl SlackSession {
    pub async fn connect(team: &str, cookie: &str, token: Option<String>) -> AppResult<Self> {
        Self::connect_to(SlackEndpoints::for_team(team), cookie, token).await
    }

    /// Builds the session; without an explicit token it is scraped from the
    /// workspace's emoji customization page.
    pub async fn connect_to(
        endpoints: SlackEndpoints,
        cookie: &str,
        token: Option<String>,
    ) -> AppResult<Self> {
        let client = ApiClient::with_session_cookie(cookie)?;
        let token = match token.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
            Some(token) => token,
            None => fetch_api_token(&client, &endpoints.customize).await?,
        };
        Ok(SlackSession {
            client,
            endpoints,
            token,
        })
    }

    /// Pages through `emoji.adminList`. Any failed page aborts: a partial
    /// list would cause re-uploads of names that already exist.
    pub async fn list_emoji_names(&self) -> AppResult<RemoteNameSet> {
        let endpoint = "emoji.adminList";
        let mut names = Vec::new();
        let mut page: u32 = 1;

        loop {
            let form = [
                ("query", String::new()),
                ("page", page.to_string()),
                ("count", config::LIST_PAGE_SIZE.to_string()),
                ("token", self.token.clone()),
            ];
            let resp: AdminListResponse = self
                .client
                .post_form(&self.endpoints.list, &form, endpoint)
                .await?;

            if !resp.ok {
                let message = resp.error.unwrap_or_else(|| "unknown error".to_string());
                log(
                    LogLevel::Error,
                    &format!("Error with fetching emoji list: {}", message),
                );
                return Err(AppError::api_rejected(endpoint, message));
            }

            names.extend(resp.emoji.into_iter().map(|e| e.name));

            match resp.paging {
                Some(paging) if paging.page < paging.pages => page = paging.page + 1,
                _ => break,
            }
        }

        let set: RemoteNameSet = names.into_iter().collect();
        log(
            LogLevel::Info,
            &format!("Destination already has {} emoji.", set.len()),
        );
        Ok(set)
    }

    /// Uploads one image. A 429 sleeps for the server's `retry-after` and
    /// resends the same request, with no upper bound on attempts. Other
    /// non-success statuses are fatal; `ok:false` bodies come back as
    /// [`AddOutcome::Rejected`].
    pub async fn add_emoji<S: Sleeper>(
        &self,
        name: &str,
        file_name: &str,
        image: Bytes,
        sleeper: &S,
    ) -> AppResult<AddOutcome> {
        let endpoint = "emoji.add";
        loop {
            let form = Form::new()
                .text("mode", "data")
                .text("name", name.to_string())
                .text("token", self.token.clone())
                .part(
                    "image",
                    Part::stream_with_length(Body::from(image.clone()), image.len() as u64)
                        .file_name(file_name.to_string()),
                );

            let resp = self
                .client
                .http()
                .post(&self.endpoints.add)
                .multipart(form)
                .send()
                .await?;
            let status = resp.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let wait = retry_after(resp.headers());
                log(
                    LogLevel::Warning,
                    &format!(
                        "429 Too Many Requests!, sleeping for {} seconds",
                        wait.as_secs()
                    ),
                );
                sleeper.sleep(wait).await;
                continue;
            }
            if !status.is_success() {
                return Err(error_from_response(resp, status, endpoint).await);
            }

            let bytes = resp.bytes().await?;
            let body: AddResponse = parse_json(&bytes, endpoint)?;
            return Ok(if body.ok {
                AddOutcome::Added
            } else {
                AddOutcome::Rejected(
                    body.error
                        .unwrap_or_else(|| String::from_utf8_lossy(&bytes).into_owned()),
                )
            });
        }
    }
}

pub fn retry_after(headers: &reqwest::header::HeaderMap) -> Duration {
    let secs = headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(config::DEFAULT_RETRY_AFTER_SECS);
    Duration::from_secs(secs)
}

pub async fn fetch_api_token(client: &ApiClient, customize_url: &str) -> AppResult<String> {
    let html = client.get_text(customize_url, "customize/emoji").await?;
    match extract_api_token(&html)? {
        Some(token) => Ok(token),
        None => Err(AppError::Auth(format!(
            "No api_token found in page. Search your {} page source for \"api_token\" and pass its value with --token.",
            customize_url
        ))),
    }
}

pub fn extract_api_token(html: &str) -> AppResult<Option<String>> {
    let document = Html::parse_document(html);
    for script in document.select(&SCRIPT_SELECTOR) {
        let text: String = script.text().collect();
        for line in text.lines() {
            if !line.contains("\"api_token\"") {
                continue;
            }
            return match config::API_TOKEN_RE.captures(line.trim()) {
                Some(caps) => Ok(caps.get(1).map(|m| m.as_str().to_string())),
                None => {
                    log(LogLevel::Error, line);
                    Err(AppError::Auth(
                        "Could not parse API token from remote data! Regex requires updating."
                            .to_string(),
                    ))
                }
            };
        }
    }
    Ok(None)
}
