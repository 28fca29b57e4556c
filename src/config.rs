use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use std::collections::HashSet;

pub const DEFAULT_CATALOG_URL: &str = "https://slackmojis.com/emojis.json";
pub const DEFAULT_STORAGE_DIR: &str = "./storage";
pub const DOWNLOAD_SUBDIR: &str = "downloaded";
pub const PACK_SUBDIR: &str = "packs";
pub const CATALOG_CACHE_FILE: &str = "slackmojis.json";

pub const PACK_TITLE_PREFIX: &str = "slackmoji-";
pub const PACK_FILE_PREFIX: &str = "slackmojis-";
pub const PACK_FILE_EXT: &str = "yaml";
pub const UNCATEGORIZED_SLUG: &str = "uncategorized";

pub const MAX_EMOJI_EDGE: u32 = 256;

pub const HTTP_TIMEOUT_SECONDS: u64 = 60;
pub const HTTP_CONNECT_TIMEOUT: u64 = 20;

pub const LIST_PAGE_SIZE: u32 = 1000;
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

const SLACK_HOST_TEMPLATE: &str = "https://{team}.slack.com";
pub const SLACK_CUSTOMIZE_PATH: &str = "/customize/emoji";
pub const SLACK_ADD_PATH: &str = "/api/emoji.add";
pub const SLACK_LIST_PATH: &str = "/api/emoji.adminList";

pub fn slack_base_url(team: &str) -> String {
    SLACK_HOST_TEMPLATE.replace("{team}", team.trim())
}

pub static SPORTS_SLUGS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["mlb", "nba", "nfl", "nhl"].iter().cloned().collect());

pub fn default_worker_count() -> usize {
    num_cpus::get().saturating_sub(1).max(1)
}

const CHROME_VER: &str = "123.0.0.0";
const WEBKIT_VER: &str = "537.36";
pub static USER_AGENT_VAL: Lazy<String> = Lazy::new(|| {
    format!(
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/{} (KHTML, like Gecko) Chrome/{} Safari/{}",
        WEBKIT_VER, CHROME_VER, WEBKIT_VER
    )
});

pub static BASE_UA_HEADERS: Lazy<HeaderMap> = Lazy::new(|| {
    let mut h = HeaderMap::new();
    h.insert(USER_AGENT, HeaderValue::from_static(&USER_AGENT_VAL));
    h.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/html, */*"),
    );
    h
});

// api_token: "xoxs-...", or "api_token":"xoxs-..."
pub static API_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#".*(?:"?api_token"?):\s*"([^"]+)".*"#).unwrap());
