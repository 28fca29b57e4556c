use crate::api::client::ApiClient;
use crate::api::fetchers;
use crate::api::slack::SlackSession;
use crate::core::collector;
use crate::core::stats;
use crate::core::uploader::{self, NameAffixes};
use crate::core::validator::AssetValidator;
use crate::error::AppResult;
use crate::io::{self, StorageLayout};
use crate::logging::{log, LogLevel};
use crate::utils::TokioSleeper;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct CollectOptions {
    pub catalog_url: String,
    pub storage: StorageLayout,
    pub workers: usize,
}

#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub team_name: String,
    pub cookie: String,
    pub token: Option<String>,
    pub affixes: NameAffixes,
    pub paths: Vec<PathBuf>,
}

fn log_start(what: &str) {
    let start_ts_str = Utc::now().format("%Y-%m-%d %H:%M:%S %Z").to_string();
    log(
        LogLevel::Step,
        &format!("Starting {} at {}", what, start_ts_str),
    );
}

pub async fn run_collect(opts: CollectOptions) -> AppResult<i32> {
    let overall_start_time = Instant::now();
    log_start("Emoji Collection");
    log(
        LogLevel::Info,
        &format!("Storage Directory: {}", opts.storage.root.display()),
    );

    io::ensure_storage_directories(&opts.storage).await?;
    let client = ApiClient::new()?;

    log(LogLevel::Step, "--- Phase 1: Catalog Fetch ---");
    let items =
        fetchers::fetch_catalog(&client, &opts.catalog_url, &opts.storage.catalog_cache()).await?;

    log(LogLevel::Step, "--- Phase 2: Name Resolution & Asset Validation ---");
    let validator = Arc::new(AssetValidator::new(client, opts.storage.download_dir()));
    let output = collector::collect(items, validator, opts.workers).await?;

    log(LogLevel::Step, "--- Phase 3: Pack Writing ---");
    collector::write_packs(output.packs, &opts.storage).await?;

    stats::print_collection_summary(&output.stats, overall_start_time.elapsed());
    Ok(if output.stats.failed_tasks > 0 { 1 } else { 0 })
}

pub async fn run_upload(opts: UploadOptions) -> AppResult<i32> {
    let overall_start_time = Instant::now();
    log_start("Emoji Upload");

    let session = SlackSession::connect(&opts.team_name, &opts.cookie, opts.token.clone()).await?;

    log(LogLevel::Step, "--- Phase 1: Existing Emoji Listing ---");
    let remote = session.list_emoji_names().await?;

    log(LogLevel::Step, "--- Phase 2: Upload ---");
    let files = io::expand_upload_paths(&opts.paths).await?;
    log(
        LogLevel::Info,
        &format!("{} candidate file(s) to process.", files.len()),
    );
    let summary =
        uploader::upload_files(&session, &remote, &opts.affixes, &files, &TokioSleeper).await?;

    stats::print_upload_summary(&summary, overall_start_time.elapsed());
    Ok(0)
}
