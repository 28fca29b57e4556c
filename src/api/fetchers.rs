use super::client::{parse_json, ApiClient};
use crate::error::AppResult;
use crate::io;
use crate::logging::{log, LogLevel};
use crate::model::catalog::SourceItem;
use bytes::Bytes;
use std::path::Path;
use tokio::fs;

/// Returns the catalog, reading `cache_path` when present and otherwise
/// paging through `base_url` and writing the result there. The cache never
/// expires; delete the file to refetch.
pub async fn fetch_catalog(
    client: &ApiClient,
    base_url: &str,
    cache_path: &Path,
) -> AppResult<Vec<SourceItem>> {
    if fs::try_exists(cache_path).await.unwrap_or(false) {
        let items: Vec<SourceItem> = io::load_json(cache_path).await?;
        log(
            LogLevel::Info,
            &format!(
                "Loaded {} catalog item(s) from cache '{}'",
                items.len(),
                cache_path.display()
            ),
        );
        return Ok(items);
    }

    let items = fetch_catalog_pages(client, base_url).await?;
    io::save_json(cache_path, items.clone(), "Catalog Cache").await?;
    Ok(items)
}

pub async fn fetch_catalog_pages(client: &ApiClient, base_url: &str) -> AppResult<Vec<SourceItem>> {
    log(LogLevel::Info, &format!("Fetching catalog from {} ...", base_url));

    let mut all_items: Vec<SourceItem> = Vec::new();
    let mut page: u32 = 0;
    loop {
        let ctx = format!("Catalog page {}", page);
        let bytes = client
            .get_bytes(base_url, Some(&[("page", page)]), &ctx)
            .await?;
        let items: Vec<SourceItem> = parse_json(&bytes, &ctx)?;
        if items.is_empty() {
            break;
        }
        log(
            LogLevel::Info,
            &format!("... page {} ({} items)", page, items.len()),
        );
        all_items.extend(items);
        page += 1;
    }

    log(
        LogLevel::Success,
        &format!(
            "Fetched {} catalog item(s) over {} page(s).",
            all_items.len(),
            page
        ),
    );
    Ok(all_items)
}

pub async fn fetch_asset(client: &ApiClient, url: &str) -> AppResult<Bytes> {
    client
        .get_bytes(url, None::<&[(&str, &str)]>, "Asset")
        .await
}
