use crate::core::state::CollectionState;
use crate::core::stats::CollectionStats;
use crate::core::validator::AssetValidator;
use crate::error::{AppError, AppResult};
use crate::io::{self, StorageLayout};
use crate::logging::{log, LogLevel};
use crate::model::catalog::SourceItem;
use crate::model::pack::{CategoryPack, EmojiEntry};
use crate::transform::{category, naming};
use crate::utils;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Debug)]
pub struct CollectionOutput {
    pub packs: BTreeMap<String, CategoryPack>,
    pub stats: CollectionStats,
}

/// Runs every catalog item through slug, name and asset checks on a pool of
/// `workers` concurrent tasks and returns the filled packs once all of them
/// have finished. Which of two colliding items receives the numeric suffix
/// depends on scheduling; the resulting set of names does not.
pub async fn collect(
    items: Vec<SourceItem>,
    validator: Arc<AssetValidator>,
    workers: usize,
) -> AppResult<CollectionOutput> {
    let total_items = items.len();
    let slugs = category::collect_slugs(&items);
    log(
        LogLevel::Info,
        &format!(
            "Processing {} item(s) into {} pack(s) with {} worker(s)...",
            total_items,
            slugs.len(),
            workers
        ),
    );

    let state = Arc::new(CollectionState::new(slugs));
    let worker_sem = Arc::new(Semaphore::new(workers.max(1)));
    let mut tasks = JoinSet::new();

    for item in items {
        let state_c = state.clone();
        let validator_c = validator.clone();
        let sem_c = worker_sem.clone();
        tasks.spawn(async move {
            let _permit = utils::acquire_semaphore(&sem_c, "Collect Item").await?;
            process_item(&item, &state_c, &validator_c).await;
            Ok::<(), AppError>(())
        });
    }

    let mut failed_tasks = 0;
    while let Some(join_result) = tasks.join_next().await {
        match join_result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                log(LogLevel::Error, &format!("Collection task failed: {}", e));
                failed_tasks += 1;
            }
            Err(e) => {
                log(
                    LogLevel::Error,
                    &format!("Collection task panicked: {}", e),
                );
                failed_tasks += 1;
            }
        }
    }

    let state = Arc::try_unwrap(state).map_err(|_| {
        AppError::Unexpected("Collection state still shared after workers drained".to_string())
    })?;
    let stats = CollectionStats::from_book(&state.packs, total_items, failed_tasks);
    Ok(CollectionOutput {
        packs: state.packs.into_packs(),
        stats,
    })
}

async fn process_item(item: &SourceItem, state: &CollectionState, validator: &AssetValidator) {
    log(LogLevel::Info, &format!("... {}", item.name));

    let slug = category::category_slug(item);
    let name = naming::resolve_name(item, &slug, &state.names);
    let src = item.src_url().to_string();

    match validator.validate(&name, &src).await {
        Some(file) => {
            state.packs.append(&slug, EmojiEntry { name, file, src });
        }
        None => state.packs.record_rejection(&slug),
    }
}

/// Writes each pack to its slug-derived file. Runs after collection has
/// fully drained, one file at a time.
pub async fn write_packs(
    packs: BTreeMap<String, CategoryPack>,
    layout: &StorageLayout,
) -> AppResult<usize> {
    log(LogLevel::Info, "Writing category files ...");
    let mut written = 0;
    for (slug, pack) in packs {
        log(LogLevel::Info, &format!("... {}", slug));
        io::write_pack(pack, &layout.pack_file(&slug)).await?;
        written += 1;
    }
    log(
        LogLevel::Success,
        &format!("Wrote {} pack file(s) to {}", written, layout.pack_dir().display()),
    );
    Ok(written)
}
