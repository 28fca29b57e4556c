use crate::core::state::PackBook;
use crate::logging::{log, LogLevel};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackStats {
    pub slug: String,
    pub accepted: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CollectionStats {
    pub catalog_items: usize,
    pub failed_tasks: usize,
    pub packs: Vec<PackStats>,
}

impl CollectionStats {
    pub fn from_book(book: &PackBook, catalog_items: usize, failed_tasks: usize) -> Self {
        let packs = book
            .slugs()
            .into_iter()
            .map(|slug| {
                let (accepted, rejected) = book.tally(&slug);
                PackStats {
                    slug,
                    accepted,
                    rejected,
                }
            })
            .collect();
        CollectionStats {
            catalog_items,
            failed_tasks,
            packs,
        }
    }

    pub fn accepted(&self) -> usize {
        self.packs.iter().map(|p| p.accepted).sum()
    }

    pub fn rejected(&self) -> usize {
        self.packs.iter().map(|p| p.rejected).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded,
    SkippedExists,
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub uploaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl UploadSummary {
    pub fn record(&mut self, outcome: UploadOutcome) {
        match outcome {
            UploadOutcome::Uploaded => self.uploaded += 1,
            UploadOutcome::SkippedExists => self.skipped += 1,
            UploadOutcome::Failed => self.failed += 1,
        }
    }
}

pub fn print_collection_summary(stats: &CollectionStats, duration: Duration) {
    let sep = "=".repeat(60);
    println!("\n{}\n{:^60}\n{}", sep, "Collection Summary", sep);
    println!("Catalog Items:     {}", stats.catalog_items);
    println!("Total Run Time:    {:.3?}", duration);
    println!("{}", "-".repeat(60));
    println!("{:<36} {:<10} {:<10}", "Pack", "Accepted", "Rejected");
    println!("{}", "-".repeat(60));
    for pack in &stats.packs {
        println!(
            "{:<36} {:<10} {:<10}",
            pack.slug, pack.accepted, pack.rejected
        );
    }
    println!("{}", "-".repeat(60));
    println!(
        "{:<36} {:<10} {:<10}",
        "TOTALS",
        stats.accepted(),
        stats.rejected()
    );
    println!("{}", sep);

    if stats.failed_tasks > 0 {
        log(
            LogLevel::Error,
            &format!(
                "Collection completed with {} worker task(s) failing. Check logs.",
                stats.failed_tasks
            ),
        );
    } else {
        log(
            LogLevel::Success,
            &format!(
                "Collection completed: {} emoji across {} pack(s).",
                stats.accepted(),
                stats.packs.len()
            ),
        );
    }
    log_finished();
}

pub fn print_upload_summary(summary: &UploadSummary, duration: Duration) {
    println!(
        "\nUploaded {} emojis. ({} already existed, {} rejected by the destination)",
        summary.uploaded, summary.skipped, summary.failed
    );
    println!("Total Run Time:    {:.3?}", duration);
    if summary.failed > 0 {
        log(
            LogLevel::Warning,
            &format!(
                "{} upload(s) were refused by the destination. See warnings above.",
                summary.failed
            ),
        );
    }
    log_finished();
}

fn log_finished() {
    let end_ts_str = chrono::Utc::now()
        .format("%Y-%m-%d %H:%M:%S %Z")
        .to_string();
    log(
        LogLevel::Step,
        &format!("--- Run Finished at {} ---", end_ts_str),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_summary_counts_outcomes() {
        let mut summary = UploadSummary::default();
        summary.record(UploadOutcome::Uploaded);
        summary.record(UploadOutcome::SkippedExists);
        summary.record(UploadOutcome::SkippedExists);
        summary.record(UploadOutcome::Failed);
        assert_eq!(
            summary,
            UploadSummary {
                uploaded: 1,
                skipped: 2,
                failed: 1
            }
        );
    }

    #[test]
    fn collection_stats_follow_tallies() {
        let book = PackBook::new(["nba".to_string(), "uncategorized".to_string()]);
        book.record_rejection("nba");
        book.record_rejection("uncategorized");
        let stats = CollectionStats::from_book(&book, 2, 0);
        assert_eq!(stats.accepted(), 0);
        assert_eq!(stats.rejected(), 2);
        assert_eq!(stats.packs[0].slug, "nba");
    }
}
