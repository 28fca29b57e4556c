use crate::api::slack::{AddOutcome, SlackSession};
use crate::core::stats::{UploadOutcome, UploadSummary};
use crate::error::AppResult;
use crate::io;
use crate::logging::{log, LogLevel};
use crate::model::remote::RemoteNameSet;
use crate::utils::Sleeper;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameAffixes {
    pub prefix: String,
    pub suffix: String,
}

impl NameAffixes {
    pub fn new(prefix: &str, suffix: &str) -> Self {
        NameAffixes {
            prefix: prefix.trim().to_string(),
            suffix: suffix.trim().to_string(),
        }
    }

    pub fn target_name(&self, path: &Path) -> Option<String> {
        let stem = path.file_stem()?.to_str()?;
        Some(format!("{}{}{}", self.prefix, stem, self.suffix))
    }
}

pub async fn upload_file<S: Sleeper>(
    session: &SlackSession,
    remote: &RemoteNameSet,
    affixes: &NameAffixes,
    path: &Path,
    sleeper: &S,
) -> AppResult<UploadOutcome> {
    log(LogLevel::Info, &format!("Processing {}.", path.display()));

    let Some(name) = affixes.target_name(path) else {
        log(
            LogLevel::Warning,
            &format!("Cannot derive emoji name from '{}'", path.display()),
        );
        return Ok(UploadOutcome::Failed);
    };

    if remote.contains(&name) {
        log(
            LogLevel::Skip,
            &format!("Skipping {}. Emoji already exists", name),
        );
        return Ok(UploadOutcome::SkippedExists);
    }

    let data = fs::read(path).await.map_err(|e| io::map_io_error(e, path))?;
    let file_name = path
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or(name.as_str())
        .to_string();

    match session
        .add_emoji(&name, &file_name, Bytes::from(data), sleeper)
        .await?
    {
        AddOutcome::Added => {
            log(
                LogLevel::Success,
                &format!("{} upload complete.", path.display()),
            );
            Ok(UploadOutcome::Uploaded)
        }
        AddOutcome::Rejected(reason) => {
            log(
                LogLevel::Warning,
                &format!("Error with uploading {}: {}", name, reason),
            );
            Ok(UploadOutcome::Failed)
        }
    }
}

/// Uploads files strictly one after another; the destination throttles
/// globally, so there is nothing to gain from overlapping requests.
pub async fn upload_files<S: Sleeper>(
    session: &SlackSession,
    remote: &RemoteNameSet,
    affixes: &NameAffixes,
    files: &[PathBuf],
    sleeper: &S,
) -> AppResult<UploadSummary> {
    let mut summary = UploadSummary::default();
    for path in files {
        let outcome = upload_file(session, remote, affixes, path, sleeper).await?;
        summary.record(outcome);
    }
    Ok(summary)
}
