use crate::config;
use crate::error::{AppError, AppResult};
use crate::logging::{log, LogLevel};
use crate::model::pack::CategoryPack;
use crate::utils;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone)]
pub struct StorageLayout {
    pub root: PathBuf,
}

impl StorageLayout {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        StorageLayout { root: root.into() }
    }

    pub fn download_dir(&self) -> PathBuf {
        self.root.join(config::DOWNLOAD_SUBDIR)
    }

    pub fn pack_dir(&self) -> PathBuf {
        self.root.join(config::PACK_SUBDIR)
    }

    pub fn catalog_cache(&self) -> PathBuf {
        self.root.join(config::CATALOG_CACHE_FILE)
    }

    pub fn pack_file(&self, slug: &str) -> PathBuf {
        pack_file_path(&self.pack_dir(), slug)
    }
}

pub fn pack_file_path(pack_dir: &Path, slug: &str) -> PathBuf {
    pack_dir.join(format!(
        "{}{}.{}",
        config::PACK_FILE_PREFIX,
        slug,
        config::PACK_FILE_EXT
    ))
}

pub async fn ensure_storage_directories(layout: &StorageLayout) -> AppResult<()> {
    log(
        LogLevel::Info,
        &format!(
            "Ensuring storage directories exist under: {}",
            layout.root.display()
        ),
    );

    for dir_path in [layout.root.clone(), layout.download_dir(), layout.pack_dir()] {
        fs::create_dir_all(&dir_path)
            .await
            .map_err(|e| map_io_error(e, &dir_path))?;
    }
    Ok(())
}

pub fn map_io_error(error: std::io::Error, path: &Path) -> AppError {
    AppError::Io(format!("I/O error at path '{}': {}", path.display(), error))
}

pub async fn write_file_async(fpath: &Path, data: &[u8]) -> AppResult<()> {
    let mut file = File::create(fpath)
        .await
        .map_err(|e| map_io_error(e, fpath))?;
    file.write_all(data)
        .await
        .map_err(|e| map_io_error(e, fpath))?;
    file.flush().await.map_err(|e| map_io_error(e, fpath))?;

    Ok(())
}

async fn save_serialized<T, F>(fpath: &Path, data: T, log_ctx: &str, encode: F) -> AppResult<()>
where
    T: Send + 'static,
    F: FnOnce(&T) -> AppResult<String> + Send + 'static,
{
    let encoded = match utils::run_blocking(move || encode(&data)).await {
        Ok(encoded) => encoded,
        Err(e) => {
            log(
                LogLevel::Error,
                &format!(
                    "Save ({}) FAIL - Serialize/Task Error: {}. File: '{}'",
                    log_ctx,
                    e,
                    fpath.display()
                ),
            );
            return Err(e);
        }
    };

    if let Err(e) = write_file_async(fpath, encoded.as_bytes()).await {
        log(
            LogLevel::Error,
            &format!(
                "Save ({}) FAIL - Write Error: {}. File: '{}'",
                log_ctx,
                e,
                fpath.display()
            ),
        );
        if fs::try_exists(fpath).await.unwrap_or(false) {
            let _ = fs::remove_file(fpath).await;
        }
        return Err(e);
    }
    Ok(())
}

pub async fn save_json<T>(fpath: &Path, data: T, log_ctx: &str) -> AppResult<()>
where
    T: Serialize + Send + Sync + 'static,
{
    save_serialized(fpath, data, log_ctx, |d| {
        serde_json::to_string(d).map_err(AppError::from)
    })
    .await
}

pub async fn save_yaml<T>(fpath: &Path, data: T, log_ctx: &str) -> AppResult<()>
where
    T: Serialize + Send + Sync + 'static,
{
    save_serialized(fpath, data, log_ctx, |d| {
        serde_yml::to_string(d).map_err(AppError::from)
    })
    .await
}

pub async fn load_json<T>(fpath: &Path) -> AppResult<T>
where
    T: DeserializeOwned,
{
    let bytes = fs::read(fpath).await.map_err(|e| map_io_error(e, fpath))?;
    serde_json::from_slice(&bytes).map_err(|e| {
        AppError::Parse(format!("Failed to parse '{}': {}", fpath.display(), e))
    })
}

/// Writes one pack, replacing whatever file was at `fpath`.
pub async fn write_pack(mut pack: CategoryPack, fpath: &Path) -> AppResult<()> {
    pack.sort_entries();
    let log_ctx = format!("Pack '{}'", pack.title);
    save_yaml(fpath, pack, &log_ctx).await
}

/// Expands each input path: directories contribute their direct regular
/// files (sorted, non-recursive), anything else is taken verbatim.
pub async fn expand_upload_paths(inputs: &[PathBuf]) -> AppResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        let is_dir = fs::metadata(input)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_dir {
            files.push(input.clone());
            continue;
        }

        let mut dir_files = Vec::new();
        let mut entries = fs::read_dir(input)
            .await
            .map_err(|e| map_io_error(e, input))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| map_io_error(e, input))?
        {
            let is_file = entry
                .file_type()
                .await
                .map(|ft| ft.is_file())
                .unwrap_or(false);
            if is_file {
                dir_files.push(entry.path());
            }
        }
        dir_files.sort();
        files.extend(dir_files);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::pack::EmojiEntry;

    #[test]
    fn pack_paths_follow_slug() {
        let layout = StorageLayout::new("storage");
        assert_eq!(
            layout.pack_file("nba"),
            PathBuf::from("storage/packs/slackmojis-nba.yaml")
        );
        assert_eq!(
            layout.catalog_cache(),
            PathBuf::from("storage/slackmojis.json")
        );
    }

    #[tokio::test]
    async fn write_pack_overwrites_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let path = pack_file_path(dir.path(), "blobs");
        std::fs::write(&path, "stale: true\n").unwrap();

        let mut pack = CategoryPack::for_slug("blobs");
        for name in ["zeta", "alpha"] {
            pack.emojis.push(EmojiEntry {
                name: name.to_string(),
                file: PathBuf::from(format!("storage/downloaded/{}.gif", name)),
                src: format!("https://x/{}.gif", name),
            });
        }
        write_pack(pack, &path).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("stale"));
        let parsed: CategoryPack = serde_yml::from_str(&text).unwrap();
        assert_eq!(parsed.title, "slackmoji-blobs");
        let names: Vec<&str> = parsed.emojis.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn empty_pack_is_still_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = pack_file_path(dir.path(), "uncategorized");
        write_pack(CategoryPack::for_slug("uncategorized"), &path)
            .await
            .unwrap();
        let parsed: CategoryPack =
            serde_yml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(parsed.emojis.is_empty());
    }

    #[tokio::test]
    async fn expands_directories_one_level() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.png"), b"b").unwrap();
        std::fs::write(dir.path().join("a.gif"), b"a").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("c.png"), b"c").unwrap();
        let single = PathBuf::from("/somewhere/party.gif");

        let files = expand_upload_paths(&[dir.path().to_path_buf(), single.clone()])
            .await
            .unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.gif"), dir.path().join("b.png"), single]
        );
    }
}
