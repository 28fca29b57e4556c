use crate::api::client::ApiClient;
use crate::api::fetchers;
use crate::config;
use crate::error::{AppError, AppResult};
use crate::io;
use crate::logging::{log, LogLevel};
use crate::utils;
use bytes::Bytes;
use image::ImageReader;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inspection {
    Accepted(PathBuf),
    Oversize {
        path: PathBuf,
        width: u32,
        height: u32,
    },
}

pub struct AssetValidator {
    client: ApiClient,
    download_dir: PathBuf,
    max_edge: u32,
}

impl AssetValidator {
    pub fn new(client: ApiClient, download_dir: PathBuf) -> Self {
        AssetValidator {
            client,
            download_dir,
            max_edge: config::MAX_EMOJI_EDGE,
        }
    }

    pub fn local_path(&self, name: &str, src: &str) -> PathBuf {
        self.download_dir.join(local_file_name(name, src))
    }

    /// Returns the cached image path when the asset is usable. Every failure
    /// is logged and reported as `None`; nothing here aborts the batch.
    pub async fn validate(&self, name: &str, src: &str) -> Option<PathBuf> {
        match self.inspect(name, src).await {
            Ok(Inspection::Accepted(path)) => Some(path),
            Ok(Inspection::Oversize {
                path,
                width,
                height,
            }) => {
                log(
                    LogLevel::Skip,
                    &format!(
                        ":{}: ({}) is ({}, {})\t{}",
                        name,
                        path.display(),
                        width,
                        height,
                        src
                    ),
                );
                None
            }
            Err(e) => {
                log(
                    LogLevel::Warning,
                    &format!(
                        ":{}: ({}) - rejected - {}",
                        name,
                        self.local_path(name, src).display(),
                        e
                    ),
                );
                None
            }
        }
    }

    pub async fn inspect(&self, name: &str, src: &str) -> AppResult<Inspection> {
        let path = self.local_path(name, src);
        let body = self.load_or_fetch(&path, src).await?;
        let (width, height) = utils::run_blocking(move || image_dimensions(body)).await?;

        if width > self.max_edge || height > self.max_edge {
            Ok(Inspection::Oversize {
                path,
                width,
                height,
            })
        } else {
            Ok(Inspection::Accepted(path))
        }
    }

    // The download is persisted before decoding, so rejected files stay on
    // disk for inspection and later runs skip the fetch.
    async fn load_or_fetch(&self, path: &Path, src: &str) -> AppResult<Bytes> {
        if fs::try_exists(path).await.unwrap_or(false) {
            let data = fs::read(path).await.map_err(|e| io::map_io_error(e, path))?;
            return Ok(Bytes::from(data));
        }
        let body = fetchers::fetch_asset(&self.client, src).await?;
        io::write_file_async(path, &body).await?;
        Ok(body)
    }
}

pub fn local_file_name(name: &str, src: &str) -> String {
    let last_segment = src.rsplit('/').next().unwrap_or_default();
    match last_segment.rfind('.') {
        Some(idx) if idx > 0 => format!("{}{}", name, &last_segment[idx..]),
        _ => name.to_string(),
    }
}

pub fn image_dimensions(body: Bytes) -> AppResult<(u32, u32)> {
    ImageReader::new(Cursor::new(body.as_ref()))
        .with_guessed_format()
        .map_err(AppError::from)?
        .into_dimensions()
        .map_err(AppError::from)
}
