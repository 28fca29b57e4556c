use crate::config;
use crate::core::processor::{CollectOptions, UploadOptions};
use crate::core::uploader::NameAffixes;
use crate::error::{AppError, AppResult};
use crate::io::StorageLayout;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Collects slackmojis into category packs and bulk uploads emoji to a Slack workspace.",
    long_about = None,
    arg_required_else_help = true
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download the catalog, validate images and write one pack per category
    Collect(CollectArgs),
    /// Upload image files as custom emoji, skipping names that already exist
    Upload(UploadArgs),
}

#[derive(Args, Debug)]
pub struct CollectArgs {
    #[arg(
        long,
        default_value = config::DEFAULT_CATALOG_URL,
        value_name = "URL",
        help = "Paginated catalog endpoint"
    )]
    catalog_url: String,

    #[arg(
        long,
        default_value = config::DEFAULT_STORAGE_DIR,
        value_name = "DIR_PATH",
        help = "Storage directory for the catalog cache, downloads and packs"
    )]
    storage_dir: String,

    #[arg(
        short,
        long,
        value_name = "N",
        help = "Concurrent workers (defaults to available cores minus one)"
    )]
    workers: Option<usize>,
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    #[arg(short, long, env = "SLACK_TEAM", help = "Slack team (workspace) name")]
    team_name: Option<String>,

    #[arg(short, long, env = "SLACK_COOKIE", help = "Value of the \"d\" session cookie")]
    cookie: Option<String>,

    #[arg(
        long,
        env = "SLACK_API_TOKEN",
        help = "API token (xoxs-/xoxc-); scraped from the customize page when omitted"
    )]
    token: Option<String>,

    #[arg(
        short,
        long,
        env = "EMOJI_NAME_PREFIX",
        default_value = "",
        help = "Prefix to add to generated emoji names"
    )]
    prefix: String,

    #[arg(
        short,
        long,
        env = "EMOJI_NAME_SUFFIX",
        default_value = "",
        help = "Suffix to add to generated emoji names"
    )]
    suffix: String,

    #[arg(
        required = true,
        num_args = 1..,
        value_name = "PATH",
        help = "Image files or directories of images to upload"
    )]
    paths: Vec<PathBuf>,
}

impl CollectArgs {
    pub fn into_options(self) -> AppResult<CollectOptions> {
        let workers = match self.workers {
            Some(0) => {
                return Err(AppError::Argument(
                    "--workers must be at least 1".into(),
                ))
            }
            Some(n) => n,
            None => config::default_worker_count(),
        };
        Ok(CollectOptions {
            catalog_url: self.catalog_url,
            storage: StorageLayout::new(self.storage_dir),
            workers,
        })
    }
}

fn required(value: Option<String>, what: &str) -> AppResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Argument(format!("{} required", what)))
}

impl UploadArgs {
    pub fn into_options(self) -> AppResult<UploadOptions> {
        Ok(UploadOptions {
            team_name: required(self.team_name, "Team name (--team-name or $SLACK_TEAM)")?,
            cookie: required(self.cookie, "Cookie (--cookie or $SLACK_COOKIE)")?,
            token: self.token,
            affixes: NameAffixes::new(&self.prefix, &self.suffix),
            paths: self.paths,
        })
    }
}
