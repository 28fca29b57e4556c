use crate::config;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EmojiEntry {
    pub name: String,
    pub file: PathBuf,
    pub src: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CategoryPack {
    pub title: String,
    pub emojis: Vec<EmojiEntry>,
}

impl CategoryPack {
    pub fn for_slug(slug: &str) -> Self {
        CategoryPack {
            title: format!("{}{}", config::PACK_TITLE_PREFIX, slug),
            emojis: Vec::new(),
        }
    }

    pub fn sort_entries(&mut self) {
        self.emojis.sort_unstable_by(|a, b| a.name.cmp(&b.name));
    }
}
