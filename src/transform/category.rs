use crate::config;
use crate::model::catalog::SourceItem;
use std::collections::BTreeSet;

pub fn category_slug(item: &SourceItem) -> String {
    item.category
        .as_ref()
        .map(|c| c.name.as_str())
        .filter(|name| !name.trim().is_empty())
        .map(|name| name.to_lowercase().replace(' ', "-"))
        .unwrap_or_else(|| config::UNCATEGORIZED_SLUG.to_string())
}

pub fn collect_slugs(items: &[SourceItem]) -> BTreeSet<String> {
    let mut slugs: BTreeSet<String> = items.iter().map(category_slug).collect();
    slugs.insert(config::UNCATEGORIZED_SLUG.to_string());
    slugs
}
