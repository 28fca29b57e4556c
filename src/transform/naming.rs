use crate::config;
use crate::core::state::NameRegistry;
use crate::model::catalog::SourceItem;

// Slack already has distinct :yes:, :yes2:, :no:, :no2: emoji.
const LITERAL_OVERRIDES: [(&str, &str); 2] = [("yes2", "yes2-1"), ("no2", "no2-1")];

pub fn rewrite_name(raw: &str, slug: &str) -> String {
    let mut name = LITERAL_OVERRIDES
        .iter()
        .find(|(from, _)| *from == raw)
        .map(|(_, to)| to.to_string())
        .unwrap_or_else(|| raw.to_string());

    if config::SPORTS_SLUGS.contains(slug) && name != slug {
        name = format!("{}-{}", slug, name);
    }
    if slug.contains("facebook") {
        name = format!("fb-{}", name);
    }
    if slug.contains("scrabble") {
        name = format!("scrabble-{}", name);
    }
    name
}

pub fn with_occurrence_suffix(name: &str, occurrence: u32) -> String {
    if occurrence > 1 {
        format!("{}{}", name, occurrence)
    } else {
        name.to_string()
    }
}

pub fn resolve_name(item: &SourceItem, slug: &str, registry: &NameRegistry) -> String {
    registry.claim(&rewrite_name(&item.name, slug))
}
