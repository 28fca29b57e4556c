use crate::model::pack::{CategoryPack, EmojiEntry};
use crate::transform::naming::with_occurrence_suffix;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Occurrence counts per candidate emoji name plus every final name handed
/// out so far, shared by every collection worker.
#[derive(Debug, Default)]
pub struct NameRegistry {
    inner: Mutex<Claims>,
}

#[derive(Debug, Default)]
struct Claims {
    counts: HashMap<String, u32>,
    taken: HashSet<String>,
}

impl NameRegistry {
    /// Bumps the occurrence count for `candidate` and returns the final name
    /// for it. A suffixed form that some other candidate already holds is
    /// skipped. Counting, suffixing and reserving happen under one lock, so
    /// no two callers ever get the same name.
    pub fn claim(&self, candidate: &str) -> String {
        let mut claims = lock(&self.inner);
        let Claims { counts, taken } = &mut *claims;
        let count = counts.entry(candidate.to_string()).or_insert(0);
        loop {
            *count += 1;
            let name = with_occurrence_suffix(candidate, *count);
            if taken.insert(name.clone()) {
                return name;
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct PackTally {
    pub accepted: AtomicUsize,
    pub rejected: AtomicUsize,
}

/// Packs keyed by slug. Every pack exists from construction on; workers only append.
#[derive(Debug)]
pub struct PackBook {
    packs: Mutex<BTreeMap<String, CategoryPack>>,
    tallies: BTreeMap<String, PackTally>,
}

impl PackBook {
    pub fn new<I>(slugs: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut packs = BTreeMap::new();
        let mut tallies = BTreeMap::new();
        for slug in slugs {
            packs.insert(slug.clone(), CategoryPack::for_slug(&slug));
            tallies.insert(slug, PackTally::default());
        }
        PackBook {
            packs: Mutex::new(packs),
            tallies,
        }
    }

    pub fn append(&self, slug: &str, entry: EmojiEntry) -> bool {
        let appended = match lock(&self.packs).get_mut(slug) {
            Some(pack) => {
                pack.emojis.push(entry);
                true
            }
            None => false,
        };
        if appended {
            if let Some(tally) = self.tallies.get(slug) {
                tally.accepted.fetch_add(1, Ordering::Relaxed);
            }
        }
        appended
    }

    pub fn record_rejection(&self, slug: &str) {
        if let Some(tally) = self.tallies.get(slug) {
            tally.rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn tally(&self, slug: &str) -> (usize, usize) {
        self.tallies.get(slug).map_or((0, 0), |t| {
            (
                t.accepted.load(Ordering::Relaxed),
                t.rejected.load(Ordering::Relaxed),
            )
        })
    }

    pub fn slugs(&self) -> Vec<String> {
        self.tallies.keys().cloned().collect()
    }

    pub fn into_packs(self) -> BTreeMap<String, CategoryPack> {
        self.packs
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Everything the collection workers share.
#[derive(Debug)]
pub struct CollectionState {
    pub names: NameRegistry,
    pub packs: PackBook,
}

impl CollectionState {
    pub fn new<I>(slugs: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        CollectionState {
            names: NameRegistry::default(),
            packs: PackBook::new(slugs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(name: &str) -> EmojiEntry {
        EmojiEntry {
            name: name.to_string(),
            file: PathBuf::from(format!("{}.png", name)),
            src: format!("https://x/{}.png", name),
        }
    }

    #[test]
    fn registry_suffixes_repeated_candidates() {
        let registry = NameRegistry::default();
        assert_eq!(registry.claim("a"), "a");
        assert_eq!(registry.claim("a"), "a2");
        assert_eq!(registry.claim("b"), "b");
        assert_eq!(registry.claim("a"), "a3");
    }

    #[test]
    fn registry_skips_names_held_by_other_candidates() {
        let registry = NameRegistry::default();
        assert_eq!(registry.claim("a2"), "a2");
        assert_eq!(registry.claim("a"), "a");
        assert_eq!(registry.claim("a"), "a3");
        assert_eq!(registry.claim("a2"), "a22");
    }

    #[test]
    fn packs_exist_before_any_append() {
        let book = PackBook::new(["nba".to_string(), "uncategorized".to_string()]);
        let packs = book.into_packs();
        assert_eq!(packs.len(), 2);
        assert_eq!(packs["nba"].title, "slackmoji-nba");
        assert!(packs["uncategorized"].emojis.is_empty());
    }

    #[test]
    fn append_to_unknown_slug_is_refused() {
        let book = PackBook::new(["nba".to_string()]);
        assert!(book.append("nba", entry("nba-curry")));
        assert!(!book.append("nhl", entry("nhl-puck")));
        book.record_rejection("nba");
        assert_eq!(book.tally("nba"), (1, 1));
        assert_eq!(book.into_packs()["nba"].emojis, vec![entry("nba-curry")]);
    }
}
