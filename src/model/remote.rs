use std::collections::HashSet;

/// Emoji names already present in the destination workspace, fetched once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteNameSet(HashSet<String>);

impl RemoteNameSet {
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<String> for RemoteNameSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        RemoteNameSet(iter.into_iter().collect())
    }
}
