//! Language identifiers and deduplicated sets of them

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, case-sensitive token naming a highlighting language
///
/// No normalization is performed: `Rust` and `rust` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageId(String);

impl LanguageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LanguageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for LanguageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Deduplicated languages in order of first appearance
///
/// Only built by collecting an iterator, so a set handed to the loader cannot
/// change afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LanguageSet {
    ids: Vec<LanguageId>,
}

impl LanguageSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, id: LanguageId) -> bool {
        if self.contains(id.as_str()) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LanguageId> {
        self.ids.iter()
    }
}

impl FromIterator<LanguageId> for LanguageSet {
    fn from_iter<I: IntoIterator<Item = LanguageId>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl<'a> IntoIterator for &'a LanguageSet {
    type Item = &'a LanguageId;
    type IntoIter = std::slice::Iter<'a, LanguageId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
