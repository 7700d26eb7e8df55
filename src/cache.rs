//! Memoize resolved name lists.
//!
//! Entries are keyed by `(type identity, prefix, requested labels)` and never evicted: record shapes and their
//! annotations are fixed for the life of the process, so a stored list stays correct. Two threads that miss on the
//! same key both compute and both store the same list; the last store wins.

use std::sync::Arc;

use dashmap::DashMap;

use crate::desc::TypeDesc;

/// Separator used when joining labels into a key. Labels come from comma-separated annotations, so they never
/// contain it.
const LABEL_SEPARATOR: &str = ",";

/// Cache key for one resolution request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    type_id: String,
    prefix: String,
    labels: String,
}

impl CacheKey {
    pub fn new(ty: &TypeDesc, prefix: &str, labels: &[&str]) -> Self {
        Self {
            type_id: ty.identity().into_owned(),
            prefix: prefix.to_string(),
            labels: labels.join(LABEL_SEPARATOR),
        }
    }

    pub fn type_identity(&self) -> &str {
        &self.type_id
    }
}

/// Concurrent, append-only store of resolved name lists.
#[derive(Debug, Default)]
pub struct NameCache {
    entries: DashMap<CacheKey, Arc<[String]>>,
}

impl NameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<[String]>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    pub fn insert(&self, key: CacheKey, names: Arc<[String]>) {
        self.entries.insert(key, names);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
