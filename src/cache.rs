use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::domain::{GeneQuery, ResolvedStructureSet};

/// Caller-owned resolution cache keyed by `(gene symbol, taxon)` with an
/// explicit time-to-live. The resolver never reads ambient state; whoever
/// wants caching constructs one of these and passes it in. Entries live for
/// the configured TTL and are dropped on access once stale.
#[derive(Debug)]
pub struct ResolutionCache {
    ttl: Duration,
    entries: HashMap<(String, u32), CachedResolution>,
}

#[derive(Debug)]
struct CachedResolution {
    stored_at: Instant,
    value: ResolvedStructureSet,
}

impl ResolutionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    fn key(query: &GeneQuery) -> (String, u32) {
        (query.symbol.as_str().to_string(), query.taxon.value())
    }

    pub fn get(&mut self, query: &GeneQuery) -> Option<&ResolvedStructureSet> {
        let key = Self::key(query);
        let fresh = self
            .entries
            .get(&key)
            .is_some_and(|entry| entry.stored_at.elapsed() < self.ttl);
        if !fresh {
            self.entries.remove(&key);
            return None;
        }
        self.entries.get(&key).map(|entry| &entry.value)
    }

    pub fn insert(&mut self, value: ResolvedStructureSet) {
        let key = Self::key(&value.query);
        self.entries.insert(
            key,
            CachedResolution {
                stored_at: Instant::now(),
                value,
            },
        );
    }

    pub fn purge_expired(&mut self) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| entry.stored_at.elapsed() < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
