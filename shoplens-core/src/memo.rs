//! Memoization of aggregate views keyed by filtered-table identity.
//!
//! Entries never go stale: a [`TableFingerprint`] names exact row content,
//! so the only policy needed is a size bound (oldest entry evicted first).

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::aggregate::DashboardView;
use crate::domain::TableFingerprint;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[derive(Debug)]
pub struct AggregateCache {
    capacity: usize,
    entries: HashMap<TableFingerprint, Arc<DashboardView>>,
    order: VecDeque<TableFingerprint>,
    stats: CacheStats,
}

impl AggregateCache {
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            stats: CacheStats::default(),
        }
    }

    pub fn get(&self, key: &TableFingerprint) -> Option<Arc<DashboardView>> {
        self.entries.get(key).cloned()
    }

    /// Return the cached view for `key`, computing and storing it on a miss.
    pub fn get_or_compute<F>(&mut self, key: &TableFingerprint, compute: F) -> Arc<DashboardView>
    where
        F: FnOnce() -> DashboardView,
    {
        if let Some(view) = self.entries.get(key) {
            self.stats.hits += 1;
            tracing::debug!(key = key.short(), "aggregate cache hit");
            return Arc::clone(view);
        }

        self.stats.misses += 1;
        tracing::debug!(key = key.short(), "aggregate cache miss");
        let view = Arc::new(compute());
        self.insert(key.clone(), Arc::clone(&view));
        view
    }

    fn insert(&mut self, key: TableFingerprint, view: Arc<DashboardView>) {
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            self.stats.evictions += 1;
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, view);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::SummaryMetrics;
    use crate::domain::DatasetHash;

    fn key(i: usize) -> TableFingerprint {
        TableFingerprint::of_selection(&DatasetHash::from_hash("ds"), &[i])
    }

    fn view(rows: usize) -> DashboardView {
        DashboardView {
            row_count: rows,
            weekly: Vec::new(),
            categories: Vec::new(),
            payments: Vec::new(),
            rfm: Vec::new(),
            summary: SummaryMetrics::from_tables(&[], &[]),
        }
    }

    #[test]
    fn second_lookup_is_a_hit() {
        let mut cache = AggregateCache::new(4);
        let mut calls = 0;
        let a = cache.get_or_compute(&key(1), || {
            calls += 1;
            view(1)
        });
        let b = cache.get_or_compute(&key(1), || {
            calls += 1;
            view(99)
        });
        assert_eq!(calls, 1);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1, evictions: 0 });
    }

    #[test]
    fn oldest_entry_is_evicted() {
        let mut cache = AggregateCache::new(2);
        cache.get_or_compute(&key(1), || view(1));
        cache.get_or_compute(&key(2), || view(2));
        cache.get_or_compute(&key(3), || view(3));

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&key(1)).is_none());
        assert!(cache.get(&key(2)).is_some());
        assert!(cache.get(&key(3)).is_some());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn zero_capacity_still_caches_one() {
        let mut cache = AggregateCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.get_or_compute(&key(1), || view(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut cache = AggregateCache::new(2);
        cache.get_or_compute(&key(1), || view(1));
        cache.clear();
        assert!(cache.is_empty());
    }
}
