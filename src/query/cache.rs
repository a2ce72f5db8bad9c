use lru::LruCache;
use std::num::NonZeroUsize;
use crate::search::results::SearchOutcome;

/// Result cache keyed by raw criteria. The corpus never changes after load,
/// so entries never go stale; backspacing over a query is served from here.
pub struct QueryCache {
    pub cache: Option<LruCache<String, SearchOutcome>>,
    pub size_limit: usize,
    pub hit_count: usize,
    pub miss_count: usize,
}

impl QueryCache {
    /// A `size_limit` of zero disables caching.
    pub fn new(size_limit: usize) -> Self {
        QueryCache {
            cache: NonZeroUsize::new(size_limit).map(LruCache::new),
            size_limit,
            hit_count: 0,
            miss_count: 0,
        }
    }

    pub fn get(&mut self, criteria: &str) -> Option<SearchOutcome> {
        let cache = self.cache.as_mut()?;
        if let Some(outcome) = cache.get(criteria) {
            self.hit_count += 1;
            Some(outcome.clone())
        } else {
            self.miss_count += 1;
            None
        }
    }

    pub fn put(&mut self, criteria: &str, outcome: SearchOutcome) {
        if let Some(cache) = self.cache.as_mut() {
            cache.put(criteria.to_string(), outcome);
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hit_count: self.hit_count,
            miss_count: self.miss_count,
            size: self.cache.as_ref().map_or(0, |c| c.len()),
            capacity: self.size_limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub hit_count: usize,
    pub miss_count: usize,
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome() -> SearchOutcome {
        SearchOutcome { did_search: true, frames: Vec::new() }
    }

    #[test]
    fn hits_and_misses_are_counted() {
        let mut cache = QueryCache::new(2);
        assert!(cache.get("horse").is_none());
        cache.put("horse", outcome());
        assert_eq!(cache.get("horse"), Some(outcome()));

        let stats = cache.stats();
        assert_eq!((stats.hit_count, stats.miss_count, stats.size), (1, 1, 1));
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn least_recently_used_entry_is_evicted() {
        let mut cache = QueryCache::new(2);
        cache.put("one", outcome());
        cache.put("two", outcome());
        cache.get("one");
        cache.put("three", outcome());
        assert!(cache.get("two").is_none());
        assert!(cache.get("one").is_some());
    }

    #[test]
    fn zero_capacity_disables_the_cache() {
        let mut cache = QueryCache::new(0);
        cache.put("horse", outcome());
        assert!(cache.get("horse").is_none());
        assert_eq!(cache.stats().size, 0);
        assert_eq!(cache.stats().miss_count, 0);
    }
}
