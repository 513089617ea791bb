//! Compute-once storage for fit results.
//!
//! Every entry is published at most once and never mutated afterwards. Two
//! callers racing on an empty entry may both run the computation, but only
//! the first result to reach the write lock is published and every caller,
//! including the loser of the race, gets that published value back.
//!
//! Failures are cached too, so a chart whose data cannot be fitted reports
//! the same error on every access.

use std::{collections::HashMap, fmt, hash::Hash, sync::Arc};

use parking_lot::RwLock;
use tracing::{debug, trace, warn};

/// A memo table keyed by `K`, holding shared values or cached errors.
pub struct FitCache<K, V, E> {
    entries: RwLock<HashMap<K, Result<Arc<V>, E>>>,
}

impl<K, V, E> FitCache<K, V, E>
where
    K: Eq + Hash + Clone + fmt::Debug,
    E: Clone + fmt::Display,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the published value for `key`, computing it on first access.
    ///
    /// `compute` runs without any lock held, so it may itself read other
    /// entries of this cache.
    ///
    /// # Errors
    ///
    /// Returns the error produced by the first published computation for `key`.
    pub fn get_or_compute<F>(&self, key: K, compute: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(published) = self.get(&key) {
            trace!(?key, "fit cache hit");
            return published;
        }

        debug!(?key, "computing fit cache entry");
        let computed = compute().map(Arc::new);
        if let Err(error) = &computed {
            warn!(?key, %error, "caching failed fit");
        }

        self.entries.write().entry(key).or_insert(computed).clone()
    }

    /// Returns the published entry for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<Result<Arc<V>, E>> {
        self.entries.read().get(key).cloned()
    }

    /// Number of published entries, failures included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<K, V, E> Default for FitCache<K, V, E>
where
    K: Eq + Hash + Clone + fmt::Debug,
    E: Clone + fmt::Display,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V, E> fmt::Debug for FitCache<K, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.read();
        f.debug_struct("FitCache")
            .field("keys", &entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        thread,
    };

    use super::*;

    #[test]
    fn computes_once_and_shares_value() {
        let cache: FitCache<&str, Vec<f64>, String> = FitCache::new();
        let calls = AtomicUsize::new(0);

        let compute = || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![1.0, 2.0])
        };
        let first = cache.get_or_compute("volute_constant.coeffs", compute).unwrap();
        let second = cache
            .get_or_compute("volute_constant.coeffs", || Ok(vec![9.0]))
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*second, vec![1.0, 2.0]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_are_independent() {
        let cache: FitCache<&str, u32, String> = FitCache::default();
        let a = cache.get_or_compute("a", || Ok(1)).unwrap();
        let b = cache.get_or_compute("b", || Ok(2)).unwrap();
        assert_eq!((*a, *b), (1, 2));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failures_are_cached() {
        let cache: FitCache<&str, u32, String> = FitCache::new();
        let first = cache.get_or_compute("bad", || Err("too few samples".to_string()));
        let second = cache.get_or_compute("bad", || Ok(7));

        assert_eq!(first, Err("too few samples".to_string()));
        assert_eq!(second, first);
        assert!(!cache.is_empty());
    }

    #[test]
    fn concurrent_readers_see_one_published_value() {
        let cache: FitCache<u8, Vec<f64>, String> = FitCache::new();

        let results: Vec<Arc<Vec<f64>>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| cache.get_or_compute(0, || Ok(vec![0.5; 4])).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let published = cache.get(&0).unwrap().unwrap();
        for result in &results {
            assert!(Arc::ptr_eq(result, &published));
        }
    }
}
