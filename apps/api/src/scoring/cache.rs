//! Bounded memo for semantic similarity results.
//!
//! Keys are position-sensitive `(text_a, text_b)` pairs: `(a, b)` and `(b, a)`
//! are distinct entries even though the similarity is symmetric.

use std::num::NonZeroUsize;

use lru::LruCache;

/// Ordered pair of raw texts.
pub type PairKey = (String, String);

/// Storage for computed similarities. Implementations decide eviction.
pub trait SimilarityCache: Send {
    fn get(&mut self, key: &PairKey) -> Option<f64>;
    fn put(&mut self, key: PairKey, value: f64);
    fn len(&self) -> usize;
}

/// Least-recently-used cache with a fixed capacity.
pub struct LruSimilarityCache {
    inner: LruCache<PairKey, f64>,
}

impl LruSimilarityCache {
    /// Returns `None` when `capacity` is zero (caching disabled).
    pub fn with_capacity(capacity: usize) -> Option<Self> {
        NonZeroUsize::new(capacity).map(|cap| Self {
            inner: LruCache::new(cap),
        })
    }
}

impl SimilarityCache for LruSimilarityCache {
    fn get(&mut self, key: &PairKey) -> Option<f64> {
        self.inner.get(key).copied()
    }

    fn put(&mut self, key: PairKey, value: f64) {
        self.inner.put(key, value);
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
