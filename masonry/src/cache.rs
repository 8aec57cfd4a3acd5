use crate::key::{KeyCacheKey, KeyMap};

/// Key → measured height cache, valid for one cache epoch.
///
/// This is a correctness cache, not a capacity-bounded one: it only ever shrinks through a
/// full [`clear`](Self::clear), which happens when the epoch token changes or caching is
/// toggled.
#[derive(Clone, Debug)]
pub struct MeasurementCache<K, E = u64> {
    heights: KeyMap<K, f64>,
    enabled: bool,
    epoch: Option<E>,
}

impl<K: KeyCacheKey, E: PartialEq> MeasurementCache<K, E> {
    pub fn new(enabled: bool) -> Self {
        Self {
            heights: KeyMap::new(),
            enabled,
            epoch: None,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables caching. Any change clears the cache.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        self.clear();
    }

    pub fn epoch(&self) -> Option<&E> {
        self.epoch.as_ref()
    }

    /// Moves the cache to `epoch`. Returns `true` when that cleared the cache.
    pub fn set_epoch(&mut self, epoch: E) -> bool {
        if self.epoch.as_ref() == Some(&epoch) {
            return false;
        }
        mdebug!(cached = self.heights.len(), "MeasurementCache: epoch changed");
        self.epoch = Some(epoch);
        self.clear();
        true
    }

    pub fn get(&self, key: &K) -> Option<f64> {
        if !self.enabled {
            return None;
        }
        self.heights.get(key).copied()
    }

    pub fn put(&mut self, key: K, height: f64) {
        if !self.enabled {
            return;
        }
        self.heights.insert(key, height);
    }

    pub fn clear(&mut self) {
        self.heights.clear();
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Iterates over the cached heights without allocations.
    pub fn for_each(&self, mut f: impl FnMut(&K, f64)) {
        for (k, v) in self.heights.iter() {
            f(k, *v);
        }
    }
}

impl<K: KeyCacheKey, E: PartialEq> Default for MeasurementCache<K, E> {
    fn default() -> Self {
        Self::new(true)
    }
}
