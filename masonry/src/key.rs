/// Per-key storage for measured heights and duplicate-key detection.
///
/// Hashed with `std`; ordered without it, so `no_std` keys only need `Ord`.
#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = std::collections::HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = alloc::collections::BTreeMap<K, V>;

/// Bound on item identity keys: whatever `KeyMap` needs to index by them.
#[cfg(feature = "std")]
#[doc(hidden)]
pub trait KeyCacheKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> KeyCacheKey for K {}

#[cfg(not(feature = "std"))]
#[doc(hidden)]
pub trait KeyCacheKey: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> KeyCacheKey for K {}
