#[cfg(feature = "std")]
pub trait MasonryKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<T: core::hash::Hash + Eq + Clone> MasonryKey for T {}

#[cfg(not(feature = "std"))]
pub trait MasonryKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<T: Ord + Clone> MasonryKey for T {}
