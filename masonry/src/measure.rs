use alloc::vec::Vec;

use crate::MeasurementCache;
use crate::key::KeyCacheKey;

/// The hidden replica of the full item list that heights are read from.
///
/// Adapters mount every item into a single column of [`MeasurePass::column_width`], invisible
/// and excluded from hit testing and accessibility, and implement this trait on top of it.
pub trait MeasureSurface {
    /// Whether the replica is mounted and its layout has been committed.
    ///
    /// Returning `false` turns the pass into a no-op; the engine waits for the next trigger.
    fn is_ready(&self) -> bool;

    /// The rendered height of the replica's child at `index`.
    fn item_height(&mut self, index: usize) -> f64;
}

impl<S: MeasureSurface + ?Sized> MeasureSurface for &mut S {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn item_height(&mut self, index: usize) -> f64 {
        (**self).item_height(index)
    }
}

/// A surface backed by precomputed heights, useful for tests and non-DOM renderers that know
/// their sizes up front.
impl MeasureSurface for [f64] {
    fn is_ready(&self) -> bool {
        true
    }

    fn item_height(&mut self, index: usize) -> f64 {
        self.get(index).copied().unwrap_or(0.0)
    }
}

/// A measurement pass the adapter must mount before calling
/// [`Masonry::complete_pass`](crate::Masonry::complete_pass).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasurePass {
    /// Monotonic id of the pass.
    pub generation: u64,
    /// Number of items to mount in the replica.
    pub count: usize,
    /// Width of the replica column.
    pub column_width: f64,
    /// Gap between the replica's items.
    pub row_gap: f64,
}

/// Reads index-aligned heights for `keys`, preferring cached values.
///
/// The surface is only asked for keys the cache does not know; positive readings are written
/// back to the cache (a no-op when caching is disabled). Zero and invalid readings are used for
/// this pass only, so the next pass asks the surface again. Returns `None` when the surface is
/// not ready.
pub fn measure_heights<'k, K, E, S>(
    keys: impl IntoIterator<Item = &'k K>,
    cache: &mut MeasurementCache<K, E>,
    surface: &mut S,
) -> Option<Vec<f64>>
where
    K: KeyCacheKey + Clone + 'k,
    E: PartialEq,
    S: MeasureSurface + ?Sized,
{
    if !surface.is_ready() {
        mdebug!("measure_heights: surface not ready");
        return None;
    }

    let keys = keys.into_iter();
    let mut heights = Vec::with_capacity(keys.size_hint().0);
    for (index, key) in keys.enumerate() {
        if let Some(h) = cache.get(key) {
            heights.push(h);
            continue;
        }
        let h = sanitize_height(index, surface.item_height(index));
        if h > 0.0 {
            cache.put(key.clone(), h);
        }
        heights.push(h);
    }

    mtrace!(items = heights.len(), cached = cache.len(), "measure_heights");
    Some(heights)
}

/// Negative or non-finite readings come from reads that raced a layout commit. They are
/// clamped to zero and never cached.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn sanitize_height(index: usize, height: f64) -> f64 {
    if height.is_finite() && height >= 0.0 {
        return height;
    }
    mwarn!(index, height, "measure_heights: invalid height reading");
    0.0
}
