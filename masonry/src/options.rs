use alloc::sync::Arc;

use crate::masonry::Masonry;

/// Visibility threshold used when none is configured.
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 500.0;

/// Scroll throttle interval used when none is configured.
pub const DEFAULT_SCROLL_THROTTLE_MS: u64 = 100;

/// A callback fired whenever a new layout is published (after a measurement pass or a
/// viewport recompute).
pub type OnChangeCallback<K, E> = Arc<dyn Fn(&Masonry<K, E>) + Send + Sync>;

/// Maps an item index to its identity key. `None` means the item has no key, which is a
/// configuration error reported by the next pass.
pub type ItemKeyFn<K> = Arc<dyn Fn(usize) -> Option<K> + Send + Sync>;

/// Configuration for [`crate::Masonry`].
///
/// Cheap to clone: the key mapping and callback are stored in `Arc`s, so adapters can tweak a
/// few fields and call `Masonry::set_options` without reallocating closures.
pub struct MasonryOptions<K = u64, E = u64> {
    pub count: usize,
    pub get_item_key: ItemKeyFn<K>,

    /// Number of columns. Must be at least 1.
    pub columns: usize,
    /// Vertical space between items of a column.
    pub row_gap: f64,
    /// Horizontal space between columns.
    pub column_gap: f64,

    /// Absolute offset of the grid's top inside the scroll content.
    ///
    /// The first item of every column is placed here. Use it when the grid starts below a
    /// header inside the scroll container.
    pub origin_top: f64,

    /// Whether measured heights are cached per key for the current cache epoch.
    pub cache_item_heights: bool,

    /// Whether output is windowed against the viewport reported by the adapter.
    pub virtualize: bool,
    /// How far outside the viewport (on both edges) items still count as visible.
    pub visibility_threshold: f64,
    /// Minimum interval between two scroll-driven recomputes.
    pub scroll_throttle_ms: u64,

    pub on_change: Option<OnChangeCallback<K, E>>,
}

impl<K, E> Clone for MasonryOptions<K, E> {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            get_item_key: Arc::clone(&self.get_item_key),
            columns: self.columns,
            row_gap: self.row_gap,
            column_gap: self.column_gap,
            origin_top: self.origin_top,
            cache_item_heights: self.cache_item_heights,
            virtualize: self.virtualize,
            visibility_threshold: self.visibility_threshold,
            scroll_throttle_ms: self.scroll_throttle_ms,
            on_change: self.on_change.clone(),
        }
    }
}

impl MasonryOptions<u64> {
    /// Creates options for items keyed by index.
    ///
    /// Index keys do not follow items across reordering; use [`Self::new_with_key`] when the
    /// item set can be reordered or replaced.
    pub fn new(count: usize, columns: usize) -> Self {
        Self::new_with_optional_key(count, columns, index_key)
    }
}

fn index_key(index: usize) -> Option<u64> {
    Some(index as u64)
}

impl<K, E> MasonryOptions<K, E> {
    /// Creates options with a stable identity key per item.
    pub fn new_with_key(
        count: usize,
        columns: usize,
        get_item_key: impl Fn(usize) -> K + Send + Sync + 'static,
    ) -> Self {
        Self::new_with_optional_key(count, columns, move |i| Some(get_item_key(i)))
    }

    /// Creates options for item sources that may lack a key.
    ///
    /// An item without a key fails the next layout pass with [`crate::LayoutError::MissingKey`].
    pub fn new_with_optional_key(
        count: usize,
        columns: usize,
        get_item_key: impl Fn(usize) -> Option<K> + Send + Sync + 'static,
    ) -> Self {
        Self {
            count,
            get_item_key: Arc::new(get_item_key),
            columns,
            row_gap: 0.0,
            column_gap: 0.0,
            origin_top: 0.0,
            cache_item_heights: false,
            virtualize: false,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            scroll_throttle_ms: DEFAULT_SCROLL_THROTTLE_MS,
            on_change: None,
        }
    }

    pub fn with_get_item_key(
        mut self,
        get_item_key: impl Fn(usize) -> K + Send + Sync + 'static,
    ) -> Self {
        self.get_item_key = Arc::new(move |i| Some(get_item_key(i)));
        self
    }

    pub fn with_gaps(mut self, row_gap: f64, column_gap: f64) -> Self {
        self.row_gap = row_gap;
        self.column_gap = column_gap;
        self
    }

    pub fn with_origin_top(mut self, origin_top: f64) -> Self {
        self.origin_top = origin_top;
        self
    }

    pub fn with_cache_item_heights(mut self, cache_item_heights: bool) -> Self {
        self.cache_item_heights = cache_item_heights;
        self
    }

    pub fn with_virtualize(mut self, virtualize: bool) -> Self {
        self.virtualize = virtualize;
        self
    }

    pub fn with_visibility_threshold(mut self, threshold: f64) -> Self {
        self.visibility_threshold = threshold;
        self
    }

    pub fn with_scroll_throttle_ms(mut self, interval_ms: u64) -> Self {
        self.scroll_throttle_ms = interval_ms;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Masonry<K, E>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl<K, E> core::fmt::Debug for MasonryOptions<K, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MasonryOptions")
            .field("count", &self.count)
            .field("columns", &self.columns)
            .field("row_gap", &self.row_gap)
            .field("column_gap", &self.column_gap)
            .field("origin_top", &self.origin_top)
            .field("cache_item_heights", &self.cache_item_heights)
            .field("virtualize", &self.virtualize)
            .field("visibility_threshold", &self.visibility_threshold)
            .field("scroll_throttle_ms", &self.scroll_throttle_ms)
            .finish_non_exhaustive()
    }
}
