use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::key::{KeyCacheKey, KeyMap};
use crate::measure::measure_heights;
use crate::{
    BalancedLayout, ItemKeyFn, LayoutError, LayoutPhase, MasonryOptions, MeasurePass,
    MeasureSurface, MeasurementCache, PlacedItemKeyed, Throttle, Viewport, WindowedLayout,
    balance, window,
};

/// A requested pass together with the key mapping of the item set the replica was mounted
/// for. Later item changes queue another pass instead of leaking into this one.
struct InFlight<K> {
    pass: MeasurePass,
    get_item_key: ItemKeyFn<K>,
}

impl<K> Clone for InFlight<K> {
    fn clone(&self) -> Self {
        Self {
            pass: self.pass,
            get_item_key: Arc::clone(&self.get_item_key),
        }
    }
}

impl<K> fmt::Debug for InFlight<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InFlight")
            .field("pass", &self.pass)
            .finish_non_exhaustive()
    }
}

/// A headless masonry layout engine.
///
/// The engine holds no UI objects and owns no timers. Your adapter drives it:
/// - triggers (`set_*`, [`Self::on_content_resize`]) request a measurement pass;
/// - the adapter mounts the hidden replica described by [`Self::pending_pass`] and, once its
///   layout is committed, calls [`Self::complete_pass`] to measure, balance and publish;
/// - scroll notifications go through [`Self::on_scroll`] and are applied by [`Self::tick`] at
///   most once per throttle interval.
///
/// Every pass recomputes the whole layout from measured heights; nothing is patched in place.
#[derive(Clone, Debug)]
pub struct Masonry<K = u64, E = u64> {
    options: MasonryOptions<K, E>,
    cache: MeasurementCache<K, E>,

    phase: LayoutPhase,
    pending: Option<InFlight<K>>,
    queued: usize,
    generation: u64,
    published: Option<u64>,
    torn_down: bool,

    container_width: Option<f64>,
    viewport: Option<Viewport>,
    scroll: Throttle<Viewport>,

    keys: Vec<K>,
    balanced: BalancedLayout,
    windowed: WindowedLayout,
}

impl<K: KeyCacheKey + Clone, E: PartialEq> Masonry<K, E> {
    /// Creates an engine in the [`LayoutPhase::Uninitialized`] phase.
    ///
    /// No pass is requested yet; call [`Self::request_layout`] (or any other trigger) once the
    /// adapter can mount the measurement replica.
    pub fn new(options: MasonryOptions<K, E>) -> Result<Self, LayoutError> {
        let options = normalize(options)?;
        mdebug!(
            count = options.count,
            columns = options.columns,
            virtualize = options.virtualize,
            "Masonry::new"
        );
        let balanced = empty_layout(options.columns, options.row_gap);
        let windowed = window(&balanced, None, options.visibility_threshold);
        Ok(Self {
            cache: MeasurementCache::new(options.cache_item_heights),
            phase: LayoutPhase::Uninitialized,
            pending: None,
            queued: 0,
            generation: 0,
            published: None,
            torn_down: false,
            container_width: None,
            viewport: None,
            scroll: Throttle::new(options.scroll_throttle_ms),
            keys: Vec::new(),
            balanced,
            windowed,
            options,
        })
    }

    pub fn options(&self) -> &MasonryOptions<K, E> {
        &self.options
    }

    /// Replaces the options, requesting a pass when anything that affects placement changed.
    ///
    /// Options with a column count of zero are rejected and leave the engine untouched.
    /// Negative or NaN gaps and thresholds are clamped to zero.
    pub fn set_options(&mut self, options: MasonryOptions<K, E>) -> Result<(), LayoutError> {
        let options = normalize(options)?;
        let prev = core::mem::replace(&mut self.options, options);
        mtrace!(
            count = self.options.count,
            columns = self.options.columns,
            "Masonry::set_options"
        );

        self.cache.set_enabled(self.options.cache_item_heights);
        self.scroll.set_interval_ms(self.options.scroll_throttle_ms);
        if !self.options.virtualize {
            self.scroll.cancel();
        }

        let relayout = prev.count != self.options.count
            || prev.columns != self.options.columns
            || prev.row_gap != self.options.row_gap
            || prev.column_gap != self.options.column_gap
            || prev.origin_top != self.options.origin_top
            || prev.cache_item_heights != self.options.cache_item_heights
            || !Arc::ptr_eq(&prev.get_item_key, &self.options.get_item_key);
        if relayout {
            self.request_layout();
        } else if prev.virtualize != self.options.virtualize
            || prev.visibility_threshold != self.options.visibility_threshold
        {
            self.rewindow();
        }
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to [`Self::set_options`].
    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut MasonryOptions<K, E>),
    ) -> Result<(), LayoutError> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    pub fn set_columns(&mut self, columns: usize) -> Result<(), LayoutError> {
        if columns == 0 {
            mwarn!("Masonry::set_columns: column count must be at least 1");
            return Err(LayoutError::InvalidColumns);
        }
        if self.options.columns == columns {
            return Ok(());
        }
        self.options.columns = columns;
        self.request_layout();
        Ok(())
    }

    /// Sets the row and column gaps. Negative or NaN gaps are clamped to zero.
    pub fn set_gaps(&mut self, row_gap: f64, column_gap: f64) {
        let row_gap = non_negative(row_gap, "row_gap");
        let column_gap = non_negative(column_gap, "column_gap");
        if self.options.row_gap == row_gap && self.options.column_gap == column_gap {
            return;
        }
        self.options.row_gap = row_gap;
        self.options.column_gap = column_gap;
        self.request_layout();
    }

    pub fn set_origin_top(&mut self, origin_top: f64) {
        if self.options.origin_top == origin_top {
            return;
        }
        self.options.origin_top = origin_top;
        self.request_layout();
    }

    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        self.options.count = count;
        self.request_layout();
    }

    /// Replaces the key mapping; call this when the item set is replaced or reordered.
    pub fn set_get_item_key(&mut self, f: impl Fn(usize) -> Option<K> + Send + Sync + 'static) {
        self.options.get_item_key = Arc::new(f);
        self.request_layout();
    }

    /// Sets the item count and key mapping together, requesting a single pass.
    pub fn set_items(
        &mut self,
        count: usize,
        f: impl Fn(usize) -> Option<K> + Send + Sync + 'static,
    ) {
        self.options.count = count;
        self.options.get_item_key = Arc::new(f);
        self.request_layout();
    }

    /// Enables or disables height caching. Any change clears the cache and requests a pass.
    pub fn set_cache_item_heights(&mut self, enabled: bool) {
        if self.options.cache_item_heights == enabled {
            return;
        }
        self.options.cache_item_heights = enabled;
        self.cache.set_enabled(enabled);
        self.request_layout();
    }

    /// Moves the measurement cache to a new epoch.
    ///
    /// A token different from the current one clears every cached height before the next
    /// pass. Returns whether the cache was cleared.
    pub fn set_cache_epoch(&mut self, epoch: E) -> bool {
        self.cache.set_epoch(epoch)
    }

    pub fn cache_epoch(&self) -> Option<&E> {
        self.cache.epoch()
    }

    /// Drops every cached height.
    pub fn reset_measurements(&mut self) {
        self.cache.clear();
    }

    pub fn set_virtualize(&mut self, virtualize: bool) {
        if self.options.virtualize == virtualize {
            return;
        }
        self.options.virtualize = virtualize;
        if !virtualize {
            self.scroll.cancel();
        }
        self.rewindow();
    }

    pub fn set_visibility_threshold(&mut self, threshold: f64) {
        let threshold = non_negative(threshold, "visibility_threshold");
        if self.options.visibility_threshold == threshold {
            return;
        }
        self.options.visibility_threshold = threshold;
        self.rewindow();
    }

    pub fn set_scroll_throttle_ms(&mut self, interval_ms: u64) {
        self.options.scroll_throttle_ms = interval_ms;
        self.scroll.set_interval_ms(interval_ms);
    }

    pub fn set_on_change(&mut self, on_change: Option<impl Fn(&Self) + Send + Sync + 'static>) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    /// Records the width of the grid container. The measurement replica uses the derived
    /// [`Self::column_width`], so a change requests a pass.
    pub fn set_container_width(&mut self, width: f64) {
        let width = width.max(0.0);
        if self.container_width == Some(width) {
            return;
        }
        self.container_width = Some(width);
        self.request_layout();
    }

    pub fn container_width(&self) -> Option<f64> {
        self.container_width
    }

    /// Width of one column, derived from the container width, column count and column gap.
    pub fn column_width(&self) -> Option<f64> {
        let width = self.container_width?;
        let columns = self.options.columns.max(1) as f64;
        let gaps = self.options.column_gap * (columns - 1.0);
        Some(((width - gaps) / columns).max(0.0))
    }

    /// Call this when the measurement replica reports a content size change.
    pub fn on_content_resize(&mut self) {
        mtrace!("Masonry::on_content_resize");
        self.request_layout();
    }

    /// Requests a measurement pass.
    ///
    /// When a pass is already in flight it is left alone and the request is queued; it starts
    /// right after the in-flight pass publishes.
    pub fn request_layout(&mut self) {
        if self.torn_down {
            return;
        }
        if self.pending.is_some() {
            self.queued = self.queued.saturating_add(1);
            mtrace!(queued = self.queued, "request_layout: pass in flight");
            return;
        }
        self.begin_pass();
    }

    fn begin_pass(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        let pass = MeasurePass {
            generation: self.generation,
            count: self.options.count,
            column_width: self.column_width().unwrap_or(0.0),
            row_gap: self.options.row_gap,
        };
        mdebug!(
            generation = pass.generation,
            count = pass.count,
            column_width = pass.column_width,
            "begin_pass"
        );
        self.pending = Some(InFlight {
            pass,
            get_item_key: Arc::clone(&self.options.get_item_key),
        });
        self.phase = LayoutPhase::Measuring;
    }

    /// The pass waiting for the adapter's layout commit, if any.
    pub fn pending_pass(&self) -> Option<MeasurePass> {
        self.pending.as_ref().map(|p| p.pass)
    }

    /// Number of passes requested while the current one is in flight.
    pub fn queued_passes(&self) -> usize {
        self.queued
    }

    /// Runs the pending pass against a committed measurement surface and publishes the result.
    ///
    /// Call this only after the replica's layout has been committed: reading geometry before
    /// that yields stale or zero heights.
    ///
    /// The pass measures exactly the `count` items of [`Self::pending_pass`] with the key mapping
    /// in effect when it was requested; item changes made meanwhile are picked up by the queued
    /// pass.
    ///
    /// Returns `Ok(true)` when a layout was published, `Ok(false)` when there is no pending pass
    /// or the surface is not ready (the pass stays pending). A missing or duplicate item key
    /// aborts the pass with an error and leaves the last published layout in place.
    pub fn complete_pass<S: MeasureSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Result<bool, LayoutError> {
        if self.torn_down {
            return Ok(false);
        }
        let Some(InFlight { pass, get_item_key }) = self.pending.clone() else {
            return Ok(false);
        };

        let keys = match collect_keys(pass.count, &get_item_key) {
            Ok(keys) => keys,
            Err(err) => {
                mwarn!(generation = pass.generation, error = %err, "complete_pass: aborted");
                self.abort_pass();
                return Err(err);
            }
        };

        let Some(heights) = measure_heights(keys.iter(), &mut self.cache, surface) else {
            return Ok(false);
        };

        let balanced = balance(
            &heights,
            self.options.columns,
            self.options.row_gap,
            self.options.origin_top,
        )?;
        self.windowed = window(
            &balanced,
            self.effective_viewport(),
            self.options.visibility_threshold,
        );
        self.balanced = balanced;
        self.keys = keys;
        self.pending = None;
        self.published = Some(pass.generation);
        self.phase = LayoutPhase::LaidOut;
        mdebug!(
            generation = pass.generation,
            items = self.keys.len(),
            visible = self.windowed.visible_count(),
            "complete_pass: published"
        );
        self.notify();
        self.start_queued();
        Ok(true)
    }

    fn abort_pass(&mut self) {
        self.pending = None;
        self.phase = self.settled_phase();
        self.start_queued();
    }

    /// The phase without a pass in flight.
    fn settled_phase(&self) -> LayoutPhase {
        if self.published.is_some() {
            LayoutPhase::LaidOut
        } else {
            LayoutPhase::Uninitialized
        }
    }

    fn start_queued(&mut self) {
        if self.queued == 0 || self.torn_down {
            return;
        }
        self.queued -= 1;
        self.begin_pass();
    }

    /// Queues a scroll notification. It is applied by [`Self::tick`] once the throttle
    /// interval has elapsed; only the latest viewport of a burst is used.
    ///
    /// Ignored unless virtualization is enabled.
    pub fn on_scroll(&mut self, viewport: Viewport, now_ms: u64) {
        if self.torn_down || !self.options.virtualize {
            return;
        }
        mtrace!(
            scroll_offset = viewport.scroll_offset,
            height = viewport.height,
            now_ms,
            "on_scroll"
        );
        self.scroll.call(viewport, now_ms);
    }

    /// Fires the throttled scroll recompute if it is due. Returns `true` when the visible items
    /// were recomputed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.torn_down {
            return false;
        }
        let Some(viewport) = self.scroll.poll(now_ms) else {
            return false;
        };
        self.viewport = Some(viewport);
        self.rewindow();
        true
    }

    /// Deadline of the pending throttled scroll recompute, for adapters that schedule timers.
    pub fn next_tick_ms(&self) -> Option<u64> {
        self.scroll.deadline_ms()
    }

    /// Applies a viewport immediately, bypassing the scroll throttle (e.g. on mount or when
    /// the scroll container is resized).
    pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
        if self.torn_down || self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.rewindow();
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    fn effective_viewport(&self) -> Option<Viewport> {
        if self.options.virtualize {
            self.viewport
        } else {
            None
        }
    }

    fn rewindow(&mut self) {
        self.windowed = window(
            &self.balanced,
            self.effective_viewport(),
            self.options.visibility_threshold,
        );
        if self.published.is_none() {
            return;
        }
        mtrace!(visible = self.windowed.visible_count(), "rewindow");
        self.notify();
    }

    fn notify(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    /// Stops the engine: cancels the pending throttled scroll recompute and drops any pending
    /// or queued pass. Later triggers, ticks and pass completions are ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        mdebug!(
            pending_scroll = self.scroll.is_pending(),
            queued = self.queued,
            "Masonry::teardown"
        );
        self.scroll.cancel();
        self.pending = None;
        self.queued = 0;
        self.phase = self.settled_phase();
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn phase(&self) -> LayoutPhase {
        self.phase
    }

    /// Generation of the last published pass, `None` before the first publish.
    pub fn published_generation(&self) -> Option<u64> {
        self.published
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn columns(&self) -> usize {
        self.options.columns
    }

    pub fn key_for(&self, index: usize) -> Option<K> {
        (self.options.get_item_key)(index)
    }

    /// The last published column assignment.
    pub fn balanced(&self) -> &BalancedLayout {
        &self.balanced
    }

    /// The last published visible items and fillers.
    pub fn windowed(&self) -> &WindowedLayout {
        &self.windowed
    }

    /// Height of the published grid (its tallest column).
    pub fn total_height(&self) -> f64 {
        self.balanced.height()
    }

    /// Iterates over the published visible items, column by column, without allocations.
    pub fn for_each_visible_item_keyed(&self, mut f: impl FnMut(PlacedItemKeyed<K>)) {
        for (column, col) in self.windowed.columns.iter().enumerate() {
            for item in &col.items {
                let Some(key) = self.keys.get(item.index) else {
                    continue;
                };
                f(PlacedItemKeyed {
                    key: key.clone(),
                    column,
                    index: item.index,
                    height: item.height,
                    top: item.top,
                });
            }
        }
    }

    /// Collects the published visible items into `out` (clears `out` first).
    pub fn collect_visible_items_keyed(&self, out: &mut Vec<PlacedItemKeyed<K>>) {
        out.clear();
        self.for_each_visible_item_keyed(|it| out.push(it));
    }

    /// Returns the number of cached measured heights (key → height).
    pub fn measurement_cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Iterates over the cached measured heights without allocations.
    pub fn for_each_cached_height(&self, f: impl FnMut(&K, f64)) {
        self.cache.for_each(f);
    }
}

fn normalize<K, E>(
    mut options: MasonryOptions<K, E>,
) -> Result<MasonryOptions<K, E>, LayoutError> {
    if options.columns == 0 {
        mwarn!("Masonry: column count must be at least 1");
        return Err(LayoutError::InvalidColumns);
    }
    options.row_gap = non_negative(options.row_gap, "row_gap");
    options.column_gap = non_negative(options.column_gap, "column_gap");
    options.visibility_threshold =
        non_negative(options.visibility_threshold, "visibility_threshold");
    Ok(options)
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn non_negative(value: f64, field: &'static str) -> f64 {
    if value >= 0.0 {
        return value;
    }
    mwarn!(field, value, "Masonry: negative or NaN value clamped to 0");
    0.0
}

fn collect_keys<K: KeyCacheKey + Clone>(
    count: usize,
    get_item_key: &ItemKeyFn<K>,
) -> Result<Vec<K>, LayoutError> {
    let mut keys = Vec::with_capacity(count);
    let mut seen = KeyMap::<K, usize>::new();
    for index in 0..count {
        let key = get_item_key(index).ok_or(LayoutError::MissingKey { index })?;
        if let Some(first) = seen.insert(key.clone(), index) {
            return Err(LayoutError::DuplicateKey { index, first });
        }
        keys.push(key);
    }
    Ok(keys)
}

fn empty_layout(columns: usize, row_gap: f64) -> BalancedLayout {
    BalancedLayout {
        columns: (0..columns).map(|_| Default::default()).collect(),
        row_gap,
    }
}
