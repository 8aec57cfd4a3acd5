use masonry::{LayoutError, Masonry, MasonryOptions, MeasureSurface, Viewport};

use crate::{MasonryKey, Subscription, SubscriptionKind};

/// A framework-neutral controller that owns a `masonry::Masonry` engine together with the
/// event subscriptions feeding it.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_container_width` / `on_content_resize` when a resize observer fires
/// - `on_scroll` when the viewport scrolls
/// - `tick(now_ms)` from a timer or frame callback (drives the scroll throttle)
/// - `on_layout_committed(surface)` after the measurement replica's layout is committed
///
/// Dropping the controller (or calling `teardown`) releases every subscription.
#[derive(Debug)]
pub struct Controller<K, E = u64> {
    m: Masonry<K, E>,
    resize: Option<Subscription>,
    scroll: Option<Subscription>,
}

impl<K: MasonryKey, E: PartialEq> Controller<K, E> {
    pub fn new(options: MasonryOptions<K, E>) -> Result<Self, LayoutError> {
        Ok(Self::from_masonry(Masonry::new(options)?))
    }

    pub fn from_masonry(m: Masonry<K, E>) -> Self {
        Self {
            m,
            resize: None,
            scroll: None,
        }
    }

    pub fn masonry(&self) -> &Masonry<K, E> {
        &self.m
    }

    pub fn masonry_mut(&mut self) -> &mut Masonry<K, E> {
        &mut self.m
    }

    /// Releases the subscriptions and returns the engine.
    pub fn into_masonry(self) -> Masonry<K, E> {
        let Self { m, .. } = self;
        m
    }

    /// Installs the resize observer, releasing any previous one, and requests a first pass.
    pub fn attach_resize_observer(&mut self, subscription: Subscription) {
        debug_assert_eq!(subscription.kind(), SubscriptionKind::Resize);
        self.resize = Some(subscription);
        self.m.request_layout();
    }

    /// Installs the viewport's scroll listener and turns virtualization on.
    ///
    /// `viewport` is the container's current geometry; it is applied immediately.
    pub fn attach_viewport(&mut self, subscription: Subscription, viewport: Viewport) {
        debug_assert_eq!(subscription.kind(), SubscriptionKind::Scroll);
        self.scroll = Some(subscription);
        self.m.set_viewport(Some(viewport));
        self.m.set_virtualize(true);
    }

    /// Releases the scroll listener and shows every item again.
    pub fn detach_viewport(&mut self) {
        self.scroll = None;
        self.m.set_virtualize(false);
        self.m.set_viewport(None);
    }

    pub fn has_resize_observer(&self) -> bool {
        self.resize.is_some()
    }

    pub fn has_viewport(&self) -> bool {
        self.scroll.is_some()
    }

    pub fn on_container_width(&mut self, width: f64) {
        self.m.set_container_width(width);
    }

    pub fn on_content_resize(&mut self) {
        self.m.on_content_resize();
    }

    /// Call this when the viewport reports a scroll. The recompute happens in `tick`.
    pub fn on_scroll(&mut self, viewport: Viewport, now_ms: u64) {
        if self.scroll.is_none() {
            return;
        }
        self.m.on_scroll(viewport, now_ms);
    }

    /// Advances the scroll throttle. Returns `true` when the visible items changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.m.tick(now_ms)
    }

    /// Runs the pending measurement pass. Call this after the adapter has mounted the replica
    /// for `masonry().pending_pass()` and its layout has been committed (e.g. from the next
    /// animation frame, not synchronously after mutating it).
    pub fn on_layout_committed<S: MeasureSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Result<bool, LayoutError> {
        self.m.complete_pass(surface)
    }

    /// Releases both subscriptions and stops the engine, cancelling any pending throttled
    /// scroll recompute.
    pub fn teardown(&mut self) {
        self.resize = None;
        self.scroll = None;
        self.m.teardown();
    }
}
