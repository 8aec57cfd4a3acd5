use alloc::boxed::Box;
use core::fmt;

/// What a [`Subscription`] listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubscriptionKind {
    /// A resize observer on the measurement replica (or the grid container).
    Resize,
    /// A scroll listener on the virtualization viewport.
    Scroll,
}

/// An event subscription owned by an adapter, released exactly once.
///
/// The release closure runs on [`Subscription::release`] or on drop, whichever comes first,
/// so a subscription never outlives the layout instance that holds it, including on early
/// unmount.
pub struct Subscription {
    kind: SubscriptionKind,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wraps an already registered listener. `release` unregisters it.
    pub fn new(kind: SubscriptionKind, release: impl FnOnce() + 'static) -> Self {
        Self {
            kind,
            release: Some(Box::new(release)),
        }
    }

    pub fn kind(&self) -> SubscriptionKind {
        self.kind
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Unregisters the listener now.
    pub fn release(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        let Some(release) = self.release.take() else {
            return;
        };
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "masonry_adapter", kind = ?self.kind, "subscription released");
        release();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("kind", &self.kind)
            .field("active", &self.is_active())
            .finish()
    }
}
