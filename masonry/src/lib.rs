//! A headless masonry layout engine with viewport virtualization.
//!
//! For adapter-level utilities (subscription lifetimes, a driving controller), see the
//! `masonry-adapter` crate.
//!
//! This crate lays out a list of variable-height items into a fixed number of balanced columns
//! using measured heights: items go, in order, to the currently shortest column. Measured
//! heights can be cached per item key for a caller-controlled cache epoch. When a viewport is
//! configured, each column is windowed to the items near the viewport and the hidden runs are
//! collapsed into filler heights that keep the total scroll extent unchanged.
//!
//! It is UI-agnostic. A UI layer is expected to provide:
//! - a hidden replica of the items to measure (see [`MeasureSurface`])
//! - container width, scroll offset and viewport height
//! - resize/scroll notifications and a clock for the scroll throttle
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod balancer;
mod cache;
mod error;
mod key;
mod masonry;
mod measure;
mod options;
mod throttle;
mod types;
mod windower;


pub use balancer::{balance, shortest_column};
pub use cache::MeasurementCache;
pub use error::LayoutError;
pub use masonry::Masonry;
pub use measure::{MeasurePass, MeasureSurface, measure_heights};
pub use options::{
    DEFAULT_SCROLL_THROTTLE_MS, DEFAULT_VISIBILITY_THRESHOLD, ItemKeyFn, MasonryOptions,
    OnChangeCallback,
};
pub use throttle::Throttle;
pub use types::{
    BalancedLayout, Column, LayoutPhase, PlacedItem, PlacedItemKeyed, Viewport, WindowedColumn,
    WindowedLayout,
};
pub use windower::{is_visible, window};

#[doc(hidden)]
pub use key::KeyCacheKey;
