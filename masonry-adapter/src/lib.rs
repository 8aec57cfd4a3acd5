//! Adapter utilities for the `masonry` crate.
//!
//! The `masonry` crate is UI-agnostic and focuses on the layout math and the re-layout
//! protocol. This crate provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - Scoped resize/scroll subscriptions that are always released on teardown
//! - A controller that owns the engine and routes UI events into it
//!
//! This crate is intentionally framework-agnostic (no DOM or toolkit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
mod key;
mod subscription;


pub use controller::Controller;
pub use key::MasonryKey;
pub use subscription::{Subscription, SubscriptionKind};
