#![forbid(unsafe_code)]

//! Publish/subscribe primitives for scene models and controllers.
//!
//! - [`Published`]: a shared, version-tracked value that notifies its
//!   subscribers on every set.
//! - [`Subscription`]: RAII guard that unsubscribes on drop.
//! - [`SubscriptionBag`]: owned set of guards kept alive together.
//!
//! # Architecture
//!
//! `Published<T>` uses `Rc<RefCell<..>>` for single-threaded shared ownership.
//! Subscribers are stored as `Weak` function pointers and cleaned up lazily
//! during notification. Nothing here is `Send`: every scene lives on the
//! thread that created it.
//!
//! # Invariants
//!
//! 1. Every `set()` bumps the version by one and notifies, even when the new
//!    value equals the old one. Updates are never coalesced.
//! 2. Subscribers are notified in registration order.
//! 3. `subscribe()` never replays the current value; a subscriber only sees
//!    values set after it registered.
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.

pub mod bag;
pub mod published;

pub use bag::SubscriptionBag;
pub use published::{Published, Subscription, WeakPublished};
