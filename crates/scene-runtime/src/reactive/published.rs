#![forbid(unsafe_code)]

//! Published value with send-always notification and version tracking.
//!
//! # Design
//!
//! [`Published<T>`] wraps a value of type `T` in shared, reference-counted
//! storage (`Rc<RefCell<..>>`). Each `set()` stores the value and notifies
//! all live subscribers in registration order. There is no equality check:
//! a scene that reports `Error` twice must see two dispatches.
//!
//! # Failure Modes
//!
//! - **Re-entrant set**: the borrow is released before callbacks run, so a
//!   subscriber may `set()` the same value holder. Such nested sets are
//!   delivered depth-first, inside the outer notification.
//! - **Subscriber leak**: If `Subscription` guards are stored indefinitely
//!   without being dropped, callbacks accumulate. Dead weak references are
//!   cleaned lazily during `notify()`.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct PublishedInner<T> {
    value: T,
    version: u64,
    /// Dead entries are pruned on notify.
    subscribers: Vec<CallbackWeak<T>>,
}

/// A shared, version-tracked value that publishes every new value.
///
/// Cloning a `Published` creates a new handle to the **same** inner state:
/// both handles see the same value and share subscribers.
pub struct Published<T> {
    inner: Rc<RefCell<PublishedInner<T>>>,
}

impl<T> Clone for Published<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Published<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Published")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Default + Clone + 'static> Default for Published<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + 'static> Published<T> {
    /// Create a new published value. The initial version is 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(PublishedInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Access the current value by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Store a new value, bump the version and notify every live subscriber.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Modify the value in place, then notify as [`set`](Self::set) does.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        {
            let mut inner = self.inner.borrow_mut();
            f(&mut inner.value);
            inner.version += 1;
        }
        self.notify();
    }

    /// Subscribe to future values.
    ///
    /// The current value is not replayed. Dropping the returned
    /// [`Subscription`] unsubscribes the callback.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Non-owning handle to the same value holder.
    #[must_use]
    pub fn downgrade(&self) -> WeakPublished<T> {
        WeakPublished {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Number of `set`/`update` calls so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn notify(&self) {
        // Collect live callbacks and the value first so no borrow is held
        // while subscribers run.
        let (callbacks, value): (Vec<CallbackRc<T>>, T) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            let callbacks = inner
                .subscribers
                .iter()
                .filter_map(Weak::upgrade)
                .collect();
            (callbacks, inner.value.clone())
        };

        for cb in &callbacks {
            cb(&value);
        }
    }
}

/// Weak handle to a [`Published`] value holder.
///
/// Holding one does not keep the value alive; [`upgrade`](Self::upgrade)
/// returns `None` once every strong handle is gone.
pub struct WeakPublished<T> {
    inner: Weak<RefCell<PublishedInner<T>>>,
}

impl<T> Clone for WeakPublished<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for WeakPublished<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakPublished")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl<T> WeakPublished<T> {
    /// Recover a strong handle if the value holder is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Published<T>> {
        self.inner.upgrade().map(|inner| Published { inner })
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping the `Subscription` drops the strong `Rc` of the callback, so the
/// `Weak` in the subscriber list fails to upgrade on the next notification.
pub struct Subscription {
    /// Type-erased strong reference keeping the callback `Rc` alive.
    _guard: Box<dyn std::any::Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn get_set_basic() {
        let value = Published::new(42);
        assert_eq!(value.get(), 42);
        assert_eq!(value.version(), 0);

        value.set(99);
        assert_eq!(value.get(), 99);
        assert_eq!(value.version(), 1);
    }

    #[test]
    fn equal_value_still_publishes() {
        let value = Published::new(7);
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);
        let _sub = value.subscribe(move |_| count_clone.set(count_clone.get() + 1));

        value.set(7);
        value.set(7);
        assert_eq!(count.get(), 2);
        assert_eq!(value.version(), 2);
    }

    #[test]
    fn subscribe_does_not_replay_current_value() {
        let value = Published::new(String::from("seed"));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        let _sub = value.subscribe(move |v: &String| seen_clone.borrow_mut().push(v.clone()));

        assert!(seen.borrow().is_empty());
        value.set("next".into());
        assert_eq!(*seen.borrow(), vec!["next".to_string()]);
    }

    #[test]
    fn update_mutates_in_place() {
        let value = Published::new(vec![1, 2, 3]);
        let last_len = Rc::new(Cell::new(0usize));
        let last_clone = Rc::clone(&last_len);
        let _sub = value.subscribe(move |v: &Vec<i32>| last_clone.set(v.len()));

        value.update(|v| v.push(4));
        assert_eq!(value.get(), vec![1, 2, 3, 4]);
        assert_eq!(last_len.get(), 4);
        assert_eq!(value.version(), 1);
    }

    #[test]
    fn with_access() {
        let value = Published::new(vec![1, 2, 3]);
        assert_eq!(value.with(|v| v.iter().sum::<i32>()), 6);
    }

    #[test]
    fn subscription_drop_unsubscribes() {
        let value = Published::new(0);
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);
        let sub = value.subscribe(move |_| count_clone.set(count_clone.get() + 1));

        value.set(1);
        drop(sub);
        value.set(2);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn notification_order_is_registration_order() {
        let value = Published::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));

        let log1 = Rc::clone(&log);
        let _s1 = value.subscribe(move |_| log1.borrow_mut().push('A'));
        let log2 = Rc::clone(&log);
        let _s2 = value.subscribe(move |_| log2.borrow_mut().push('B'));
        let log3 = Rc::clone(&log);
        let _s3 = value.subscribe(move |_| log3.borrow_mut().push('C'));

        value.set(1);
        assert_eq!(*log.borrow(), vec!['A', 'B', 'C']);
    }

    #[test]
    fn clone_shares_state_and_subscribers() {
        let a = Published::new(0);
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);
        let _sub = a.subscribe(move |_| count_clone.set(count_clone.get() + 1));

        let b = a.clone();
        b.set(5);
        assert_eq!(a.get(), 5);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn dead_subscribers_pruned_on_notify() {
        let value = Published::new(0);
        let _s1 = value.subscribe(|_| {});
        let s2 = value.subscribe(|_| {});
        assert_eq!(value.subscriber_count(), 2);

        drop(s2);
        assert_eq!(value.subscriber_count(), 2);
        value.set(1);
        assert_eq!(value.subscriber_count(), 1);
    }

    #[test]
    fn weak_handle_follows_lifetime() {
        let value = Published::new(1);
        let weak = value.downgrade();
        weak.upgrade().expect("alive").set(2);
        assert_eq!(value.get(), 2);

        drop(value);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn reentrant_set_from_subscriber() {
        let value = Published::new(0);
        let handle = value.downgrade();
        let _bump = value.subscribe(move |v: &i32| {
            if *v == 1 {
                if let Some(value) = handle.upgrade() {
                    value.set(2);
                }
            }
        });

        value.set(1);
        assert_eq!(value.get(), 2);
        assert_eq!(value.version(), 2);
    }

    #[test]
    fn debug_format() {
        let dbg = format!("{:?}", Published::new(42));
        assert!(dbg.contains("Published"));
        assert!(dbg.contains("42"));
        assert!(dbg.contains("version"));
    }
}
