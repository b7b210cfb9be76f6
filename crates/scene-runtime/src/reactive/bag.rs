#![forbid(unsafe_code)]

//! Owned collection of subscription guards.

use super::Subscription;

/// Keeps a set of [`Subscription`]s alive until the bag is dropped or
/// cleared.
#[derive(Debug, Default)]
pub struct SubscriptionBag {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a guard.
    pub fn store(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Drop every guard, unsubscribing all callbacks.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}

impl Extend<Subscription> for SubscriptionBag {
    fn extend<I: IntoIterator<Item = Subscription>>(&mut self, iter: I) {
        self.subscriptions.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::Published;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn bag_keeps_subscriptions_alive_until_cleared() {
        let value = Published::new(0);
        let hits = Rc::new(Cell::new(0u32));
        let mut bag = SubscriptionBag::new();

        let h = Rc::clone(&hits);
        bag.store(value.subscribe(move |_| h.set(h.get() + 1)));
        assert_eq!(bag.len(), 1);

        value.set(1);
        assert_eq!(hits.get(), 1);

        bag.clear();
        assert!(bag.is_empty());
        value.set(2);
        assert_eq!(hits.get(), 1);
    }
}
