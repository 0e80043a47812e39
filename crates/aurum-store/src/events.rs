//! # Change Notification
//!
//! In-process publish/subscribe for "cart changed" and "wishlist changed".
//!
//! ## Delivery
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store.add_to_cart(..)                                                  │
//! │       │  write guard held                                               │
//! │       ├──► backend.set("cart", json)                                    │
//! │       │  write guard released                                           │
//! │       ▼                                                                 │
//! │  Notifier::notify(Collection::Cart)                                     │
//! │       │  snapshot listeners registered for Cart, release registry lock  │
//! │       ├──► header counter listener                                      │
//! │       └──► cart page re-render listener                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Notifications carry no payload. Listeners read the store again.
//! Listeners run with no lock held and may call back into the store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

/// Which persisted collection changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Cart,
    Wishlist,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Cart => write!(f, "cart"),
            Collection::Wishlist => write!(f, "wishlist"),
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// A change listener.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

struct Subscription {
    id: SubscriptionId,
    collection: Collection,
    listener: Listener,
}

/// Listener registry.
#[derive(Default)]
pub struct Notifier {
    next_id: AtomicU64,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, collection: Collection, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Subscription {
                id,
                collection,
                listener,
            });
        trace!(%id, %collection, "Listener subscribed");
        id
    }

    /// Returns true if a listener was removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self
            .subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = subs.len();
        subs.retain(|s| s.id != id);
        before != subs.len()
    }

    /// Calls every listener registered for `collection`, in subscription order.
    pub fn notify(&self, collection: Collection) {
        let listeners: Vec<Listener> = self
            .subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|s| s.collection == collection)
            .map(|s| Arc::clone(&s.listener))
            .collect();

        trace!(%collection, listeners = listeners.len(), "Notifying");
        for listener in listeners {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, Listener) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        (count, Arc::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }))
    }

    #[test]
    fn test_notify_only_matching_collection() {
        let notifier = Notifier::new();
        let (cart_hits, cart_listener) = counter();
        let (wish_hits, wish_listener) = counter();
        notifier.subscribe(Collection::Cart, cart_listener);
        notifier.subscribe(Collection::Wishlist, wish_listener);

        notifier.notify(Collection::Cart);
        notifier.notify(Collection::Cart);

        assert_eq!(cart_hits.load(Ordering::SeqCst), 2);
        assert_eq!(wish_hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unsubscribe() {
        let notifier = Notifier::new();
        let (hits, listener) = counter();
        let id = notifier.subscribe(Collection::Wishlist, listener);

        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));

        notifier.notify(Collection::Wishlist);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn test_listener_may_subscribe_during_notify() {
        let notifier = Arc::new(Notifier::new());
        let inner = Arc::clone(&notifier);
        notifier.subscribe(
            Collection::Cart,
            Arc::new(move || {
                inner.subscribe(Collection::Cart, Arc::new(|| {}));
            }),
        );

        notifier.notify(Collection::Cart);
        assert_eq!(notifier.listener_count(), 2);
    }

    #[test]
    fn test_collection_display() {
        assert_eq!(Collection::Cart.to_string(), "cart");
        assert_eq!(Collection::Wishlist.to_string(), "wishlist");
    }
}
