//! Universe change subscriptions.

use easyboard_core::Universe;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use tracing::error;

/// Callback invoked with the new universe after it is replaced.
pub type UniverseCallback = Box<dyn FnMut(&Universe) + Send>;

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Registry of universe callbacks.
///
/// Ids grow monotonically, so iterating the map visits callbacks in
/// registration order.
#[derive(Default)]
pub struct Subscribers {
    next_id: u64,
    callbacks: BTreeMap<SubscriptionId, UniverseCallback>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: UniverseCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.insert(id, callback);
        id
    }

    /// Removes a callback. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.callbacks.remove(&id).is_some()
    }

    /// Calls every callback once. A panicking callback is logged and does
    /// not stop the others.
    pub fn notify(&mut self, universe: &Universe) {
        for (id, callback) in self.callbacks.iter_mut() {
            let result = panic::catch_unwind(AssertUnwindSafe(|| callback(universe)));
            if result.is_err() {
                error!("Universe subscriber {:?} panicked", id);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}
