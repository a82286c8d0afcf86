use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

type Callback = Arc<dyn Fn(&str) + Send + Sync>;

/// Handle returned by `subscribe`, used to stop receiving notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Change notifications shared by every store handle over the same storage.
///
/// Observers are told which key changed and re-read the store themselves.
#[derive(Default)]
pub struct ChangeBus {
    next_id: AtomicU64,
    observers: Mutex<Vec<(Subscription, Callback)>>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let subscription = Subscription(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((subscription, Arc::new(callback)));
        subscription
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(s, _)| *s != subscription);
        observers.len() != before
    }

    pub fn notify(&self, key: &str) {
        // callbacks run outside the lock so they may subscribe or unsubscribe
        let callbacks: Vec<Callback> = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        debug!("Notifying {} observers of '{}'", callbacks.len(), key);
        for callback in callbacks {
            callback(key);
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_notify_reaches_all_until_unsubscribed() {
        let bus = ChangeBus::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let first = {
            let hits = Arc::clone(&hits);
            bus.subscribe(move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };
        {
            let hits = Arc::clone(&hits);
            bus.subscribe(move |_| {
                hits.fetch_add(10, Ordering::SeqCst);
            });
        }

        bus.notify("cookblink-favorites");
        assert_eq!(hits.load(Ordering::SeqCst), 11);

        assert!(bus.unsubscribe(first));
        assert!(!bus.unsubscribe(first));
        bus.notify("cookblink-favorites");
        assert_eq!(hits.load(Ordering::SeqCst), 21);
        assert_eq!(bus.observer_count(), 1);
    }
}
