//! Service-oriented core: typed services, listeners, and connectors.
//!
//! The pipeline is a graph of keyed-store services connected by listener
//! registrations. Delivery is synchronous and depth-first: a service that
//! publishes iterates its listeners in registration order, and each
//! `process_add` completes (including everything it triggers downstream)
//! before the next listener sees the event.
//!
//! Services are shared as `Rc` handles within a single thread; a listener
//! registered on an upstream service holds its own `Rc` to the downstream
//! service it drives, so the ownership graph follows the dataflow and has
//! no cycles. Connectors that must call back into their owning service
//! (the inquiry quote loop) hold a `Weak` back-reference instead.

use crate::domain::types::TradingResult;
use std::cell::RefCell;
use std::io::BufRead;
use std::rc::Rc;

/// Callback surface a downstream party registers on a service.
///
/// Only `process_add` is exercised by the pipeline; remove and update are
/// part of the contract surface and default to no-ops.
pub trait ServiceListener<V> {
    /// A record was added or replaced upstream.
    fn process_add(&self, data: &V);

    /// A record was removed upstream.
    fn process_remove(&self, _data: &V) {}

    /// A record was updated in place upstream.
    fn process_update(&self, _data: &V) {}
}

/// A keyed-store service with listener fan-out.
pub trait Service<K, V> {
    /// Look up a record by key.
    fn get(&self, key: &K) -> Option<V>;

    /// Ingest callback invoked by a connector (or an upstream listener
    /// injecting synthesized records).
    fn on_message(&self, data: V);

    /// Register a listener; listeners are notified in registration order.
    fn add_listener(&self, listener: Rc<dyn ServiceListener<V>>);
}

/// Bridge between a service and the outside world.
///
/// Connectors are one-directional in practice: subscribe-only connectors
/// parse an input source and drive `on_message`, publish-only connectors
/// emit records to an external sink.
pub trait Connector<V> {
    /// Push a record out of the service.
    fn publish(&self, _data: &V) {}

    /// Pull records from an input source into the service.
    fn subscribe(&self, _input: &mut dyn BufRead) -> TradingResult<()> {
        Ok(())
    }
}

/// Listener registry shared by every service.
///
/// Fan-out clones the registration list first so a callback may register
/// further listeners without invalidating the iteration.
pub struct ListenerSet<V> {
    listeners: RefCell<Vec<Rc<dyn ServiceListener<V>>>>,
}

impl<V> ListenerSet<V> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Append a listener in registration order.
    pub fn add(&self, listener: Rc<dyn ServiceListener<V>>) {
        self.listeners.borrow_mut().push(listener);
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// True when no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Deliver an add event to every listener, in registration order.
    pub fn notify_add(&self, data: &V) {
        let listeners: Vec<_> = self.listeners.borrow().clone();
        for listener in listeners {
            listener.process_add(data);
        }
    }

    /// Deliver a remove event to every listener, in registration order.
    pub fn notify_remove(&self, data: &V) {
        let listeners: Vec<_> = self.listeners.borrow().clone();
        for listener in listeners {
            listener.process_remove(data);
        }
    }

    /// Deliver an update event to every listener, in registration order.
    pub fn notify_update(&self, data: &V) {
        let listeners: Vec<_> = self.listeners.borrow().clone();
        for listener in listeners {
            listener.process_update(data);
        }
    }
}

impl<V> Default for ListenerSet<V> {
    fn default() -> Self {
        Self::new()
    }
}
