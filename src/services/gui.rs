//! GUI service: a throttled sink for price updates.

use crate::domain::pricing::Price;
use crate::domain::types::Timestamp;
use crate::infrastructure::sinks::RecordSink;
use crate::soa::{Connector, ListenerSet, Service, ServiceListener};
use chrono::{Duration, Utc};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

/// Default minimum interval between emitted prices, in milliseconds.
pub const DEFAULT_THROTTLE_MS: i64 = 300;

/// Forwards prices to the GUI sink file at most once per throttle
/// interval; updates inside the interval are dropped silently.
pub struct GuiService {
    prices: RefCell<HashMap<String, Price>>,
    listeners: ListenerSet<Price>,
    connector: RecordSink,
    throttle: Duration,
    last_emit: Cell<Option<Timestamp>>,
}

impl GuiService {
    /// Creates the service writing to `sink_path` with the given throttle.
    pub fn new(sink_path: impl AsRef<Path>, throttle_ms: i64) -> Rc<Self> {
        Rc::new(Self {
            prices: RefCell::new(HashMap::new()),
            listeners: ListenerSet::new(),
            connector: RecordSink::new(sink_path.as_ref()),
            throttle: Duration::milliseconds(throttle_ms),
            last_emit: Cell::new(None),
        })
    }

    /// Consume one price event observed at `now`. The throttle clock is
    /// injected so tests can drive it deterministically.
    pub fn on_price_at(&self, price: &Price, now: Timestamp) {
        self.prices
            .borrow_mut()
            .insert(price.product().id().to_string(), price.clone());

        let due = match self.last_emit.get() {
            None => true,
            Some(last) => now - last > self.throttle,
        };
        if due {
            self.last_emit.set(Some(now));
            self.connector.publish(price);
            self.listeners.notify_add(price);
        }
    }
}

impl Service<String, Price> for GuiService {
    fn get(&self, key: &String) -> Option<Price> {
        self.prices.borrow().get(key).cloned()
    }

    fn on_message(&self, data: Price) {
        self.on_price_at(&data, Utc::now());
    }

    fn add_listener(&self, listener: Rc<dyn ServiceListener<Price>>) {
        self.listeners.add(listener);
    }
}

/// Subscribes the GUI service to the pricing service.
pub struct GuiListener {
    service: Rc<GuiService>,
}

impl GuiListener {
    /// Creates the listener for registration upstream.
    pub fn new(service: Rc<GuiService>) -> Rc<Self> {
        Rc::new(Self { service })
    }
}

impl ServiceListener<Price> for GuiListener {
    fn process_add(&self, data: &Price) {
        self.service.on_message(data.clone());
    }
}
