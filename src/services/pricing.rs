//! Pricing service: keyed store of mid/spread prices.

use crate::domain::pricing::Price;
use crate::soa::{ListenerSet, Service, ServiceListener};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Holds the latest price per product and fans every arrival forward.
pub struct PricingService {
    prices: RefCell<HashMap<String, Price>>,
    listeners: ListenerSet<Price>,
}

impl PricingService {
    /// Creates the service.
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            prices: RefCell::new(HashMap::new()),
            listeners: ListenerSet::new(),
        })
    }
}

impl Service<String, Price> for PricingService {
    fn get(&self, key: &String) -> Option<Price> {
        self.prices.borrow().get(key).cloned()
    }

    fn on_message(&self, data: Price) {
        self.prices
            .borrow_mut()
            .insert(data.product().id().to_string(), data.clone());
        self.listeners.notify_add(&data);
    }

    fn add_listener(&self, listener: Rc<dyn ServiceListener<Price>>) {
        self.listeners.add(listener);
    }
}
