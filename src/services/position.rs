//! Position service: aggregates signed per-book positions from trades.

use crate::domain::trading::{Position, Trade};
use crate::soa::{ListenerSet, Service, ServiceListener};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Maintains one position per product, updated trade by trade.
pub struct PositionService {
    positions: RefCell<HashMap<String, Position>>,
    listeners: ListenerSet<Position>,
}

impl PositionService {
    /// Creates the service.
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            positions: RefCell::new(HashMap::new()),
            listeners: ListenerSet::new(),
        })
    }

    /// Apply one trade's signed quantity to the product's position and
    /// publish the updated position.
    pub fn add_trade(&self, trade: &Trade) {
        let updated = {
            let mut positions = self.positions.borrow_mut();
            let position = positions
                .entry(trade.product().id().to_string())
                .or_insert_with(|| Position::new(trade.product().clone()));
            position.add(trade.book(), trade.signed_quantity());
            position.clone()
        };
        self.listeners.notify_add(&updated);
    }
}

impl Service<String, Position> for PositionService {
    fn get(&self, key: &String) -> Option<Position> {
        self.positions.borrow().get(key).cloned()
    }

    fn on_message(&self, data: Position) {
        self.positions
            .borrow_mut()
            .insert(data.product().id().to_string(), data.clone());
        self.listeners.notify_add(&data);
    }

    fn add_listener(&self, listener: Rc<dyn ServiceListener<Position>>) {
        self.listeners.add(listener);
    }
}

/// Subscribes the position service to the trade booking service.
pub struct PositionListener {
    service: Rc<PositionService>,
}

impl PositionListener {
    /// Creates the listener for registration upstream.
    pub fn new(service: Rc<PositionService>) -> Rc<Self> {
        Rc::new(Self { service })
    }
}

impl ServiceListener<Trade> for PositionListener {
    fn process_add(&self, data: &Trade) {
        self.service.add_trade(data);
    }
}
