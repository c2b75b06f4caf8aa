//! Risk service: per-product PV01 from positions, plus bucketed sector
//! risk on demand.

use crate::domain::bond::pv01_from_cusip;
use crate::domain::risk::{BucketedSector, Pv01, SectorPv01};
use crate::domain::trading::Position;
use crate::soa::{ListenerSet, Service, ServiceListener};
use rust_decimal::Decimal;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Accumulates PV01 per product. The store carries the running quantity;
/// listeners receive the incremental record built from each position
/// arrival.
pub struct RiskService {
    pv01s: RefCell<HashMap<String, Pv01>>,
    listeners: ListenerSet<Pv01>,
}

impl RiskService {
    /// Creates the service.
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            pv01s: RefCell::new(HashMap::new()),
            listeners: ListenerSet::new(),
        })
    }

    /// Fold one position update into the product's PV01 and publish the
    /// incremental record.
    pub fn add_position(&self, position: &Position) {
        let product = position.product().clone();
        let factor = pv01_from_cusip(product.id());
        let quantity = position.aggregate();
        let incremental = Pv01::new(product.clone(), factor, quantity);

        {
            let mut pv01s = self.pv01s.borrow_mut();
            match pv01s.get_mut(product.id()) {
                Some(existing) => existing.add_quantity(quantity),
                None => {
                    pv01s.insert(product.id().to_string(), incremental.clone());
                }
            }
        }

        self.listeners.notify_add(&incremental);
    }

    /// Aggregate PV01 across a sector: `sum(factor_i * qty_i)` with the
    /// summed quantity. Products without a stored PV01 contribute nothing.
    pub fn bucketed_risk(&self, sector: &BucketedSector) -> SectorPv01 {
        let pv01s = self.pv01s.borrow();
        let mut bucket_pv01 = Decimal::ZERO;
        let mut quantity: i64 = 0;
        for product in sector.products() {
            if let Some(pv01) = pv01s.get(product.id()) {
                bucket_pv01 += pv01.pv01() * Decimal::from(pv01.quantity());
                quantity += pv01.quantity();
            }
        }
        SectorPv01::new(sector.clone(), bucket_pv01, quantity)
    }
}

impl Service<String, Pv01> for RiskService {
    fn get(&self, key: &String) -> Option<Pv01> {
        self.pv01s.borrow().get(key).cloned()
    }

    fn on_message(&self, data: Pv01) {
        self.pv01s
            .borrow_mut()
            .insert(data.product().id().to_string(), data.clone());
        self.listeners.notify_add(&data);
    }

    fn add_listener(&self, listener: Rc<dyn ServiceListener<Pv01>>) {
        self.listeners.add(listener);
    }
}

/// Subscribes the risk service to the position service.
pub struct RiskListener {
    service: Rc<RiskService>,
}

impl RiskListener {
    /// Creates the listener for registration upstream.
    pub fn new(service: Rc<RiskService>) -> Rc<Self> {
        Rc::new(Self { service })
    }
}

impl ServiceListener<Position> for RiskListener {
    fn process_add(&self, data: &Position) {
        self.service.add_position(data);
    }
}
