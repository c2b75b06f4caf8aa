//! Algo streaming service: derives a two-sided executable stream from
//! each price arrival.

use crate::domain::pricing::{AlgoStream, Price, PriceStream, PriceStreamOrder};
use crate::domain::types::PricingSide;
use crate::soa::{ListenerSet, Service, ServiceListener};
use rust_decimal::Decimal;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

const EVEN_VISIBLE_QUANTITY: i64 = 1_000_000;
const ODD_VISIBLE_QUANTITY: i64 = 2_000_000;

/// Builds an [`AlgoStream`] per price: bid at `mid - spread/2`, offer at
/// `mid + spread/2`. Visible quantity toggles 1M/2M with an internal
/// counter; hidden is twice visible.
pub struct AlgoStreamingService {
    streams: RefCell<HashMap<String, AlgoStream>>,
    listeners: ListenerSet<AlgoStream>,
    count: Cell<u64>,
}

impl AlgoStreamingService {
    /// Creates the service.
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            streams: RefCell::new(HashMap::new()),
            listeners: ListenerSet::new(),
            count: Cell::new(0),
        })
    }

    /// Derive and publish a stream for one price arrival.
    pub fn publish_algo_stream(&self, price: &Price) {
        let half_spread = price.spread() / Decimal::from(2);
        let bid_price = price.mid() - half_spread;
        let offer_price = price.mid() + half_spread;

        let count = self.count.get();
        self.count.set(count + 1);
        let visible = if count % 2 == 0 {
            EVEN_VISIBLE_QUANTITY
        } else {
            ODD_VISIBLE_QUANTITY
        };
        let hidden = visible * 2;

        let stream = AlgoStream::new(PriceStream::new(
            price.product().clone(),
            PriceStreamOrder::new(bid_price, visible, hidden, PricingSide::Bid),
            PriceStreamOrder::new(offer_price, visible, hidden, PricingSide::Offer),
        ));
        self.on_message(stream);
    }
}

impl Service<String, AlgoStream> for AlgoStreamingService {
    fn get(&self, key: &String) -> Option<AlgoStream> {
        self.streams.borrow().get(key).cloned()
    }

    fn on_message(&self, data: AlgoStream) {
        self.streams
            .borrow_mut()
            .insert(data.price_stream().product().id().to_string(), data.clone());
        self.listeners.notify_add(&data);
    }

    fn add_listener(&self, listener: Rc<dyn ServiceListener<AlgoStream>>) {
        self.listeners.add(listener);
    }
}

/// Subscribes the algo streaming service to the pricing service.
pub struct AlgoStreamingListener {
    service: Rc<AlgoStreamingService>,
}

impl AlgoStreamingListener {
    /// Creates the listener for registration upstream.
    pub fn new(service: Rc<AlgoStreamingService>) -> Rc<Self> {
        Rc::new(Self { service })
    }
}

impl ServiceListener<Price> for AlgoStreamingListener {
    fn process_add(&self, data: &Price) {
        self.service.publish_algo_stream(data);
    }
}
