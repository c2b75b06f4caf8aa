//! Market data service: depth accumulation and per-level aggregation.

use crate::domain::bond::bond_from_cusip;
use crate::domain::market::{BidOffer, Order, OrderBook};
use crate::domain::types::TradingResult;
use crate::soa::{ListenerSet, Service, ServiceListener};
use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::Rc;

/// Number of levels per side carried by a depth snapshot row.
pub const BOOK_DEPTH: usize = 5;

/// Maintains one order book per product. Each depth row appends its
/// orders to the product's book, the book is aggregated in place, and the
/// aggregated book is published downstream.
pub struct MarketDataService {
    books: RefCell<HashMap<String, OrderBook>>,
    listeners: ListenerSet<OrderBook>,
}

impl MarketDataService {
    /// Creates the service.
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            books: RefCell::new(HashMap::new()),
            listeners: ListenerSet::new(),
        })
    }

    /// Append a snapshot row's orders into the product's book (created
    /// lazily), aggregate duplicate price levels, and publish the result.
    pub fn add_depth(&self, product_id: &str, orders: Vec<Order>) -> TradingResult<()> {
        let aggregated = {
            let mut books = self.books.borrow_mut();
            let book = match books.entry(product_id.to_string()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(OrderBook::new(bond_from_cusip(product_id)?)),
            };
            for order in orders {
                book.add_order(order);
            }
            book.aggregate();
            book.clone()
        };

        self.on_message(aggregated);
        Ok(())
    }

    /// Best bid/offer of the current book for a product.
    pub fn best_bid_offer(&self, product_id: &str) -> Option<BidOffer> {
        self.books
            .borrow()
            .get(product_id)
            .and_then(OrderBook::best_bid_offer)
    }
}

impl Service<String, OrderBook> for MarketDataService {
    fn get(&self, key: &String) -> Option<OrderBook> {
        self.books.borrow().get(key).cloned()
    }

    fn on_message(&self, data: OrderBook) {
        self.books
            .borrow_mut()
            .insert(data.product().id().to_string(), data.clone());
        self.listeners.notify_add(&data);
    }

    fn add_listener(&self, listener: Rc<dyn ServiceListener<OrderBook>>) {
        self.listeners.add(listener);
    }
}
