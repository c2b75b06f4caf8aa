//! Algo execution service: synthesizes a marketable child order whenever
//! an order book arrives with a tight top of book.

use crate::domain::execution::{AlgoExecution, ExecutionOrder};
use crate::domain::market::OrderBook;
use crate::domain::types::{OrderType, PricingSide, TradeMarket};
use crate::soa::{ListenerSet, Service, ServiceListener};
use crate::utils::ids::random_id;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// A book is tradeable when `offer - bid <= 1/128`.
fn tight_spread() -> Decimal {
    dec!(1) / dec!(128)
}

/// Crosses the tight side of each incoming book, alternating sides with a
/// parity counter. The counter advances on every book, whether or not an
/// order is emitted.
pub struct AlgoExecutionService {
    executions: RefCell<HashMap<String, AlgoExecution>>,
    listeners: ListenerSet<AlgoExecution>,
    count: Cell<u64>,
}

impl AlgoExecutionService {
    /// Creates the service.
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            executions: RefCell::new(HashMap::new()),
            listeners: ListenerSet::new(),
            count: Cell::new(0),
        })
    }

    /// React to one order book arrival.
    pub fn execute_on_book(&self, book: &OrderBook) {
        let Some(best) = book.best_bid_offer() else {
            return;
        };

        let count = self.count.get();
        self.count.set(count + 1);

        if best.offer.price - best.bid.price > tight_spread() {
            return;
        }

        // Even parity lifts the offer with the bid's size; odd parity hits
        // the bid with the offer's size.
        let side = if count % 2 == 0 {
            PricingSide::Bid
        } else {
            PricingSide::Offer
        };
        let (price, quantity) = match side {
            PricingSide::Bid => (best.offer.price, best.bid.quantity),
            PricingSide::Offer => (best.bid.price, best.offer.quantity),
        };

        let order = ExecutionOrder::new(
            book.product().clone(),
            side,
            format!("A{}", random_id(11)),
            OrderType::Market,
            price,
            quantity,
            0,
            format!("AP{}", random_id(10)),
            false,
        );
        self.on_message(AlgoExecution::new(order, TradeMarket::Brokertec));
    }
}

impl Service<String, AlgoExecution> for AlgoExecutionService {
    fn get(&self, key: &String) -> Option<AlgoExecution> {
        self.executions.borrow().get(key).cloned()
    }

    fn on_message(&self, data: AlgoExecution) {
        self.executions
            .borrow_mut()
            .insert(data.order().product().id().to_string(), data.clone());
        self.listeners.notify_add(&data);
    }

    fn add_listener(&self, listener: Rc<dyn ServiceListener<AlgoExecution>>) {
        self.listeners.add(listener);
    }
}

/// Subscribes the algo execution service to the market data service.
pub struct AlgoExecutionListener {
    service: Rc<AlgoExecutionService>,
}

impl AlgoExecutionListener {
    /// Creates the listener for registration upstream.
    pub fn new(service: Rc<AlgoExecutionService>) -> Rc<Self> {
        Rc::new(Self { service })
    }
}

impl ServiceListener<OrderBook> for AlgoExecutionListener {
    fn process_add(&self, data: &OrderBook) {
        self.service.execute_on_book(data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bond::bond_from_cusip;
    use crate::domain::market::Order;

    fn book_with_spread(bid: Decimal, offer: Decimal) -> OrderBook {
        let mut book = OrderBook::new(bond_from_cusip("9128283H1").unwrap());
        book.add_order(Order::new(bid, 3_000_000, PricingSide::Bid));
        book.add_order(Order::new(offer, 4_000_000, PricingSide::Offer));
        book
    }

    struct ExecutionRecorder {
        executions: RefCell<Vec<AlgoExecution>>,
    }

    impl ServiceListener<AlgoExecution> for ExecutionRecorder {
        fn process_add(&self, data: &AlgoExecution) {
            self.executions.borrow_mut().push(data.clone());
        }
    }

    fn recorder() -> Rc<ExecutionRecorder> {
        Rc::new(ExecutionRecorder {
            executions: RefCell::new(Vec::new()),
        })
    }

    #[test]
    fn test_first_tight_book_lifts_the_offer() {
        let service = AlgoExecutionService::new();
        let recorder = recorder();
        service.add_listener(recorder.clone());

        // Spread of one tick: tight.
        service.execute_on_book(&book_with_spread(dec!(99.5), dec!(99.50390625)));

        let executions = recorder.executions.borrow();
        assert_eq!(executions.len(), 1);
        let order = executions[0].order();
        assert_eq!(order.side(), PricingSide::Bid);
        assert_eq!(order.price(), dec!(99.50390625));
        assert_eq!(order.visible_quantity(), 3_000_000);
        assert_eq!(order.hidden_quantity(), 0);
        assert_eq!(order.order_type(), OrderType::Market);
        assert!(!order.is_child_order());
        assert_eq!(executions[0].market(), TradeMarket::Brokertec);
    }

    #[test]
    fn test_wide_book_emits_nothing_but_advances_parity() {
        let service = AlgoExecutionService::new();
        let recorder = recorder();
        service.add_listener(recorder.clone());

        // Wide book: counter moves from 0 to 1 with no emission.
        service.execute_on_book(&book_with_spread(dec!(99.5), dec!(99.6)));
        assert!(recorder.executions.borrow().is_empty());

        // Next tight book therefore hits the bid (odd parity).
        service.execute_on_book(&book_with_spread(dec!(99.5), dec!(99.50390625)));
        let executions = recorder.executions.borrow();
        assert_eq!(executions.len(), 1);
        let order = executions[0].order();
        assert_eq!(order.side(), PricingSide::Offer);
        assert_eq!(order.price(), dec!(99.5));
        assert_eq!(order.visible_quantity(), 4_000_000);
    }

    #[test]
    fn test_consecutive_tight_books_alternate_sides() {
        let service = AlgoExecutionService::new();
        let recorder = recorder();
        service.add_listener(recorder.clone());

        service.execute_on_book(&book_with_spread(dec!(99.5), dec!(99.50390625)));
        service.execute_on_book(&book_with_spread(dec!(99.5), dec!(99.50390625)));

        let executions = recorder.executions.borrow();
        assert_eq!(executions.len(), 2);
        assert_eq!(executions[0].order().side(), PricingSide::Bid);
        assert_eq!(executions[1].order().side(), PricingSide::Offer);
    }

    #[test]
    fn test_boundary_spread_is_tight() {
        let service = AlgoExecutionService::new();
        let recorder = recorder();
        service.add_listener(recorder.clone());

        // Exactly 1/128 still crosses.
        service.execute_on_book(&book_with_spread(dec!(99.5), dec!(99.5078125)));
        assert_eq!(recorder.executions.borrow().len(), 1);
    }

    #[test]
    fn test_order_ids_are_prefixed_and_unique() {
        let service = AlgoExecutionService::new();
        let recorder = recorder();
        service.add_listener(recorder.clone());

        service.execute_on_book(&book_with_spread(dec!(99.5), dec!(99.50390625)));
        service.execute_on_book(&book_with_spread(dec!(99.5), dec!(99.50390625)));

        let executions = recorder.executions.borrow();
        let first = executions[0].order();
        let second = executions[1].order();
        assert!(first.order_id().starts_with('A') && first.order_id().len() == 12);
        assert!(first.parent_order_id().starts_with("AP") && first.parent_order_id().len() == 12);
        assert_ne!(first.order_id(), second.order_id());
    }
}
