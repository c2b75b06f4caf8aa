//! Trade booking service: books feed trades and fabricates trades from
//! executed orders.

use crate::domain::execution::ExecutionOrder;
use crate::domain::trading::Trade;
use crate::domain::types::{PricingSide, TradeSide};
use crate::soa::{ListenerSet, Service, ServiceListener};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Stores trades keyed by trade id and fans each booking forward.
pub struct TradeBookingService {
    trades: RefCell<HashMap<String, Trade>>,
    listeners: ListenerSet<Trade>,
}

impl TradeBookingService {
    /// Creates the service.
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            trades: RefCell::new(HashMap::new()),
            listeners: ListenerSet::new(),
        })
    }
}

impl Service<String, Trade> for TradeBookingService {
    fn get(&self, key: &String) -> Option<Trade> {
        self.trades.borrow().get(key).cloned()
    }

    fn on_message(&self, data: Trade) {
        self.trades
            .borrow_mut()
            .insert(data.trade_id().to_string(), data.clone());
        self.listeners.notify_add(&data);
    }

    fn add_listener(&self, listener: Rc<dyn ServiceListener<Trade>>) {
        self.listeners.add(listener);
    }
}

/// Subscribes the trade booking service to the execution service,
/// converting each executed order into a booked trade.
///
/// Book assignment cycles TRSY2, TRSY3, TRSY1 with an internal counter.
pub struct TradeBookingExecutionListener {
    service: Rc<TradeBookingService>,
    count: Cell<u64>,
}

impl TradeBookingExecutionListener {
    /// Creates the listener for registration upstream.
    pub fn new(service: Rc<TradeBookingService>) -> Rc<Self> {
        Rc::new(Self {
            service,
            count: Cell::new(0),
        })
    }
}

impl ServiceListener<ExecutionOrder> for TradeBookingExecutionListener {
    fn process_add(&self, data: &ExecutionOrder) {
        let count = self.count.get() + 1;
        self.count.set(count);
        let book = match count % 3 {
            1 => "TRSY2",
            2 => "TRSY3",
            _ => "TRSY1",
        };

        let side = match data.side() {
            PricingSide::Bid => TradeSide::Buy,
            PricingSide::Offer => TradeSide::Sell,
        };
        let quantity = data.visible_quantity() + data.hidden_quantity();

        let trade = Trade::new(
            data.product().clone(),
            data.order_id(),
            data.price(),
            book,
            quantity,
            side,
        );
        self.service.on_message(trade);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bond::bond_from_cusip;
    use crate::domain::types::OrderType;
    use rust_decimal_macros::dec;

    fn order(order_id: &str, side: PricingSide) -> ExecutionOrder {
        ExecutionOrder::new(
            bond_from_cusip("9128283H1").unwrap(),
            side,
            order_id,
            OrderType::Market,
            dec!(99.53125),
            1_000_000,
            500_000,
            "AP0000000001",
            false,
        )
    }

    struct TradeRecorder {
        trades: RefCell<Vec<Trade>>,
    }

    impl ServiceListener<Trade> for TradeRecorder {
        fn process_add(&self, data: &Trade) {
            self.trades.borrow_mut().push(data.clone());
        }
    }

    #[test]
    fn test_feed_trades_store_by_trade_id() {
        let service = TradeBookingService::new();
        let trade = Trade::new(
            bond_from_cusip("9128283H1").unwrap(),
            "T1",
            dec!(99.515625),
            "TRSY1",
            1_000_000,
            TradeSide::Buy,
        );
        service.on_message(trade);
        assert!(service.get(&"T1".to_string()).is_some());
    }

    #[test]
    fn test_executions_cycle_books() {
        let service = TradeBookingService::new();
        let recorder = Rc::new(TradeRecorder {
            trades: RefCell::new(Vec::new()),
        });
        service.add_listener(recorder.clone());
        let listener = TradeBookingExecutionListener::new(service);

        for n in 0..9 {
            listener.process_add(&order(&format!("A{n:011}"), PricingSide::Bid));
        }

        let books: Vec<String> = recorder
            .trades
            .borrow()
            .iter()
            .map(|trade| trade.book().to_string())
            .collect();
        assert_eq!(
            books,
            vec![
                "TRSY2", "TRSY3", "TRSY1", "TRSY2", "TRSY3", "TRSY1", "TRSY2", "TRSY3", "TRSY1"
            ]
        );
    }

    #[test]
    fn test_execution_conversion() {
        let service = TradeBookingService::new();
        let recorder = Rc::new(TradeRecorder {
            trades: RefCell::new(Vec::new()),
        });
        service.add_listener(recorder.clone());
        let listener = TradeBookingExecutionListener::new(service.clone());

        listener.process_add(&order("A00000000001", PricingSide::Offer));

        let trades = recorder.trades.borrow();
        let trade = &trades[0];
        // Quantity is visible + hidden, side maps OFFER -> SELL, and the
        // trade id reuses the order id.
        assert_eq!(trade.quantity(), 1_500_000);
        assert_eq!(trade.side(), TradeSide::Sell);
        assert_eq!(trade.trade_id(), "A00000000001");
        assert!(service.get(&"A00000000001".to_string()).is_some());
    }
}
