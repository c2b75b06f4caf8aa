//! Execution service: turns algo executions into real execution orders.

use crate::domain::execution::{AlgoExecution, ExecutionOrder};
use crate::domain::types::TradeMarket;
use crate::soa::{ListenerSet, Service, ServiceListener};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::info;

/// Publish-only connector emitting a human-readable audit line for every
/// executed order.
pub struct ExecutionAuditConnector;

impl ExecutionAuditConnector {
    /// Emit the audit line for an order routed to a market.
    pub fn publish(&self, order: &ExecutionOrder, market: TradeMarket) {
        info!(
            product = %order.product().id(),
            order_id = %order.order_id(),
            market = %market,
            side = %order.side(),
            order_type = %order.order_type(),
            price = %order.price(),
            visible = order.visible_quantity(),
            hidden = order.hidden_quantity(),
            is_child = order.is_child_order(),
            "execution order placed"
        );
    }
}

/// Stores execution orders keyed by order id and fans them out; every
/// accepted order is also published on the audit connector.
pub struct ExecutionService {
    orders: RefCell<HashMap<String, ExecutionOrder>>,
    listeners: ListenerSet<ExecutionOrder>,
    connector: ExecutionAuditConnector,
}

impl ExecutionService {
    /// Creates the service.
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            orders: RefCell::new(HashMap::new()),
            listeners: ListenerSet::new(),
            connector: ExecutionAuditConnector,
        })
    }

    /// Ingest an algo execution: store the inner order, fan it out, then
    /// execute it on its market via the audit connector.
    pub fn add_execution_order(&self, algo_execution: &AlgoExecution) {
        let order = algo_execution.order().clone();
        self.on_message(order.clone());
        self.connector.publish(&order, algo_execution.market());
    }
}

impl Service<String, ExecutionOrder> for ExecutionService {
    fn get(&self, key: &String) -> Option<ExecutionOrder> {
        self.orders.borrow().get(key).cloned()
    }

    fn on_message(&self, data: ExecutionOrder) {
        self.orders
            .borrow_mut()
            .insert(data.order_id().to_string(), data.clone());
        self.listeners.notify_add(&data);
    }

    fn add_listener(&self, listener: Rc<dyn ServiceListener<ExecutionOrder>>) {
        self.listeners.add(listener);
    }
}

/// Subscribes the execution service to the algo execution service.
pub struct ExecutionListener {
    service: Rc<ExecutionService>,
}

impl ExecutionListener {
    /// Creates the listener for registration upstream.
    pub fn new(service: Rc<ExecutionService>) -> Rc<Self> {
        Rc::new(Self { service })
    }
}

impl ServiceListener<AlgoExecution> for ExecutionListener {
    fn process_add(&self, data: &AlgoExecution) {
        self.service.add_execution_order(data);
    }
}
