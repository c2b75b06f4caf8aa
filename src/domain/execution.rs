//! Execution orders and the algo wrapper that routes them to a venue.

use crate::domain::bond::Bond;
use crate::domain::fractional::format_price;
use crate::domain::types::{OrderType, PricingSide, TradeMarket};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An order that can be placed on an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOrder {
    product: Bond,
    side: PricingSide,
    order_id: String,
    order_type: OrderType,
    price: Decimal,
    visible_quantity: i64,
    hidden_quantity: i64,
    parent_order_id: String,
    is_child_order: bool,
}

impl ExecutionOrder {
    /// Creates an execution order.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        product: Bond,
        side: PricingSide,
        order_id: impl Into<String>,
        order_type: OrderType,
        price: Decimal,
        visible_quantity: i64,
        hidden_quantity: i64,
        parent_order_id: impl Into<String>,
        is_child_order: bool,
    ) -> Self {
        Self {
            product,
            side,
            order_id: order_id.into(),
            order_type,
            price,
            visible_quantity,
            hidden_quantity,
            parent_order_id: parent_order_id.into(),
            is_child_order,
        }
    }

    pub fn product(&self) -> &Bond {
        &self.product
    }

    pub fn side(&self) -> PricingSide {
        self.side
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn visible_quantity(&self) -> i64 {
        self.visible_quantity
    }

    pub fn hidden_quantity(&self) -> i64 {
        self.hidden_quantity
    }

    pub fn parent_order_id(&self) -> &str {
        &self.parent_order_id
    }

    pub fn is_child_order(&self) -> bool {
        self.is_child_order
    }
}

impl fmt::Display for ExecutionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{},{},{}",
            self.product.id(),
            self.order_id,
            self.side,
            self.order_type,
            format_price(self.price),
            self.visible_quantity,
            self.hidden_quantity,
            self.parent_order_id,
            self.is_child_order
        )
    }
}

/// An execution order paired with the venue it targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgoExecution {
    order: ExecutionOrder,
    market: TradeMarket,
}

impl AlgoExecution {
    /// Wraps an order with its target venue.
    pub fn new(order: ExecutionOrder, market: TradeMarket) -> Self {
        Self { order, market }
    }

    /// The wrapped execution order.
    pub fn order(&self) -> &ExecutionOrder {
        &self.order
    }

    /// The venue the order is routed to.
    pub fn market(&self) -> TradeMarket {
        self.market
    }
}
