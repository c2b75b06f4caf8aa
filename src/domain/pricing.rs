//! Internal price records and two-way streamable quotes.

use crate::domain::bond::Bond;
use crate::domain::fractional::format_price;
use crate::domain::types::PricingSide;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A mid price and bid/offer spread for one product.
///
/// Invariants: `mid > 0`, `spread >= 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    product: Bond,
    mid: Decimal,
    spread: Decimal,
}

impl Price {
    /// Creates a price record.
    pub fn new(product: Bond, mid: Decimal, spread: Decimal) -> Self {
        Self {
            product,
            mid,
            spread,
        }
    }

    /// The product this price belongs to.
    pub fn product(&self) -> &Bond {
        &self.product
    }

    /// Mid price.
    pub fn mid(&self) -> Decimal {
        self.mid
    }

    /// Bid/offer spread around the mid.
    pub fn spread(&self) -> Decimal {
        self.spread
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            self.product.id(),
            format_price(self.mid),
            format_price(self.spread)
        )
    }
}

/// One side of a streamed two-way market.
///
/// Invariants: `visible_quantity >= 0`, `hidden_quantity >= 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceStreamOrder {
    pub price: Decimal,
    pub visible_quantity: i64,
    pub hidden_quantity: i64,
    pub side: PricingSide,
}

impl PriceStreamOrder {
    /// Creates a stream order.
    pub fn new(price: Decimal, visible_quantity: i64, hidden_quantity: i64, side: PricingSide) -> Self {
        Self {
            price,
            visible_quantity,
            hidden_quantity,
            side,
        }
    }
}

impl fmt::Display for PriceStreamOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            format_price(self.price),
            self.visible_quantity,
            self.hidden_quantity,
            self.side
        )
    }
}

/// A streamable two-way market for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceStream {
    product: Bond,
    bid: PriceStreamOrder,
    offer: PriceStreamOrder,
}

impl PriceStream {
    /// Creates a two-way stream.
    pub fn new(product: Bond, bid: PriceStreamOrder, offer: PriceStreamOrder) -> Self {
        Self {
            product,
            bid,
            offer,
        }
    }

    /// The product this stream belongs to.
    pub fn product(&self) -> &Bond {
        &self.product
    }

    /// Streamed bid side.
    pub fn bid(&self) -> &PriceStreamOrder {
        &self.bid
    }

    /// Streamed offer side.
    pub fn offer(&self) -> &PriceStreamOrder {
        &self.offer
    }
}

impl fmt::Display for PriceStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.product.id(), self.bid, self.offer)
    }
}

/// Output of the algo streaming service: a derived price stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgoStream {
    price_stream: PriceStream,
}

impl AlgoStream {
    /// Wraps a derived stream.
    pub fn new(price_stream: PriceStream) -> Self {
        Self { price_stream }
    }

    /// The wrapped price stream.
    pub fn price_stream(&self) -> &PriceStream {
        &self.price_stream
    }
}
