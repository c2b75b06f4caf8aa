//! Order book market data: resting orders, best bid/offer, depth aggregation.

use crate::domain::bond::Bond;
use crate::domain::types::PricingSide;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A market data order with price, quantity, and side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub price: Decimal,
    pub quantity: i64,
    pub side: PricingSide,
}

impl Order {
    /// Creates a resting order.
    pub fn new(price: Decimal, quantity: i64, side: PricingSide) -> Self {
        Self {
            price,
            quantity,
            side,
        }
    }
}

/// The best bid order and best offer order of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidOffer {
    pub bid: Order,
    pub offer: Order,
}

/// Order book with a bid stack and an offer stack, both ordered by
/// insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    product: Bond,
    bids: Vec<Order>,
    offers: Vec<Order>,
}

impl OrderBook {
    /// Creates an empty book for a product.
    pub fn new(product: Bond) -> Self {
        Self {
            product,
            bids: Vec::new(),
            offers: Vec::new(),
        }
    }

    /// The product this book belongs to.
    pub fn product(&self) -> &Bond {
        &self.product
    }

    /// The bid stack in insertion order.
    pub fn bids(&self) -> &[Order] {
        &self.bids
    }

    /// The offer stack in insertion order.
    pub fn offers(&self) -> &[Order] {
        &self.offers
    }

    /// Append an order to the side it belongs to.
    pub fn add_order(&mut self, order: Order) {
        match order.side {
            PricingSide::Bid => self.bids.push(order),
            PricingSide::Offer => self.offers.push(order),
        }
    }

    /// Best bid is the highest-priced bid, best offer the lowest-priced
    /// offer; ties go to the first-encountered order. Returns `None` if
    /// either side is empty.
    pub fn best_bid_offer(&self) -> Option<BidOffer> {
        let bid = best_by(&self.bids, |a, b| a.price > b.price)?;
        let offer = best_by(&self.offers, |a, b| a.price < b.price)?;
        Some(BidOffer {
            bid: bid.clone(),
            offer: offer.clone(),
        })
    }

    /// Collapse each side by summing quantities at identical prices,
    /// preserving the first-encountered order of price levels. Aggregating
    /// an already-aggregated book is a no-op.
    pub fn aggregate(&mut self) {
        self.bids = aggregate_side(&self.bids);
        self.offers = aggregate_side(&self.offers);
    }
}

fn best_by(orders: &[Order], beats: impl Fn(&Order, &Order) -> bool) -> Option<&Order> {
    let mut best: Option<&Order> = None;
    for order in orders {
        match best {
            Some(current) if !beats(order, current) => {}
            _ => best = Some(order),
        }
    }
    best
}

fn aggregate_side(orders: &[Order]) -> Vec<Order> {
    let mut merged: Vec<Order> = Vec::new();
    let mut index_by_price: HashMap<Decimal, usize> = HashMap::new();
    for order in orders {
        match index_by_price.get(&order.price) {
            Some(&at) => merged[at].quantity += order.quantity,
            None => {
                index_by_price.insert(order.price, merged.len());
                merged.push(order.clone());
            }
        }
    }
    merged
}
