//! Booked trades and per-book position aggregation.

use crate::domain::bond::Bond;
use crate::domain::types::TradeSide;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A trade booked against a named accounting book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    product: Bond,
    trade_id: String,
    price: Decimal,
    book: String,
    quantity: i64,
    side: TradeSide,
}

impl Trade {
    /// Creates a trade.
    pub fn new(
        product: Bond,
        trade_id: impl Into<String>,
        price: Decimal,
        book: impl Into<String>,
        quantity: i64,
        side: TradeSide,
    ) -> Self {
        Self {
            product,
            trade_id: trade_id.into(),
            price,
            book: book.into(),
            quantity,
            side,
        }
    }

    pub fn product(&self) -> &Bond {
        &self.product
    }

    pub fn trade_id(&self) -> &str {
        &self.trade_id
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn book(&self) -> &str {
        &self.book
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn side(&self) -> TradeSide {
        self.side
    }

    /// Quantity signed by the trade direction.
    pub fn signed_quantity(&self) -> i64 {
        self.quantity * self.side.sign()
    }
}

/// Signed position per accounting book for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    product: Bond,
    books: BTreeMap<String, i64>,
}

impl Position {
    /// Creates an empty position.
    pub fn new(product: Bond) -> Self {
        Self {
            product,
            books: BTreeMap::new(),
        }
    }

    /// The product this position is held in.
    pub fn product(&self) -> &Bond {
        &self.product
    }

    /// Signed quantity held in one book.
    pub fn quantity_in(&self, book: &str) -> i64 {
        self.books.get(book).copied().unwrap_or(0)
    }

    /// Add a signed quantity into a book, creating the entry lazily.
    pub fn add(&mut self, book: &str, signed_quantity: i64) {
        *self.books.entry(book.to_string()).or_insert(0) += signed_quantity;
    }

    /// Aggregate position: the sum of signed quantities across books.
    pub fn aggregate(&self) -> i64 {
        self.books.values().sum()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.product.id())?;
        for (book, quantity) in &self.books {
            write!(f, ",{book},{quantity}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bond::bond_from_cusip;
    use rust_decimal_macros::dec;

    #[test]
    fn test_signed_quantity() {
        let product = bond_from_cusip("9128283H1").unwrap();
        let buy = Trade::new(product.clone(), "T1", dec!(99.5), "TRSY1", 1_000_000, TradeSide::Buy);
        let sell = Trade::new(product, "T2", dec!(99.5), "TRSY1", 400_000, TradeSide::Sell);
        assert_eq!(buy.signed_quantity(), 1_000_000);
        assert_eq!(sell.signed_quantity(), -400_000);
    }

    #[test]
    fn test_aggregate_sums_across_books() {
        let mut position = Position::new(bond_from_cusip("9128283H1").unwrap());
        position.add("TRSY1", 1_000_000);
        position.add("TRSY2", -250_000);
        position.add("TRSY1", 500_000);
        assert_eq!(position.quantity_in("TRSY1"), 1_500_000);
        assert_eq!(position.quantity_in("TRSY2"), -250_000);
        assert_eq!(position.quantity_in("TRSY3"), 0);
        assert_eq!(position.aggregate(), 1_250_000);
    }

    #[test]
    fn test_display_lists_books_in_order() {
        let mut position = Position::new(bond_from_cusip("9128283H1").unwrap());
        position.add("TRSY2", 200);
        position.add("TRSY1", 100);
        assert_eq!(position.to_string(), "9128283H1,TRSY1,100,TRSY2,200");
    }
}
