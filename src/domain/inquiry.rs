//! Customer inquiry records.

use crate::domain::bond::Bond;
use crate::domain::fractional::format_price;
use crate::domain::types::{InquiryState, TradeSide};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A customer inquiry working through the quote workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    inquiry_id: String,
    product: Bond,
    side: TradeSide,
    quantity: i64,
    price: Decimal,
    state: InquiryState,
}

impl Inquiry {
    /// Creates an inquiry.
    pub fn new(
        inquiry_id: impl Into<String>,
        product: Bond,
        side: TradeSide,
        quantity: i64,
        price: Decimal,
        state: InquiryState,
    ) -> Self {
        Self {
            inquiry_id: inquiry_id.into(),
            product,
            side,
            quantity,
            price,
            state,
        }
    }

    pub fn inquiry_id(&self) -> &str {
        &self.inquiry_id
    }

    pub fn product(&self) -> &Bond {
        &self.product
    }

    pub fn side(&self) -> TradeSide {
        self.side
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Set the quoted price.
    pub fn set_price(&mut self, price: Decimal) {
        self.price = price;
    }

    pub fn state(&self) -> InquiryState {
        self.state
    }

    /// Move the inquiry to a new lifecycle state.
    pub fn set_state(&mut self, state: InquiryState) {
        self.state = state;
    }
}

impl fmt::Display for Inquiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.inquiry_id,
            self.product.id(),
            self.side,
            self.quantity,
            format_price(self.price),
            self.state
        )
    }
}
