//! PV01 risk records, per product and bucketed by sector.

use crate::domain::bond::Bond;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// PV01 exposure for one product: the per-unit factor and the signed
/// quantity it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pv01 {
    product: Bond,
    pv01: Decimal,
    quantity: i64,
}

impl Pv01 {
    /// Creates a PV01 record.
    pub fn new(product: Bond, pv01: Decimal, quantity: i64) -> Self {
        Self {
            product,
            pv01,
            quantity,
        }
    }

    /// The product this exposure is against.
    pub fn product(&self) -> &Bond {
        &self.product
    }

    /// PV01 factor per unit notional.
    pub fn pv01(&self) -> Decimal {
        self.pv01
    }

    /// Signed quantity the factor applies to.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Fold additional quantity into this exposure.
    pub fn add_quantity(&mut self, quantity: i64) {
        self.quantity += quantity;
    }
}

impl fmt::Display for Pv01 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.product.id(), self.pv01, self.quantity)
    }
}

/// A named group of products risk is bucketed over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketedSector {
    name: String,
    products: Vec<Bond>,
}

impl BucketedSector {
    /// Creates a sector from its member products.
    pub fn new(name: impl Into<String>, products: Vec<Bond>) -> Self {
        Self {
            name: name.into(),
            products,
        }
    }

    /// Sector name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member products.
    pub fn products(&self) -> &[Bond] {
        &self.products
    }
}

/// Aggregated PV01 over a sector: `sum(factor_i * qty_i)` with the summed
/// quantity alongside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorPv01 {
    sector: BucketedSector,
    pv01: Decimal,
    quantity: i64,
}

impl SectorPv01 {
    /// Creates a bucketed risk record.
    pub fn new(sector: BucketedSector, pv01: Decimal, quantity: i64) -> Self {
        Self {
            sector,
            pv01,
            quantity,
        }
    }

    pub fn sector(&self) -> &BucketedSector {
        &self.sector
    }

    pub fn pv01(&self) -> Decimal {
        self.pv01
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}
