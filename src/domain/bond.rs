//! Bond product descriptors and the static US Treasury catalog.

use crate::domain::types::{TradingError, TradingResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Kind of identifier a bond is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BondIdType {
    Cusip,
    Isin,
}

/// Immutable bond descriptor. Equality and hashing are by identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bond {
    id: String,
    id_type: BondIdType,
    ticker: String,
    coupon: Decimal,
    maturity: NaiveDate,
}

impl Bond {
    /// Creates a bond descriptor.
    pub fn new(
        id: impl Into<String>,
        id_type: BondIdType,
        ticker: impl Into<String>,
        coupon: Decimal,
        maturity: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            id_type,
            ticker: ticker.into(),
            coupon,
            maturity,
        }
    }

    /// Product identifier (the CUSIP for US Treasuries).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Kind of identifier held in [`Bond::id`].
    pub fn id_type(&self) -> BondIdType {
        self.id_type
    }

    /// Human ticker, e.g. `US10Y`.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Annual coupon as a fraction.
    pub fn coupon(&self) -> Decimal {
        self.coupon
    }

    /// Maturity date.
    pub fn maturity(&self) -> NaiveDate {
        self.maturity
    }
}

impl PartialEq for Bond {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Bond {}

impl Hash for Bond {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Bond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// The seven on-the-run Treasury CUSIPs covered by the pipeline.
pub const TREASURY_CUSIPS: [&str; 7] = [
    "9128283H1",
    "9128283L2",
    "912828M80",
    "9128283J7",
    "9128283F5",
    "912810TW8",
    "912810RZ3",
];

/// Look up the static descriptor for a CUSIP.
pub fn bond_from_cusip(cusip: &str) -> TradingResult<Bond> {
    let (ticker, coupon, maturity) = match cusip {
        "9128283H1" => ("US2Y", dec!(0.01750), (2025, 12, 30)),
        "9128283L2" => ("US3Y", dec!(0.01875), (2026, 12, 30)),
        "912828M80" => ("US5Y", dec!(0.02000), (2028, 12, 30)),
        "9128283J7" => ("US7Y", dec!(0.02125), (2030, 12, 30)),
        "9128283F5" => ("US10Y", dec!(0.02250), (2033, 12, 30)),
        "912810TW8" => ("US20Y", dec!(0.02500), (2043, 12, 30)),
        "912810RZ3" => ("US30Y", dec!(0.02750), (2053, 12, 30)),
        other => return Err(TradingError::UnknownProduct(other.to_string())),
    };
    let (year, month, day) = maturity;
    let maturity = NaiveDate::from_ymd_opt(year, month, day).unwrap();
    Ok(Bond::new(cusip, BondIdType::Cusip, ticker, coupon, maturity))
}

/// Static PV01 factor per unit notional. Products without a configured
/// factor carry zero risk.
pub fn pv01_from_cusip(cusip: &str) -> Decimal {
    match cusip {
        "9128283H1" => dec!(0.01948992),
        "9128283L2" => dec!(0.02865304),
        "912828M80" => dec!(0.04581119),
        "9128283J7" => dec!(0.06127718),
        "9128283F5" => dec!(0.08161449),
        "912810RZ3" => dec!(0.15013155),
        _ => Decimal::ZERO,
    }
}
