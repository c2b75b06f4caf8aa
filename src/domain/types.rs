use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of a resting order or streamed quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PricingSide {
    /// Willing to buy
    Bid,
    /// Willing to sell
    Offer,
}

impl fmt::Display for PricingSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingSide::Bid => write!(f, "BID"),
            PricingSide::Offer => write!(f, "OFFER"),
        }
    }
}

/// Direction of a booked trade or customer inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// Sign applied to quantities when aggregating positions.
    pub fn sign(&self) -> i64 {
        match self {
            TradeSide::Buy => 1,
            TradeSide::Sell => -1,
        }
    }

    /// Parse the feed-file token (`BUY` / `SELL`).
    pub fn from_token(token: &str) -> TradingResult<Self> {
        match token {
            "BUY" => Ok(TradeSide::Buy),
            "SELL" => Ok(TradeSide::Sell),
            other => Err(TradingError::MalformedRecord {
                feed: "trade side",
                detail: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

/// Execution order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Fok,
    Ioc,
    Market,
    Limit,
    Stop,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Fok => write!(f, "FOK"),
            OrderType::Ioc => write!(f, "IOC"),
            OrderType::Market => write!(f, "MARKET"),
            OrderType::Limit => write!(f, "LIMIT"),
            OrderType::Stop => write!(f, "STOP"),
        }
    }
}

/// Venue an algo execution is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeMarket {
    Brokertec,
    Espeed,
    Cme,
}

impl fmt::Display for TradeMarket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeMarket::Brokertec => write!(f, "BROKERTEC"),
            TradeMarket::Espeed => write!(f, "ESPEED"),
            TradeMarket::Cme => write!(f, "CME"),
        }
    }
}

/// Lifecycle state of a customer inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InquiryState {
    Received,
    Quoted,
    Done,
    Rejected,
    CustomerRejected,
}

impl InquiryState {
    /// Parse the feed-file token. An unrecognised token maps to
    /// `CustomerRejected` rather than failing the run.
    pub fn from_token(token: &str) -> Self {
        match token {
            "RECEIVED" => InquiryState::Received,
            "QUOTED" => InquiryState::Quoted,
            "DONE" => InquiryState::Done,
            "REJECTED" => InquiryState::Rejected,
            _ => InquiryState::CustomerRejected,
        }
    }
}

impl fmt::Display for InquiryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InquiryState::Received => write!(f, "RECEIVED"),
            InquiryState::Quoted => write!(f, "QUOTED"),
            InquiryState::Done => write!(f, "DONE"),
            InquiryState::Rejected => write!(f, "REJECTED"),
            InquiryState::CustomerRejected => write!(f, "CUSTOMER_REJECTED"),
        }
    }
}

/// Timestamp used for throttling decisions and sink lines.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Trading system errors
#[derive(Debug, thiserror::Error)]
pub enum TradingError {
    /// A fractional price string that does not follow `I-xyZ` notation
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// An identifier with no entry in the product catalog
    #[error("unknown product: {0}")]
    UnknownProduct(String),

    /// A feed row with the wrong field count or an unparseable field
    #[error("malformed {feed} record: {detail}")]
    MalformedRecord {
        /// Which feed produced the record
        feed: &'static str,
        /// The offending content
        detail: String,
    },

    /// An inquiry id with no live entry in the inquiry store
    #[error("unknown inquiry: {0}")]
    UnknownInquiry(String),

    /// Input/output error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for trading operations
pub type TradingResult<T> = Result<T, TradingError>;
