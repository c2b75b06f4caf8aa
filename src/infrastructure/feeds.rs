//! Feed decoders: parse the four comma-separated input files into typed
//! records and drive them into their services.
//!
//! A malformed row, an unknown product, or an invalid price string aborts
//! the run; only the inquiry state token degrades (to CUSTOMER_REJECTED)
//! instead of failing.

use crate::domain::bond::bond_from_cusip;
use crate::domain::fractional::parse_price;
use crate::domain::inquiry::Inquiry;
use crate::domain::market::{Order, OrderBook};
use crate::domain::pricing::Price;
use crate::domain::trading::Trade;
use crate::domain::types::{InquiryState, PricingSide, TradeSide, TradingError, TradingResult};
use crate::services::inquiry::InquiryService;
use crate::services::market_data::{MarketDataService, BOOK_DEPTH};
use crate::services::pricing::PricingService;
use crate::services::trade_booking::TradeBookingService;
use crate::soa::{Connector, Service};
use rust_decimal::Decimal;
use std::io::BufRead;
use std::rc::Rc;
use tracing::debug;

fn read_lines(
    input: &mut dyn BufRead,
    skip_header: bool,
    mut handle: impl FnMut(&str) -> TradingResult<()>,
) -> TradingResult<()> {
    let mut rows = 0usize;
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if (skip_header && index == 0) || line.is_empty() {
            continue;
        }
        handle(&line)?;
        rows += 1;
    }
    debug!(rows, "feed drained");
    Ok(())
}

fn fields<'a>(line: &'a str, expected: usize, feed: &'static str) -> TradingResult<Vec<&'a str>> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != expected {
        return Err(TradingError::MalformedRecord {
            feed,
            detail: format!("expected {expected} fields, got {}", fields.len()),
        });
    }
    Ok(fields)
}

fn parse_quantity(text: &str, feed: &'static str) -> TradingResult<i64> {
    text.parse().map_err(|_| TradingError::MalformedRecord {
        feed,
        detail: format!("bad quantity: {text}"),
    })
}

/// Decodes `prices.txt`: `Timestamp, CUSIP, Bid, Ask` with a header line.
/// Mid and spread are derived on ingest.
pub struct PriceFeed {
    service: Rc<PricingService>,
}

impl PriceFeed {
    /// Creates the feed for a pricing service.
    pub fn new(service: Rc<PricingService>) -> Self {
        Self { service }
    }
}

impl Connector<Price> for PriceFeed {
    fn subscribe(&self, input: &mut dyn BufRead) -> TradingResult<()> {
        read_lines(input, true, |line| {
            let fields = fields(line, 4, "price")?;
            let product = bond_from_cusip(fields[1])?;
            let bid = parse_price(fields[2])?;
            let ask = parse_price(fields[3])?;
            let mid = (bid + ask) / Decimal::from(2);
            let spread = ask - bid;
            self.service.on_message(Price::new(product, mid, spread));
            Ok(())
        })
    }
}

/// Decodes `marketdata.txt`: `Timestamp, CUSIP` followed by five
/// `Bid, BidSize, Ask, AskSize` level groups, with a header line.
pub struct MarketDataFeed {
    service: Rc<MarketDataService>,
}

impl MarketDataFeed {
    /// Creates the feed for a market data service.
    pub fn new(service: Rc<MarketDataService>) -> Self {
        Self { service }
    }
}

impl Connector<OrderBook> for MarketDataFeed {
    fn subscribe(&self, input: &mut dyn BufRead) -> TradingResult<()> {
        read_lines(input, true, |line| {
            let fields = fields(line, 2 + 4 * BOOK_DEPTH, "market data")?;
            let product_id = fields[1];

            let mut orders = Vec::with_capacity(2 * BOOK_DEPTH);
            for level in 0..BOOK_DEPTH {
                let at = 2 + 4 * level;
                orders.push(Order::new(
                    parse_price(fields[at])?,
                    parse_quantity(fields[at + 1], "market data")?,
                    PricingSide::Bid,
                ));
                orders.push(Order::new(
                    parse_price(fields[at + 2])?,
                    parse_quantity(fields[at + 3], "market data")?,
                    PricingSide::Offer,
                ));
            }
            self.service.add_depth(product_id, orders)
        })
    }
}

/// Decodes `trades.txt` (no header):
/// `CUSIP, TradeId, Price, Book, Quantity, BUY|SELL`.
pub struct TradeFeed {
    service: Rc<TradeBookingService>,
}

impl TradeFeed {
    /// Creates the feed for a trade booking service.
    pub fn new(service: Rc<TradeBookingService>) -> Self {
        Self { service }
    }
}

impl Connector<Trade> for TradeFeed {
    fn subscribe(&self, input: &mut dyn BufRead) -> TradingResult<()> {
        read_lines(input, false, |line| {
            let fields = fields(line, 6, "trade")?;
            let product = bond_from_cusip(fields[0])?;
            let trade = Trade::new(
                product,
                fields[1],
                parse_price(fields[2])?,
                fields[3],
                parse_quantity(fields[4], "trade")?,
                TradeSide::from_token(fields[5])?,
            );
            self.service.on_message(trade);
            Ok(())
        })
    }
}

/// Decodes `inquiries.txt` (no header):
/// `InquiryId, CUSIP, BUY|SELL, Quantity, Price, State`.
pub struct InquiryFeed {
    service: Rc<InquiryService>,
}

impl InquiryFeed {
    /// Creates the feed for an inquiry service.
    pub fn new(service: Rc<InquiryService>) -> Self {
        Self { service }
    }
}

impl Connector<Inquiry> for InquiryFeed {
    fn subscribe(&self, input: &mut dyn BufRead) -> TradingResult<()> {
        read_lines(input, false, |line| {
            let fields = fields(line, 6, "inquiry")?;
            let product = bond_from_cusip(fields[1])?;
            let inquiry = Inquiry::new(
                fields[0],
                product,
                TradeSide::from_token(fields[2])?,
                parse_quantity(fields[3], "inquiry")?,
                parse_price(fields[4])?,
                InquiryState::from_token(fields[5]),
            );
            self.service.on_message(inquiry);
            Ok(())
        })
    }
}
