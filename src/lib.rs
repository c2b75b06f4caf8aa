//! # Treasury Trading System
//!
//! A single-process US Treasury trading pipeline: a network of keyed-store
//! services connected by typed publish/subscribe edges that transforms four
//! external feeds (quoted prices, depth snapshots, executed trades, client
//! inquiries) into positions, risk, streamable quotes, execution orders,
//! and persisted historical records.
//!
//! ## Architecture
//!
//! The crate follows domain-driven design with clear separation of concerns:
//!
//! - **Domain**: the fixed-income data model (bonds, fractional prices,
//!   order books, streams, trades, positions, PV01, inquiries)
//! - **SOA core**: the `Service` / `ServiceListener` / `Connector`
//!   abstraction with synchronous, registration-ordered fan-out
//! - **Services**: the twelve pipeline stages, from pricing ingestion to
//!   historical persistence
//! - **Infrastructure**: feed decoders, append-only sinks, and the
//!   synthetic data generator
//!
//! ## Dataflow
//!
//! ```text
//! prices.txt     -> Pricing -+-> AlgoStreaming -> Streaming -+-> HistStreaming
//!                            +-> GUI
//! marketdata.txt -> MarketData -> AlgoExecution -> Execution -+-> HistExecution
//!                                                             +-> TradeBooking
//! trades.txt     -> TradeBooking -> Position -+-> Risk -> HistRisk
//!                                             +-> HistPosition
//! inquiries.txt  -> Inquiry -> HistInquiry
//! ```
//!
//! ## Concurrency
//!
//! Strictly single-threaded and synchronous: each input record drives a
//! depth-first cascade through the listener graph and returns only when
//! every transitively triggered callback has completed. Per-feed ordering
//! is preserved end to end.

/// Runtime configuration
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod soa;

/// Utilities for logging and id generation
pub mod utils;

// Re-export commonly used types for convenience
pub use domain::{
    bond::{bond_from_cusip, pv01_from_cusip, Bond, BondIdType, TREASURY_CUSIPS},
    execution::{AlgoExecution, ExecutionOrder},
    fractional::{format_price, parse_price},
    inquiry::Inquiry,
    market::{BidOffer, Order, OrderBook},
    pricing::{AlgoStream, Price, PriceStream, PriceStreamOrder},
    risk::{BucketedSector, Pv01, SectorPv01},
    trading::{Position, Trade},
    types::*,
};

pub use soa::{Connector, ListenerSet, Service, ServiceListener};

pub use services::{
    algo_execution::{AlgoExecutionListener, AlgoExecutionService},
    algo_streaming::{AlgoStreamingListener, AlgoStreamingService},
    execution::{ExecutionListener, ExecutionService},
    gui::{GuiListener, GuiService},
    historical::{HistoricalDataService, HistoricalListener, HistoricalRecord, RecordKind},
    inquiry::InquiryService,
    market_data::MarketDataService,
    position::{PositionListener, PositionService},
    pricing::PricingService,
    risk::{RiskListener, RiskService},
    streaming::{StreamingListener, StreamingService},
    trade_booking::{TradeBookingExecutionListener, TradeBookingService},
};

pub use infrastructure::feeds::{InquiryFeed, MarketDataFeed, PriceFeed, TradeFeed};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
