//! The pipeline services.
//!
//! Each service owns a keyed store and fans state changes to listeners
//! registered by its downstream services; see [`crate::soa`] for the
//! delivery contract.

/// Tight-spread order synthesis from order books
pub mod algo_execution;
/// Two-sided stream derivation from prices
pub mod algo_streaming;
/// Execution order store and audit publisher
pub mod execution;
/// Throttled price sink
pub mod gui;
/// Record persistence per kind
pub mod historical;
/// Customer inquiry workflow
pub mod inquiry;
/// Depth aggregation and book publishing
pub mod market_data;
/// Per-product, per-book positions
pub mod position;
/// Mid/spread price store
pub mod pricing;
/// PV01 accumulation and bucketed sector risk
pub mod risk;
/// Price stream forwarding
pub mod streaming;
/// Trade store and execution booking
pub mod trade_booking;
