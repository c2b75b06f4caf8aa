//! External concerns: feed decoding, sink persistence, and synthetic
//! data generation.

/// Synthetic feed generators
pub mod datagen;
/// Input feed decoders
pub mod feeds;
/// Append-only output sinks
pub mod sinks;
