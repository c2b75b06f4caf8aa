//! Utilities for logging and id generation.

/// Random identifier generation
pub mod ids;
/// Tracing subscriber setup
pub mod logger;
