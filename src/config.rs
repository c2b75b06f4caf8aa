//! Runtime configuration, read from the environment with defaults.
//!
//! - `DATA_DIR`         directory for input feeds and output sinks
//! - `GUI_THROTTLE_MS`  minimum interval between GUI price emissions
//! - `PRICE_POINTS`     generated price rows per product
//! - `BOOK_POINTS`      generated depth rows per product
//! - `DATA_SEED`        seed for the synthetic feed generators

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Pipeline runtime configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub gui_throttle_ms: i64,
    pub price_points: usize,
    pub book_points: usize,
    pub seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            gui_throttle_ms: 300,
            price_points: 1_000,
            book_points: 1_000,
            seed: 42,
        }
    }
}

fn env_or<T: FromStr>(key: &str, fallback: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(fallback)
}

impl PipelineConfig {
    /// Load configuration from the environment, falling back to defaults
    /// for unset or unparseable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            gui_throttle_ms: env_or("GUI_THROTTLE_MS", defaults.gui_throttle_ms),
            price_points: env_or("PRICE_POINTS", defaults.price_points),
            book_points: env_or("BOOK_POINTS", defaults.book_points),
            seed: env_or("DATA_SEED", defaults.seed),
        }
    }
}
