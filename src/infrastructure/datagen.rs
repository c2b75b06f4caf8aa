//! Deterministic synthetic feed generation.
//!
//! Produces the four input files the pipeline consumes. Generation is
//! seeded so repeated runs replay identical market conditions.

use crate::domain::bond::TREASURY_CUSIPS;
use crate::domain::fractional::{format_price, tick};
use crate::domain::types::TradingResult;
use crate::utils::ids::random_id;
use chrono::{DateTime, Duration, Local};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

const BOOKS: [&str; 3] = ["TRSY1", "TRSY2", "TRSY3"];
const QUANTITIES: [i64; 5] = [1_000_000, 2_000_000, 3_000_000, 4_000_000, 5_000_000];

fn sink_timestamp(at: DateTime<Local>) -> String {
    at.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// Random spread between 1/128 and 1/64, on the 1/256 grid.
fn random_spread(rng: &mut StdRng) -> Decimal {
    Decimal::from(rng.gen_range(2..=4)) * tick()
}

/// Write `prices.txt`: an oscillating mid between 99 and 101 per product,
/// stepped one tick per row with a fresh random spread.
pub fn generate_prices(path: &Path, seed: u64, rows_per_product: usize) -> TradingResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let mut rng = StdRng::seed_from_u64(seed);
    writeln!(out, "Timestamp,CUSIP,Bid,Ask")?;

    for product in TREASURY_CUSIPS {
        let mut mid = dec!(99);
        let mut rising = true;
        let mut at = Local::now();

        for _ in 0..rows_per_product {
            let spread = random_spread(&mut rng);
            at = at + Duration::milliseconds(rng.gen_range(1..=20));

            let bid = mid - spread / dec!(2);
            let ask = mid + spread / dec!(2);
            writeln!(
                out,
                "{},{},{},{}",
                sink_timestamp(at),
                product,
                format_price(bid),
                format_price(ask)
            )?;

            mid += if rising { tick() } else { -tick() };
            if ask >= dec!(101) {
                rising = false;
            } else if bid <= dec!(99) {
                rising = true;
            }
        }
    }
    info!(path = %path.display(), "price data generated");
    Ok(())
}

/// Write `marketdata.txt`: depth-5 snapshots with the top-of-book spread
/// oscillating between 1/128 and 1/32 and sizes of 1M per level.
pub fn generate_order_books(path: &Path, seed: u64, rows_per_product: usize) -> TradingResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let mut rng = StdRng::seed_from_u64(seed);

    write!(out, "Timestamp,CUSIP")?;
    for level in 1..=5 {
        write!(out, ",Bid{level},BidSize{level},Ask{level},AskSize{level}")?;
    }
    writeln!(out)?;

    for product in TREASURY_CUSIPS {
        let mid = dec!(99);
        let mut spread = dec!(1) / dec!(128);
        let mut widening = true;
        let mut at = Local::now();

        for _ in 0..rows_per_product {
            at = at + Duration::milliseconds(rng.gen_range(1..=20));
            write!(out, "{},{}", sink_timestamp(at), product)?;
            for level in 1..=5i64 {
                let half = spread * Decimal::from(level) / dec!(2);
                let size = level * 1_000_000;
                write!(
                    out,
                    ",{},{},{},{}",
                    format_price(mid - half),
                    size,
                    format_price(mid + half),
                    size
                )?;
            }
            writeln!(out)?;

            spread += if widening {
                dec!(1) / dec!(128)
            } else {
                dec!(-1) / dec!(128)
            };
            if spread >= dec!(1) / dec!(32) {
                widening = false;
            } else if spread <= dec!(1) / dec!(128) {
                widening = true;
            }
        }
    }
    info!(path = %path.display(), "order book data generated");
    Ok(())
}

/// Write `trades.txt`: ten trades per product, alternating BUY/SELL and
/// cycling books and quantities.
pub fn generate_trades(path: &Path, seed: u64) -> TradingResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let mut rng = StdRng::seed_from_u64(seed);

    for product in TREASURY_CUSIPS {
        for row in 0..10 {
            let side = if row % 2 == 0 { "BUY" } else { "SELL" };
            // BUY trades print around 99-100, SELL trades around 100-101.
            let base = if row % 2 == 0 { 99 * 256 } else { 100 * 256 };
            let price = Decimal::from(base + rng.gen_range(0..256)) * tick();
            writeln!(
                out,
                "{},{},{},{},{},{}",
                product,
                random_id(12),
                format_price(price),
                BOOKS[row % BOOKS.len()],
                QUANTITIES[row % QUANTITIES.len()],
                side
            )?;
        }
    }
    info!(path = %path.display(), "trade data generated");
    Ok(())
}

/// Write `inquiries.txt`: ten RECEIVED inquiries per product.
pub fn generate_inquiries(path: &Path, seed: u64) -> TradingResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let mut rng = StdRng::seed_from_u64(seed);

    for product in TREASURY_CUSIPS {
        for row in 0..10 {
            let side = if row % 2 == 0 { "BUY" } else { "SELL" };
            let base = if row % 2 == 0 { 99 * 256 } else { 100 * 256 };
            let price = Decimal::from(base + rng.gen_range(0..256)) * tick();
            writeln!(
                out,
                "{},{},{},{},{},RECEIVED",
                random_id(12),
                product,
                side,
                QUANTITIES[row % QUANTITIES.len()],
                format_price(price)
            )?;
        }
    }
    info!(path = %path.display(), "inquiry data generated");
    Ok(())
}
