//! Driver for the Treasury trading pipeline.
//!
//! Regenerates the synthetic input feeds, wires the service graph, then
//! pumps the four feeds in order: prices, market data, trades, inquiries.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use treasury_trading_system::config::PipelineConfig;
use treasury_trading_system::infrastructure::datagen;
use treasury_trading_system::utils::logger::setup_logger;
use treasury_trading_system::*;

use anyhow::Context;
use tracing::info;

fn main() -> anyhow::Result<()> {
    setup_logger().expect("Failed to initialize logger");
    let config = PipelineConfig::from_env();
    info!(version = VERSION, data_dir = %config.data_dir.display(), "starting trading system");

    // 1. Generate the input feeds.
    fs::create_dir_all(&config.data_dir)?;
    let price_path = config.data_dir.join("prices.txt");
    let market_data_path = config.data_dir.join("marketdata.txt");
    let trade_path = config.data_dir.join("trades.txt");
    let inquiry_path = config.data_dir.join("inquiries.txt");

    datagen::generate_prices(&price_path, config.seed, config.price_points)?;
    datagen::generate_order_books(&market_data_path, config.seed, config.book_points)?;
    datagen::generate_trades(&trade_path, config.seed)?;
    datagen::generate_inquiries(&inquiry_path, config.seed)?;

    // 2. Build the services.
    let pricing = PricingService::new();
    let algo_streaming = AlgoStreamingService::new();
    let streaming = StreamingService::new();
    let market_data = MarketDataService::new();
    let algo_execution = AlgoExecutionService::new();
    let execution = ExecutionService::new();
    let trade_booking = TradeBookingService::new();
    let position = PositionService::new();
    let risk = RiskService::new();
    let gui = GuiService::new(config.data_dir.join("gui.txt"), config.gui_throttle_ms);
    let inquiry = InquiryService::new();

    let hist_position: std::rc::Rc<HistoricalDataService<Position>> =
        HistoricalDataService::new(RecordKind::Position, &config.data_dir);
    let hist_risk: std::rc::Rc<HistoricalDataService<Pv01>> =
        HistoricalDataService::new(RecordKind::Risk, &config.data_dir);
    let hist_execution: std::rc::Rc<HistoricalDataService<ExecutionOrder>> =
        HistoricalDataService::new(RecordKind::Execution, &config.data_dir);
    let hist_streaming: std::rc::Rc<HistoricalDataService<PriceStream>> =
        HistoricalDataService::new(RecordKind::Streaming, &config.data_dir);
    let hist_inquiry: std::rc::Rc<HistoricalDataService<Inquiry>> =
        HistoricalDataService::new(RecordKind::Inquiry, &config.data_dir);
    info!("services initialized");

    // 3. Register listeners. Within a service, delivery follows this
    // registration order.
    pricing.add_listener(AlgoStreamingListener::new(algo_streaming.clone()));
    pricing.add_listener(GuiListener::new(gui));
    algo_streaming.add_listener(StreamingListener::new(streaming.clone()));
    market_data.add_listener(AlgoExecutionListener::new(algo_execution.clone()));
    algo_execution.add_listener(ExecutionListener::new(execution.clone()));
    execution.add_listener(TradeBookingExecutionListener::new(trade_booking.clone()));
    trade_booking.add_listener(PositionListener::new(position.clone()));
    position.add_listener(RiskListener::new(risk.clone()));

    position.add_listener(HistoricalListener::new(hist_position));
    execution.add_listener(HistoricalListener::new(hist_execution));
    streaming.add_listener(HistoricalListener::new(hist_streaming));
    risk.add_listener(HistoricalListener::new(hist_risk));
    inquiry.add_listener(HistoricalListener::new(hist_inquiry));
    info!("service listeners linked");

    // 4. Pump the feeds in order.
    pump(&price_path, &PriceFeed::new(pricing), "prices")?;
    pump(&market_data_path, &MarketDataFeed::new(market_data), "market data")?;
    pump(&trade_path, &TradeFeed::new(trade_booking), "trades")?;
    pump(&inquiry_path, &InquiryFeed::new(inquiry), "inquiries")?;

    info!("all data flows completed");
    Ok(())
}

fn pump<V>(path: &Path, feed: &dyn Connector<V>, name: &str) -> anyhow::Result<()> {
    info!(feed = name, "processing");
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    feed.subscribe(&mut BufReader::new(file))
        .with_context(|| format!("processing {name}"))?;
    info!(feed = name, "completed");
    Ok(())
}
