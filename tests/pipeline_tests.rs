//! End-to-end scenarios over the fully wired service graph.

use std::cell::RefCell;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::rc::Rc;

use rust_decimal_macros::dec;
use treasury_trading_system::*;

/// The full pipeline wired the way the driver wires it, with sinks
/// rooted in a scratch directory.
struct Pipeline {
    pricing: Rc<PricingService>,
    market_data: Rc<MarketDataService>,
    execution: Rc<ExecutionService>,
    trade_booking: Rc<TradeBookingService>,
    position: Rc<PositionService>,
    risk: Rc<RiskService>,
    inquiry: Rc<InquiryService>,
}

fn build_pipeline(data_dir: &Path) -> Pipeline {
    let pricing = PricingService::new();
    let algo_streaming = AlgoStreamingService::new();
    let streaming = StreamingService::new();
    let market_data = MarketDataService::new();
    let algo_execution = AlgoExecutionService::new();
    let execution = ExecutionService::new();
    let trade_booking = TradeBookingService::new();
    let position = PositionService::new();
    let risk = RiskService::new();
    let gui = GuiService::new(data_dir.join("gui.txt"), 300);
    let inquiry = InquiryService::new();

    let hist_position: Rc<HistoricalDataService<Position>> =
        HistoricalDataService::new(RecordKind::Position, data_dir);
    let hist_risk: Rc<HistoricalDataService<Pv01>> =
        HistoricalDataService::new(RecordKind::Risk, data_dir);
    let hist_execution: Rc<HistoricalDataService<ExecutionOrder>> =
        HistoricalDataService::new(RecordKind::Execution, data_dir);
    let hist_streaming: Rc<HistoricalDataService<PriceStream>> =
        HistoricalDataService::new(RecordKind::Streaming, data_dir);
    let hist_inquiry: Rc<HistoricalDataService<Inquiry>> =
        HistoricalDataService::new(RecordKind::Inquiry, data_dir);

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

    Pipeline {
        pricing,
        market_data,
        execution,
        trade_booking,
        position,
        risk,
        inquiry,
    }
}

/// Depth row with every level at the given top-of-book prices, so the
/// aggregated best bid/offer is deterministic.
fn depth_row(cusip: &str, bid: &str, offer: &str, size: i64) -> String {
    let mut row = format!("2024-01-02 09:00:00.000,{cusip}");
    for _ in 0..5 {
        row.push_str(&format!(",{bid},{size},{offer},{size}"));
    }
    row
}

#[test]
fn test_price_flows_to_streams_and_gui() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = build_pipeline(dir.path());

    // Two quotes, mids one tick apart. Derived mid/spread are exact.
    let data = "Timestamp,CUSIP,Bid,Ask\n\
                2024-01-02 09:00:00.000,9128283H1,99-002,99-012\n\
                2024-01-02 09:00:00.005,9128283H1,99-003,99-013\n";
    PriceFeed::new(pipeline.pricing.clone())
        .subscribe(&mut Cursor::new(data))
        .unwrap();

    let price = pipeline.pricing.get(&"9128283H1".to_string()).unwrap();
    assert_eq!(price.mid(), dec!(99) + dec!(7) / dec!(256));
    assert_eq!(price.spread(), dec!(0.03125));

    // Both prices were streamed and persisted; quantities toggled 1M/2M.
    let streaming = fs::read_to_string(dir.path().join("streaming.txt")).unwrap();
    let lines: Vec<&str> = streaming.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(",1000000,2000000,BID,"));
    assert!(lines[1].contains(",2000000,4000000,BID,"));

    // The second quote arrived inside the 300 ms throttle window.
    let gui = fs::read_to_string(dir.path().join("gui.txt")).unwrap();
    assert_eq!(gui.lines().count(), 1);
    assert!(gui.lines().next().unwrap().contains("9128283H1,99-00"));
}

#[test]
fn test_tight_book_cascades_to_risk() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = build_pipeline(dir.path());

    // Best bid 99-016, best offer 99-017: one tick apart, tight. First
    // book (even parity) lifts the offer with the bid's quantity.
    let data = format!(
        "Timestamp,CUSIP,header\n{}\n",
        depth_row("9128283H1", "99-016", "99-017", 1_000_000)
    );
    MarketDataFeed::new(pipeline.market_data.clone())
        .subscribe(&mut Cursor::new(data))
        .unwrap();

    // The execution crossed the book and was stored by order id.
    let executions = fs::read_to_string(dir.path().join("executions.txt")).unwrap();
    let lines: Vec<&str> = executions.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("9128283H1"));
    assert!(lines[0].contains(",BID,MARKET,99-017,5000000,0,"));

    // Booked to TRSY2 (first execution), quantity = visible + hidden.
    let position = pipeline
        .position
        .get(&"9128283H1".to_string())
        .expect("position created from booked execution");
    assert_eq!(position.quantity_in("TRSY2"), 5_000_000);

    // Risk carries the product's static PV01 factor.
    let pv01 = pipeline.risk.get(&"9128283H1".to_string()).unwrap();
    assert_eq!(pv01.pv01(), dec!(0.01948992));
    assert_eq!(pv01.quantity(), 5_000_000);

    let risk_lines = fs::read_to_string(dir.path().join("risk.txt")).unwrap();
    assert_eq!(risk_lines.lines().count(), 1);
}

#[test]
fn test_wide_books_emit_nothing_and_shift_parity() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = build_pipeline(dir.path());

    // A wide book (three ticks), then two tight books. The wide book
    // burns even parity, so the tight books execute OFFER then BID.
    let data = format!(
        "Timestamp,CUSIP,header\n{}\n{}\n{}\n",
        depth_row("9128283H1", "99-016", "99-021", 1_000_000),
        depth_row("9128283H1", "99-016", "99-017", 1_000_000),
        depth_row("9128283H1", "99-016", "99-017", 1_000_000),
    );
    MarketDataFeed::new(pipeline.market_data.clone())
        .subscribe(&mut Cursor::new(data))
        .unwrap();

    let executions = fs::read_to_string(dir.path().join("executions.txt")).unwrap();
    let lines: Vec<&str> = executions.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(",OFFER,MARKET,99-016,"));
    assert!(lines[1].contains(",BID,MARKET,99-017,"));
}

#[test]
fn test_executions_cycle_through_books() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = build_pipeline(dir.path());

    let mut data = String::from("Timestamp,CUSIP,header\n");
    for _ in 0..6 {
        data.push_str(&depth_row("9128283H1", "99-016", "99-017", 1_000_000));
        data.push('\n');
    }
    MarketDataFeed::new(pipeline.market_data.clone())
        .subscribe(&mut Cursor::new(data))
        .unwrap();

    // Executions book to TRSY2, TRSY3, TRSY1, TRSY2, ...; with six books
    // the per-book positions net out across alternating BUY/SELL sides.
    let position = pipeline.position.get(&"9128283H1".to_string()).unwrap();
    let positions = fs::read_to_string(dir.path().join("positions.txt")).unwrap();
    assert_eq!(positions.lines().count(), 6);
    assert_eq!(
        position.aggregate(),
        position.quantity_in("TRSY1")
            + position.quantity_in("TRSY2")
            + position.quantity_in("TRSY3")
    );
}

#[test]
fn test_trades_aggregate_positions_and_risk() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = build_pipeline(dir.path());

    let data = "9128283H1,TRADE0000001,99-16+,TRSY1,1000000,BUY\n\
                9128283H1,TRADE0000002,99-16+,TRSY1,400000,SELL\n";
    TradeFeed::new(pipeline.trade_booking.clone())
        .subscribe(&mut Cursor::new(data))
        .unwrap();

    let position = pipeline.position.get(&"9128283H1".to_string()).unwrap();
    assert_eq!(position.aggregate(), 600_000);

    // The store accumulates the arriving aggregates: 1_000_000 + 600_000.
    let pv01 = pipeline.risk.get(&"9128283H1".to_string()).unwrap();
    assert_eq!(pv01.pv01(), dec!(0.01948992));
    assert_eq!(pv01.quantity(), 1_600_000);

    // Each booking persisted a position line and a risk line.
    let positions = fs::read_to_string(dir.path().join("positions.txt")).unwrap();
    let lines: Vec<&str> = positions.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("9128283H1,TRSY1,1000000"));
    assert!(lines[1].ends_with("9128283H1,TRSY1,600000"));

    let risk_lines = fs::read_to_string(dir.path().join("risk.txt")).unwrap();
    assert!(risk_lines.lines().next().unwrap().contains(",0.01948992,1000000"));
}

#[test]
fn test_received_inquiry_persists_three_transitions() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = build_pipeline(dir.path());

    let data = "INQ000000001,9128283H1,BUY,1000000,99-16+,RECEIVED\n";
    InquiryFeed::new(pipeline.inquiry.clone())
        .subscribe(&mut Cursor::new(data))
        .unwrap();

    let history = fs::read_to_string(dir.path().join("aggregatedinquiries.txt")).unwrap();
    let states: Vec<&str> = history
        .lines()
        .map(|line| line.rsplit(',').next().unwrap())
        .collect();
    assert_eq!(states, vec!["RECEIVED", "QUOTED", "DONE"]);

    // DONE removed the inquiry from the live store.
    assert!(pipeline.inquiry.get(&"INQ000000001".to_string()).is_none());
}

#[test]
fn test_terminal_inquiries_stay_in_store() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = build_pipeline(dir.path());

    let data = "INQ000000002,9128283H1,SELL,2000000,100-000,REJECTED\n\
                INQ000000003,9128283L2,BUY,1000000,99-000,NONSENSE\n";
    InquiryFeed::new(pipeline.inquiry.clone())
        .subscribe(&mut Cursor::new(data))
        .unwrap();

    let rejected = pipeline.inquiry.get(&"INQ000000002".to_string()).unwrap();
    assert_eq!(rejected.state(), InquiryState::Rejected);
    let degraded = pipeline.inquiry.get(&"INQ000000003".to_string()).unwrap();
    assert_eq!(degraded.state(), InquiryState::CustomerRejected);

    let history = fs::read_to_string(dir.path().join("aggregatedinquiries.txt")).unwrap();
    assert_eq!(history.lines().count(), 2);
}

/// Observes the relative order of position and risk callbacks.
struct OrderProbe {
    label: &'static str,
    log: Rc<RefCell<Vec<&'static str>>>,
}

impl ServiceListener<Position> for OrderProbe {
    fn process_add(&self, _data: &Position) {
        self.log.borrow_mut().push(self.label);
    }
}

#[test]
fn test_fan_out_follows_registration_order() {
    let position = PositionService::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    for label in ["first", "second", "third"] {
        position.add_listener(Rc::new(OrderProbe {
            label,
            log: log.clone(),
        }));
    }

    let trade = Trade::new(
        bond_from_cusip("9128283H1").unwrap(),
        "T1",
        dec!(99.5),
        "TRSY1",
        1_000_000,
        TradeSide::Buy,
    );
    position.add_trade(&trade);

    assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
}

#[test]
fn test_generated_feeds_drive_the_pipeline() {
    use treasury_trading_system::infrastructure::datagen;

    let dir = tempfile::tempdir().unwrap();
    let pipeline = build_pipeline(dir.path());

    let price_path = dir.path().join("prices.txt");
    let trade_path = dir.path().join("trades.txt");
    let inquiry_path = dir.path().join("inquiries.txt");
    datagen::generate_prices(&price_path, 7, 20).unwrap();
    datagen::generate_trades(&trade_path, 7).unwrap();
    datagen::generate_inquiries(&inquiry_path, 7).unwrap();

    PriceFeed::new(pipeline.pricing.clone())
        .subscribe(&mut std::io::BufReader::new(
            fs::File::open(&price_path).unwrap(),
        ))
        .unwrap();
    TradeFeed::new(pipeline.trade_booking.clone())
        .subscribe(&mut std::io::BufReader::new(
            fs::File::open(&trade_path).unwrap(),
        ))
        .unwrap();
    InquiryFeed::new(pipeline.inquiry.clone())
        .subscribe(&mut std::io::BufReader::new(
            fs::File::open(&inquiry_path).unwrap(),
        ))
        .unwrap();

    // Every product has a live price and a net position of
    // 1M - 2M + 3M - 4M + 5M - 1M + 2M - 3M + 4M - 5M = 0.
    for cusip in TREASURY_CUSIPS {
        assert!(pipeline.pricing.get(&cusip.to_string()).is_some());
        let position = pipeline.position.get(&cusip.to_string()).unwrap();
        assert_eq!(position.aggregate(), 0);
    }

    // All quoted inquiries completed and left the store: three history
    // rows per generated inquiry.
    let history = fs::read_to_string(dir.path().join("aggregatedinquiries.txt")).unwrap();
    assert_eq!(history.lines().count(), 3 * 10 * TREASURY_CUSIPS.len());

    // Sector risk over the whole curve matches the per-product stores.
    let curve = BucketedSector::new(
        "Treasuries",
        TREASURY_CUSIPS
            .iter()
            .map(|cusip| bond_from_cusip(cusip).unwrap())
            .collect(),
    );
    let sector = pipeline.risk.bucketed_risk(&curve);
    let expected_quantity: i64 = TREASURY_CUSIPS
        .iter()
        .map(|cusip| pipeline.risk.get(&cusip.to_string()).unwrap().quantity())
        .sum();
    assert_eq!(sector.quantity(), expected_quantity);

    // The execution service saw no executions in this run.
    assert!(pipeline
        .execution
        .get(&"A00000000000".to_string())
        .is_none());
}
