//! Historical data service: persists pipeline records to append-only
//! files, one per record kind.

use crate::domain::execution::ExecutionOrder;
use crate::domain::inquiry::Inquiry;
use crate::domain::pricing::PriceStream;
use crate::domain::risk::Pv01;
use crate::domain::trading::Position;
use crate::infrastructure::sinks::RecordSink;
use crate::soa::{Connector, ListenerSet, Service, ServiceListener};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

/// The kinds of records the service persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Position,
    Risk,
    Execution,
    Streaming,
    Inquiry,
}

impl RecordKind {
    /// Output file name for this kind.
    pub fn file_name(&self) -> &'static str {
        match self {
            RecordKind::Position => "positions.txt",
            RecordKind::Risk => "risk.txt",
            RecordKind::Execution => "executions.txt",
            RecordKind::Streaming => "streaming.txt",
            RecordKind::Inquiry => "aggregatedinquiries.txt",
        }
    }
}

/// A record the historical service can key and persist.
pub trait HistoricalRecord: Clone + fmt::Display + 'static {
    /// Store key the record persists under.
    fn persist_key(&self) -> String;
}

impl HistoricalRecord for Position {
    fn persist_key(&self) -> String {
        self.product().id().to_string()
    }
}

impl HistoricalRecord for Pv01 {
    fn persist_key(&self) -> String {
        self.product().id().to_string()
    }
}

impl HistoricalRecord for PriceStream {
    fn persist_key(&self) -> String {
        self.product().id().to_string()
    }
}

impl HistoricalRecord for ExecutionOrder {
    fn persist_key(&self) -> String {
        self.product().id().to_string()
    }
}

impl HistoricalRecord for Inquiry {
    // Keyed by inquiry id so concurrent inquiries on one product do not
    // collapse into a single slot.
    fn persist_key(&self) -> String {
        self.inquiry_id().to_string()
    }
}

/// Keyed store of the latest record per persist key, with every arrival
/// appended to the kind's output file.
pub struct HistoricalDataService<V: HistoricalRecord> {
    kind: RecordKind,
    records: RefCell<HashMap<String, V>>,
    connector: RecordSink,
    listeners: ListenerSet<V>,
}

impl<V: HistoricalRecord> HistoricalDataService<V> {
    /// Creates the service persisting into `data_dir`.
    pub fn new(kind: RecordKind, data_dir: impl AsRef<Path>) -> Rc<Self> {
        Rc::new(Self {
            kind,
            records: RefCell::new(HashMap::new()),
            connector: RecordSink::new(data_dir.as_ref().join(kind.file_name())),
            listeners: ListenerSet::new(),
        })
    }

    /// The record kind this service persists.
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Insert or overwrite the record and append it to the output file.
    pub fn persist(&self, data: V) {
        self.records
            .borrow_mut()
            .insert(data.persist_key(), data.clone());
        self.connector.publish(&data);
    }
}

impl<V: HistoricalRecord> Service<String, V> for HistoricalDataService<V> {
    fn get(&self, key: &String) -> Option<V> {
        self.records.borrow().get(key).cloned()
    }

    fn on_message(&self, data: V) {
        self.persist(data.clone());
        self.listeners.notify_add(&data);
    }

    fn add_listener(&self, listener: Rc<dyn ServiceListener<V>>) {
        self.listeners.add(listener);
    }
}

/// Subscribes a historical service to the service producing its records.
pub struct HistoricalListener<V: HistoricalRecord> {
    service: Rc<HistoricalDataService<V>>,
}

impl<V: HistoricalRecord> HistoricalListener<V> {
    /// Creates the listener for registration upstream.
    pub fn new(service: Rc<HistoricalDataService<V>>) -> Rc<Self> {
        Rc::new(Self { service })
    }
}

impl<V: HistoricalRecord> ServiceListener<V> for HistoricalListener<V> {
    fn process_add(&self, data: &V) {
        self.service.persist(data.clone());
    }
}
