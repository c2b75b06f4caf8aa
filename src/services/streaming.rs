//! Streaming service: forwards algo streams as published price streams.

use crate::domain::pricing::{AlgoStream, PriceStream};
use crate::soa::{Connector, ListenerSet, Service, ServiceListener};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::info;

/// Publish-only connector that emits a human-readable audit line for every
/// published stream.
pub struct StreamingAuditConnector;

impl Connector<PriceStream> for StreamingAuditConnector {
    fn publish(&self, data: &PriceStream) {
        info!(
            product = %data.product().id(),
            bid = %data.bid(),
            offer = %data.offer(),
            "price stream published"
        );
    }
}

/// Stores the latest published stream per product and forwards each
/// arrival to listeners and to the audit connector.
pub struct StreamingService {
    streams: RefCell<HashMap<String, PriceStream>>,
    listeners: ListenerSet<PriceStream>,
    connector: StreamingAuditConnector,
}

impl StreamingService {
    /// Creates the service.
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            streams: RefCell::new(HashMap::new()),
            listeners: ListenerSet::new(),
            connector: StreamingAuditConnector,
        })
    }

    /// Store and fan out the inner stream of an algo stream, then publish
    /// it externally through the audit connector.
    pub fn add_price_stream(&self, algo_stream: &AlgoStream) {
        let stream = algo_stream.price_stream().clone();
        self.on_message(stream.clone());
        self.connector.publish(&stream);
    }
}

impl Service<String, PriceStream> for StreamingService {
    fn get(&self, key: &String) -> Option<PriceStream> {
        self.streams.borrow().get(key).cloned()
    }

    fn on_message(&self, data: PriceStream) {
        self.streams
            .borrow_mut()
            .insert(data.product().id().to_string(), data.clone());
        self.listeners.notify_add(&data);
    }

    fn add_listener(&self, listener: Rc<dyn ServiceListener<PriceStream>>) {
        self.listeners.add(listener);
    }
}

/// Subscribes the streaming service to the algo streaming service.
pub struct StreamingListener {
    service: Rc<StreamingService>,
}

impl StreamingListener {
    /// Creates the listener for registration upstream.
    pub fn new(service: Rc<StreamingService>) -> Rc<Self> {
        Rc::new(Self { service })
    }
}

impl ServiceListener<AlgoStream> for StreamingListener {
    fn process_add(&self, data: &AlgoStream) {
        self.service.add_price_stream(data);
    }
}
