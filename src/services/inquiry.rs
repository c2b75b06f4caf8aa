//! Inquiry service: the customer inquiry quote workflow.
//!
//! An inquiry arriving RECEIVED is stored, fanned out, and handed to the
//! quoting connector. The connector flips it to QUOTED and re-dispatches,
//! then flips it to DONE and re-dispatches again; the DONE dispatch
//! removes the inquiry from the store. Listeners therefore observe the
//! full RECEIVED, QUOTED, DONE chain for every quoted inquiry.

use crate::domain::inquiry::Inquiry;
use crate::domain::types::{InquiryState, TradingError, TradingResult};
use crate::soa::{Connector, ListenerSet, Service, ServiceListener};
use rust_decimal::Decimal;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Quoting connector. Publishing a RECEIVED inquiry walks it through
/// QUOTED and DONE by re-entering the owning service.
pub struct InquiryConnector {
    service: Weak<InquiryService>,
}

impl Connector<Inquiry> for InquiryConnector {
    fn publish(&self, data: &Inquiry) {
        if data.state() != InquiryState::Received {
            return;
        }
        let Some(service) = self.service.upgrade() else {
            return;
        };

        let mut inquiry = data.clone();
        inquiry.set_state(InquiryState::Quoted);
        service.on_message(inquiry.clone());
        inquiry.set_state(InquiryState::Done);
        service.on_message(inquiry);
    }
}

/// Stateful inquiry workflow, keyed by inquiry id. DONE inquiries leave
/// the store; REJECTED and CUSTOMER_REJECTED remain as terminal records.
pub struct InquiryService {
    inquiries: RefCell<HashMap<String, Inquiry>>,
    listeners: ListenerSet<Inquiry>,
    connector: InquiryConnector,
}

impl InquiryService {
    /// Creates the service with its quoting connector wired back to it.
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|service| Self {
            inquiries: RefCell::new(HashMap::new()),
            listeners: ListenerSet::new(),
            connector: InquiryConnector {
                service: service.clone(),
            },
        })
    }

    /// Quote a price on a RECEIVED inquiry and fan the update out without
    /// a state transition.
    pub fn send_quote(&self, inquiry_id: &str, price: Decimal) -> TradingResult<()> {
        let updated = {
            let mut inquiries = self.inquiries.borrow_mut();
            let inquiry = inquiries
                .get_mut(inquiry_id)
                .ok_or_else(|| TradingError::UnknownInquiry(inquiry_id.to_string()))?;
            if inquiry.state() != InquiryState::Received {
                return Ok(());
            }
            inquiry.set_price(price);
            inquiry.clone()
        };
        self.listeners.notify_add(&updated);
        Ok(())
    }

    /// Reject an inquiry. Terminal; nothing is published.
    pub fn reject_inquiry(&self, inquiry_id: &str) -> TradingResult<()> {
        let mut inquiries = self.inquiries.borrow_mut();
        let inquiry = inquiries
            .get_mut(inquiry_id)
            .ok_or_else(|| TradingError::UnknownInquiry(inquiry_id.to_string()))?;
        inquiry.set_state(InquiryState::Rejected);
        Ok(())
    }
}

impl Service<String, Inquiry> for InquiryService {
    fn get(&self, key: &String) -> Option<Inquiry> {
        self.inquiries.borrow().get(key).cloned()
    }

    fn on_message(&self, data: Inquiry) {
        {
            let mut inquiries = self.inquiries.borrow_mut();
            if data.state() == InquiryState::Done {
                inquiries.remove(data.inquiry_id());
            } else {
                inquiries.insert(data.inquiry_id().to_string(), data.clone());
            }
        }

        self.listeners.notify_add(&data);

        if data.state() == InquiryState::Received {
            self.connector.publish(&data);
        }
    }

    fn add_listener(&self, listener: Rc<dyn ServiceListener<Inquiry>>) {
        self.listeners.add(listener);
    }
}
