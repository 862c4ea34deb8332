use chrono::{DateTime, Utc};
use cqrs_es::DomainEvent;
use serde::{Deserialize, Serialize};

use super::aggregate::{DeliveryDetails, PaymentMethod};
use super::cart::OrderLine;

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(tag = "type")]
pub enum Event {
    OrderPlaced {
        id: String,
        user_id: String,
        delivery: DeliveryDetails,
        payment_method: PaymentMethod,
        lines: Vec<OrderLine>,
        subtotal: u32,
        delivery_fee: u32,
        total: u32,
        prescription_required: bool,
        placed_at: DateTime<Utc>,
    },
}

impl DomainEvent for Event {
    fn event_type(&self) -> String {
        match self {
            Event::OrderPlaced { .. } => "Order:Placed".to_string(),
        }
    }

    fn event_version(&self) -> String {
        "1.0".to_string()
    }
}
