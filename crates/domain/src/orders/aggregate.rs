use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cqrs_es::Aggregate;
use serde::{Deserialize, Serialize};

use crate::{
    clock::{Clock, SystemClock},
    errors::Error,
    validation::FieldErrors,
};

use super::cart::{CartTotals, OrderLine, MAX_QUANTITY};
use super::{Command, Event};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub enum PaymentMethod {
    #[default]
    CashOnDelivery,
    Upi,
    Card,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct DeliveryDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: Option<String>,
    pub pincode: Option<String>,
}

impl DeliveryDetails {
    pub fn validate(&self) -> Result<(), Error> {
        FieldErrors::default()
            .require("name", &self.name)
            .phone("phone", &self.phone)
            .require("address", &self.address)
            .check(
                "pincode",
                self.pincode.as_deref().map_or(true, |p| {
                    p.len() == 6 && p.chars().all(|c| c.is_ascii_digit())
                }),
                "Enter a 6-digit pincode",
            )
            .finish()
    }
}

/// Medicine order; immutable once placed
#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub placed_at: DateTime<Utc>,
    pub delivery: DeliveryDetails,
    pub payment_method: PaymentMethod,
    pub lines: Vec<OrderLine>,
    pub subtotal: u32,
    pub delivery_fee: u32,
    pub total: u32,
    pub prescription_required: bool,
}

pub const AGGREGATE_TYPE: &str = "Order";

#[derive(Clone)]
pub struct Services {
    pub clock: Arc<dyn Clock>,
}

impl Services {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[async_trait]
impl Aggregate for Order {
    type Command = Command;
    type Event = Event;
    type Error = Error;
    type Services = Services;

    fn aggregate_type() -> String {
        AGGREGATE_TYPE.to_string()
    }

    async fn handle(
        &self,
        command: Self::Command,
        services: &Self::Services,
    ) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            Command::PlaceOrder { id, user_id, delivery, payment_method, lines } => {
                if !self.id.is_empty() {
                    return Err(Error::Uniqueness { field: "id".to_string() });
                }
                delivery.validate()?;
                if lines.is_empty() {
                    return Err(Error::validation("Cart is empty"));
                }
                if lines.iter().any(|l| l.quantity == 0 || l.quantity > MAX_QUANTITY) {
                    return Err(Error::validation(format!(
                        "Quantities must be between 1 and {MAX_QUANTITY}"
                    )));
                }

                let totals = CartTotals::from_lines(lines);

                Ok(vec![Event::OrderPlaced {
                    id,
                    user_id,
                    delivery,
                    payment_method,
                    lines: totals.lines,
                    subtotal: totals.subtotal,
                    delivery_fee: totals.delivery_fee,
                    total: totals.total,
                    prescription_required: totals.prescription_required,
                    placed_at: services.clock.now_utc(),
                }])
            }
        }
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            Event::OrderPlaced {
                id,
                user_id,
                delivery,
                payment_method,
                lines,
                subtotal,
                delivery_fee,
                total,
                prescription_required,
                placed_at,
            } => {
                self.id = id;
                self.user_id = user_id;
                self.delivery = delivery;
                self.payment_method = payment_method;
                self.lines = lines;
                self.subtotal = subtotal;
                self.delivery_fee = delivery_fee;
                self.total = total;
                self.prescription_required = prescription_required;
                self.placed_at = placed_at;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{catalog::Catalog, clock::FixedClock, orders::Cart};

    fn services() -> Services {
        let now = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap();
        Services::new(Arc::new(FixedClock(now)))
    }

    fn delivery() -> DeliveryDetails {
        DeliveryDetails {
            name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            address: "14 MG Road".to_string(),
            city: Some("Bangalore".to_string()),
            pincode: Some("560001".to_string()),
        }
    }

    fn place(lines: Vec<OrderLine>, delivery: DeliveryDetails) -> Command {
        Command::PlaceOrder {
            id: "o1".to_string(),
            user_id: "u1".to_string(),
            delivery,
            payment_method: PaymentMethod::Upi,
            lines,
        }
    }

    #[tokio::test]
    async fn places_order_with_totals() {
        let catalog = Catalog::seeded().unwrap();
        let mut cart = Cart::default();
        cart.add("m2", 2).unwrap(); // 120 each
        cart.add("m5", 1).unwrap(); // 250

        let events = Order::default()
            .handle(place(cart.lines(&catalog), delivery()), &services())
            .await
            .unwrap();

        let mut order = Order::default();
        for event in events {
            order.apply(event);
        }
        assert_eq!(order.subtotal, 490);
        assert_eq!(order.delivery_fee, 50);
        assert_eq!(order.total, 540);
        assert!(order.prescription_required);
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.payment_method, PaymentMethod::Upi);
    }

    #[tokio::test]
    async fn reports_every_invalid_field() {
        let catalog = Catalog::seeded().unwrap();
        let mut cart = Cart::default();
        cart.add("m1", 1).unwrap();

        let bad = DeliveryDetails {
            name: " ".to_string(),
            phone: "12345".to_string(),
            address: String::new(),
            city: None,
            pincode: Some("5600".to_string()),
        };
        let err = Order::default()
            .handle(place(cart.lines(&catalog), bad), &services())
            .await
            .unwrap_err();

        match err {
            Error::InvalidFields(fields) => {
                let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, vec!["name", "phone", "address", "pincode"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() {
        let err = Order::default()
            .handle(place(vec![], delivery()), &services())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[tokio::test]
    async fn placed_order_is_immutable() {
        let order = Order { id: "o1".to_string(), ..Default::default() };
        let err = order
            .handle(place(vec![], delivery()), &services())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Uniqueness { .. }));
    }

    #[tokio::test]
    async fn oversized_quantities_are_rejected() {
        let catalog = Catalog::seeded().unwrap();
        let medicine = catalog.medicine("m1").unwrap();
        let line = OrderLine::from_medicine(medicine, u32::MAX);

        let err = Order::default()
            .handle(place(vec![line], delivery()), &services())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }
}
