use serde::{Deserialize, Serialize};

use super::aggregate::{DeliveryDetails, PaymentMethod};
use super::cart::OrderLine;

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub enum Command {
    /// Check out a priced cart
    PlaceOrder {
        id: String,
        user_id: String,
        delivery: DeliveryDetails,
        payment_method: PaymentMethod,
        lines: Vec<OrderLine>,
    },
}
