use serde::{Deserialize, Serialize};

use super::aggregate::{DeliveryDetails, PaymentMethod};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddToCartInput {
    pub medicine_id: String,
    #[serde(default = "one")]
    pub quantity: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateQuantityInput {
    pub quantity: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckoutInput {
    pub delivery: DeliveryDetails,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

fn one() -> u32 {
    1
}
