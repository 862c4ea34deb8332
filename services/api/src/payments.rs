use reqwest::Url;
use serde::Serialize;

use domain::appointments::{Appointment, BOOKING_FEE};

use crate::{config::Config, error::ApiError};

/// What the payment step shows before the simulated payment runs
#[derive(Clone, Debug, Serialize)]
pub struct PaymentSummary {
    pub consultation_fee: u32,
    pub booking_fee: u32,
    pub total: u32,
    pub upi_link: String,
}

impl PaymentSummary {
    pub fn for_appointment(appointment: &Appointment, config: &Config) -> Result<Self, ApiError> {
        let total = appointment.payment_total();
        let note = format!("Consultation with {}", appointment.doctor.name);

        Ok(Self {
            consultation_fee: appointment.doctor.consultation_fee,
            booking_fee: BOOKING_FEE,
            total,
            upi_link: upi_link(&config.upi_payee_address, &config.upi_payee_name, total, &note)?,
        })
    }
}

/// UPI deep link; opening it never confirms the payment back to us
pub fn upi_link(
    payee_address: &str,
    payee_name: &str,
    amount: u32,
    note: &str,
) -> Result<String, ApiError> {
    let amount = format!("{amount}.00");
    Url::parse_with_params(
        "upi://pay",
        &[
            ("pa", payee_address),
            ("pn", payee_name),
            ("am", amount.as_str()),
            ("tn", note),
            ("cu", "INR"),
        ],
    )
    .map(String::from)
    .map_err(|e| ApiError::Internal(format!("Invalid UPI link: {e}")))
}
