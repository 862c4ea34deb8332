use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::aggregate::DoctorRef;
use super::schedule::TimeSession;

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub enum Command {
    /// Open the booking wizard for a doctor at a hospital
    StartBooking {
        id: String,
        user_id: String,
        doctor: DoctorRef,
        hospital: String,
    },

    /// Pick a calendar day
    SelectDate {
        date: NaiveDate,
    },

    /// Pick morning, afternoon or evening
    SelectSession {
        session: TimeSession,
    },

    /// Pick a slot within the chosen session
    SelectTime {
        time: String,
    },

    /// Accept the chosen slot and move on to payment
    ConfirmTime,

    /// Return to the previous wizard step
    GoBack,

    /// Simulated payment finished
    CompletePayment {
        payment_reference: String,
    },

    /// Rate a past appointment
    Rate {
        doctor_rating: u8,
        service_rating: u8,
    },

    /// Cancel an upcoming appointment
    Cancel,
}
