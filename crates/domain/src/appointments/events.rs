use chrono::{DateTime, NaiveDate, Utc};
use cqrs_es::DomainEvent;
use serde::{Deserialize, Serialize};

use super::aggregate::{AppointmentStatus, BookingStep, DoctorRef, PaymentStatus};
use super::schedule::TimeSession;

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(tag = "type")]
pub enum Event {
    BookingStarted {
        id: String,
        user_id: String,
        doctor: DoctorRef,
        hospital: String,
        created_at: DateTime<Utc>,
    },

    DateSelected {
        id: String,
        date: NaiveDate,
        updated_at: DateTime<Utc>,
    },

    SessionSelected {
        id: String,
        session: TimeSession,
        updated_at: DateTime<Utc>,
    },

    TimeSelected {
        id: String,
        time: String,
        updated_at: DateTime<Utc>,
    },

    TimeConfirmed {
        id: String,
        updated_at: DateTime<Utc>,
    },

    SteppedBack {
        id: String,
        step: BookingStep,
        updated_at: DateTime<Utc>,
    },

    AppointmentConfirmed {
        id: String,
        payment_reference: String,
        amount_paid: u32,
        status: AppointmentStatus,
        payment_status: PaymentStatus,
        updated_at: DateTime<Utc>,
    },

    AppointmentRated {
        id: String,
        doctor_rating: u8,
        service_rating: u8,
        updated_at: DateTime<Utc>,
    },

    AppointmentCancelled {
        id: String,
        updated_at: DateTime<Utc>,
    },
}

impl DomainEvent for Event {
    fn event_type(&self) -> String {
        match self {
            Event::BookingStarted { .. } => "Appointment:BookingStarted".to_string(),
            Event::DateSelected { .. } => "Appointment:DateSelected".to_string(),
            Event::SessionSelected { .. } => "Appointment:SessionSelected".to_string(),
            Event::TimeSelected { .. } => "Appointment:TimeSelected".to_string(),
            Event::TimeConfirmed { .. } => "Appointment:TimeConfirmed".to_string(),
            Event::SteppedBack { .. } => "Appointment:SteppedBack".to_string(),
            Event::AppointmentConfirmed { .. } => "Appointment:Confirmed".to_string(),
            Event::AppointmentRated { .. } => "Appointment:Rated".to_string(),
            Event::AppointmentCancelled { .. } => "Appointment:Cancelled".to_string(),
        }
    }

    fn event_version(&self) -> String {
        "1.0".to_string()
    }
}
