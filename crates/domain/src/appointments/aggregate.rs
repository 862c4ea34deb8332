use std::{fmt, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use cqrs_es::Aggregate;
use serde::{Deserialize, Serialize};

use crate::{
    clock::{Clock, SystemClock},
    errors::Error,
};

use super::schedule::{appointment_instant, is_bookable, TimeSession};
use super::{Command, Event};

/// Fixed surcharge added to the consultation fee at payment time
pub const BOOKING_FEE: u32 = 15;

/// Booking wizard step
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStep {
    /// Choosing a calendar day
    #[default]
    Date,
    /// Choosing session and slot
    Time,
    /// Reviewing the total and paying
    Payment,
    /// Appointment booked
    Confirmed,
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::Time => write!(f, "time"),
            Self::Payment => write!(f, "payment"),
            Self::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// Stored status of a confirmed appointment.
///
/// Nothing moves an appointment to `Completed` when its time passes; the
/// stored value is never reconciled with the clock. Listings bucket a passed
/// `Upcoming` visit as history, and rating accepts it as well.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub enum AppointmentStatus {
    Upcoming,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

/// Snapshot of the booked doctor taken when the wizard starts
#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct DoctorRef {
    pub doctor_id: String,
    pub name: String,
    pub specialty: String,
    pub consultation_fee: u32,
}

/// Appointment aggregate, including the wizard that books it
#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub doctor: DoctorRef,
    pub hospital: String,

    // Wizard progress
    pub step: BookingStep,
    pub date: Option<NaiveDate>,
    pub session: Option<TimeSession>,
    pub time: Option<String>,

    // Set once confirmed
    pub status: Option<AppointmentStatus>,
    pub payment_status: PaymentStatus,
    pub payment_reference: Option<String>,
    pub amount_paid: Option<u32>,

    pub doctor_rating: Option<u8>,
    pub service_rating: Option<u8>,
}

pub const AGGREGATE_TYPE: &str = "Appointment";

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
impl Aggregate for Appointment {
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
        let clock = &services.clock;

        match command {
            Command::StartBooking { id, user_id, doctor, hospital } => {
                self.validate_new()?;
                if hospital.trim().is_empty() {
                    return Err(Error::validation("Hospital is required"));
                }

                Ok(vec![Event::BookingStarted {
                    id,
                    user_id,
                    doctor,
                    hospital,
                    created_at: clock.now_utc(),
                }])
            }

            Command::SelectDate { date } => {
                self.validate_existing()?;
                self.validate_step(&[BookingStep::Date, BookingStep::Time], BookingStep::Time)?;
                if !is_bookable(date, clock.today()) {
                    return Err(Error::validation(format!("{date} is in the past")));
                }

                Ok(vec![Event::DateSelected {
                    id: self.id.clone(),
                    date,
                    updated_at: clock.now_utc(),
                }])
            }

            Command::SelectSession { session } => {
                self.validate_existing()?;
                self.validate_step(&[BookingStep::Time], BookingStep::Time)?;

                Ok(vec![Event::SessionSelected {
                    id: self.id.clone(),
                    session,
                    updated_at: clock.now_utc(),
                }])
            }

            Command::SelectTime { time } => {
                self.validate_existing()?;
                self.validate_step(&[BookingStep::Time], BookingStep::Time)?;
                self.validate_slot(&time, clock.now())?;

                Ok(vec![Event::TimeSelected {
                    id: self.id.clone(),
                    time,
                    updated_at: clock.now_utc(),
                }])
            }

            Command::ConfirmTime => {
                self.validate_existing()?;
                self.validate_step(&[BookingStep::Time], BookingStep::Payment)?;
                if self.date.is_none() || self.time.is_none() {
                    return Err(Error::validation("Pick a date and time first"));
                }
                self.validate_still_ahead(clock.now())?;

                Ok(vec![Event::TimeConfirmed {
                    id: self.id.clone(),
                    updated_at: clock.now_utc(),
                }])
            }

            Command::GoBack => {
                self.validate_existing()?;
                let step = match self.step {
                    BookingStep::Time => BookingStep::Date,
                    BookingStep::Payment => BookingStep::Time,
                    from => {
                        return Err(Error::InvalidStateTransition {
                            from: from.to_string(),
                            to: "previous step".to_string(),
                        })
                    }
                };

                Ok(vec![Event::SteppedBack {
                    id: self.id.clone(),
                    step,
                    updated_at: clock.now_utc(),
                }])
            }

            Command::CompletePayment { payment_reference } => {
                self.validate_existing()?;
                self.validate_step(&[BookingStep::Payment], BookingStep::Confirmed)?;
                self.validate_still_ahead(clock.now())?;

                Ok(vec![Event::AppointmentConfirmed {
                    id: self.id.clone(),
                    payment_reference,
                    amount_paid: self.payment_total(),
                    status: AppointmentStatus::Upcoming,
                    payment_status: PaymentStatus::Paid,
                    updated_at: clock.now_utc(),
                }])
            }

            Command::Rate { doctor_rating, service_rating } => {
                self.validate_existing()?;
                self.validate_can_rate(clock.now())?;
                for (field, rating) in [("doctor", doctor_rating), ("service", service_rating)] {
                    if !(1..=5).contains(&rating) {
                        return Err(Error::validation(format!(
                            "{field} rating must be between 1 and 5"
                        )));
                    }
                }

                Ok(vec![Event::AppointmentRated {
                    id: self.id.clone(),
                    doctor_rating,
                    service_rating,
                    updated_at: clock.now_utc(),
                }])
            }

            Command::Cancel => {
                self.validate_existing()?;
                if self.status != Some(AppointmentStatus::Upcoming) {
                    return Err(Error::InvalidStateTransition {
                        from: self.status_label(),
                        to: AppointmentStatus::Cancelled.to_string(),
                    });
                }

                Ok(vec![Event::AppointmentCancelled {
                    id: self.id.clone(),
                    updated_at: clock.now_utc(),
                }])
            }
        }
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            Event::BookingStarted { id, user_id, doctor, hospital, created_at } => {
                self.id = id;
                self.user_id = user_id;
                self.doctor = doctor;
                self.hospital = hospital;
                self.created_at = created_at;
                self.updated_at = created_at;
                self.step = BookingStep::Date;
            }

            Event::DateSelected { date, updated_at, .. } => {
                self.date = Some(date);
                self.session = None;
                self.time = None;
                self.step = BookingStep::Time;
                self.updated_at = updated_at;
            }

            Event::SessionSelected { session, updated_at, .. } => {
                if self.session != Some(session) {
                    self.time = None;
                }
                self.session = Some(session);
                self.updated_at = updated_at;
            }

            Event::TimeSelected { time, updated_at, .. } => {
                self.time = Some(time);
                self.updated_at = updated_at;
            }

            Event::TimeConfirmed { updated_at, .. } => {
                self.step = BookingStep::Payment;
                self.updated_at = updated_at;
            }

            Event::SteppedBack { step, updated_at, .. } => {
                self.step = step;
                self.updated_at = updated_at;
            }

            Event::AppointmentConfirmed {
                payment_reference,
                amount_paid,
                status,
                payment_status,
                updated_at,
                ..
            } => {
                self.step = BookingStep::Confirmed;
                self.status = Some(status);
                self.payment_status = payment_status;
                self.payment_reference = Some(payment_reference);
                self.amount_paid = Some(amount_paid);
                self.updated_at = updated_at;
            }

            Event::AppointmentRated { doctor_rating, service_rating, updated_at, .. } => {
                self.doctor_rating = Some(doctor_rating);
                self.service_rating = Some(service_rating);
                self.updated_at = updated_at;
            }

            Event::AppointmentCancelled { updated_at, .. } => {
                self.status = Some(AppointmentStatus::Cancelled);
                self.updated_at = updated_at;
            }
        }
    }
}

impl Appointment {
    /// Consultation fee plus booking fee
    pub fn payment_total(&self) -> u32 {
        self.doctor.consultation_fee.saturating_add(BOOKING_FEE)
    }

    pub fn is_confirmed(&self) -> bool {
        self.step == BookingStep::Confirmed
    }

    /// Local date and time of the visit, when both parse
    pub fn instant(&self) -> Option<NaiveDateTime> {
        appointment_instant(self.date?, self.time.as_deref()?)
    }

    /// Upcoming and still ahead of `now`
    pub fn is_current(&self, now: NaiveDateTime) -> bool {
        self.status == Some(AppointmentStatus::Upcoming)
            && self.instant().is_some_and(|at| at > now)
    }

    fn status_label(&self) -> String {
        self.status
            .map(|s| s.to_string())
            .unwrap_or_else(|| self.step.to_string())
    }

    fn validate_new(&self) -> Result<(), Error> {
        if !self.id.is_empty() {
            return Err(Error::Uniqueness { field: "id".to_string() });
        }
        Ok(())
    }

    fn validate_existing(&self) -> Result<(), Error> {
        if self.id.is_empty() {
            return Err(Error::NotFound { entity: AGGREGATE_TYPE.to_string() });
        }
        Ok(())
    }

    fn validate_step(&self, allowed: &[BookingStep], to: BookingStep) -> Result<(), Error> {
        if !allowed.contains(&self.step) {
            return Err(Error::InvalidStateTransition {
                from: self.step.to_string(),
                to: to.to_string(),
            });
        }
        Ok(())
    }

    fn validate_slot(&self, time: &str, now: NaiveDateTime) -> Result<(), Error> {
        let session = self
            .session
            .ok_or_else(|| Error::validation("Pick a session first"))?;
        if !session.has_slot(time) {
            return Err(Error::validation(format!("{time} is not a {session} slot")));
        }
        let date = self
            .date
            .ok_or_else(|| Error::validation("Pick a date first"))?;
        match appointment_instant(date, time) {
            Some(at) if at > now => Ok(()),
            _ => Err(Error::validation(format!("{time} on {date} has already passed"))),
        }
    }

    // A wizard left open can outlive its slot
    fn validate_still_ahead(&self, now: NaiveDateTime) -> Result<(), Error> {
        match self.instant() {
            Some(at) if at > now => Ok(()),
            _ => Err(Error::validation("The selected slot has already passed")),
        }
    }

    fn validate_can_rate(&self, now: NaiveDateTime) -> Result<(), Error> {
        match self.status {
            Some(AppointmentStatus::Completed) => Ok(()),
            Some(AppointmentStatus::Upcoming) if !self.is_current(now) => Ok(()),
            Some(AppointmentStatus::Upcoming) => {
                Err(Error::validation("Only past appointments can be rated"))
            }
            Some(AppointmentStatus::Cancelled) => Err(Error::Forbidden),
            None => Err(Error::InvalidStateTransition {
                from: self.step.to_string(),
                to: "rated".to_string(),
            }),
        }
    }
}
