use std::cmp::Reverse;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Appointment;

/// Confirmed appointments split for display.
///
/// Bucketing never rewrites stored status: an Upcoming appointment whose
/// time has passed is shown under history but keeps its Upcoming status.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct Buckets {
    /// Upcoming and still ahead, soonest first
    pub current: Vec<Appointment>,
    /// Everything else, most recent first
    pub history: Vec<Appointment>,
}

impl Buckets {
    pub fn split(appointments: impl IntoIterator<Item = Appointment>, now: NaiveDateTime) -> Self {
        let (mut current, mut history): (Vec<_>, Vec<_>) = appointments
            .into_iter()
            .filter(Appointment::is_confirmed)
            .partition(|a| a.is_current(now));

        current.sort_by_key(Appointment::instant);
        // Unparseable instants sort last
        history.sort_by_key(|a| Reverse(a.instant()));

        Self { current, history }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::appointments::{AppointmentStatus, BookingStep};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn appointment(id: &str, day: u32, time: &str, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: id.to_string(),
            step: BookingStep::Confirmed,
            date: NaiveDate::from_ymd_opt(2026, 10, day),
            time: Some(time.to_string()),
            status: Some(status),
            ..Default::default()
        }
    }

    fn ids(appointments: &[Appointment]) -> Vec<&str> {
        appointments.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn splits_on_status_and_time() {
        let buckets = Buckets::split(
            vec![
                appointment("later", 20, "05:00 PM", AppointmentStatus::Upcoming),
                appointment("soon", 16, "03:00 PM", AppointmentStatus::Upcoming),
                appointment("elapsed", 16, "10:00 AM", AppointmentStatus::Upcoming),
                appointment("cancelled", 22, "10:00 AM", AppointmentStatus::Cancelled),
                appointment("done", 10, "10:00 AM", AppointmentStatus::Completed),
            ],
            now(),
        );

        assert_eq!(ids(&buckets.current), vec!["soon", "later"]);
        assert_eq!(ids(&buckets.history), vec!["cancelled", "elapsed", "done"]);
    }

    #[test]
    fn elapsed_upcoming_keeps_stored_status() {
        let buckets = Buckets::split(
            vec![appointment("elapsed", 15, "10:00 AM", AppointmentStatus::Upcoming)],
            now(),
        );
        assert!(buckets.current.is_empty());
        assert_eq!(buckets.history[0].status, Some(AppointmentStatus::Upcoming));
    }

    #[test]
    fn unparseable_time_goes_to_history_last() {
        let buckets = Buckets::split(
            vec![
                appointment("broken", 30, "soon", AppointmentStatus::Upcoming),
                appointment("done", 10, "10:00 AM", AppointmentStatus::Completed),
            ],
            now(),
        );
        assert!(buckets.current.is_empty());
        assert_eq!(ids(&buckets.history), vec!["done", "broken"]);
    }

    #[test]
    fn drafts_are_excluded() {
        let mut draft = appointment("draft", 20, "10:00 AM", AppointmentStatus::Upcoming);
        draft.step = BookingStep::Payment;
        draft.status = None;

        let buckets = Buckets::split(vec![draft], now());
        assert!(buckets.current.is_empty());
        assert!(buckets.history.is_empty());
    }
}
