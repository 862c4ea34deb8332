use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::schedule::TimeSession;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StartBookingInput {
    pub doctor_id: String,
    pub hospital: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SelectDateInput {
    pub date: NaiveDate,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SelectSessionInput {
    pub session: TimeSession,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SelectTimeInput {
    pub time: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RateInput {
    pub doctor_rating: u8,
    pub service_rating: u8,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalendarInput {
    pub year: Option<i32>,
    pub month: Option<u32>,
}
