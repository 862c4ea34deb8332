use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    appointments::{Appointment, AppointmentStatus},
    errors::Error,
    orders::Order,
    validation::FieldErrors,
};

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub has_medical_profile: bool,
    pub medical_profile: Option<MedicalProfile>,
}

/// Onboarding intake answers
#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct MedicalProfile {
    pub blood_group: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub chronic_conditions: Vec<String>,
    #[serde(default)]
    pub current_medications: Vec<String>,
}

const BLOOD_GROUPS: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

impl User {
    pub fn register(id: String, name: &str, email: &str) -> Result<Self, Error> {
        FieldErrors::default()
            .require("name", name)
            .email("email", email)
            .finish()?;

        Ok(Self {
            id,
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            has_medical_profile: false,
            medical_profile: None,
        })
    }

    pub fn complete_medical_profile(&mut self, profile: MedicalProfile) -> Result<(), Error> {
        FieldErrors::default()
            .check(
                "blood_group",
                profile
                    .blood_group
                    .as_deref()
                    .map_or(true, |g| BLOOD_GROUPS.contains(&g)),
                "Unknown blood group",
            )
            .finish()?;

        self.medical_profile = Some(profile);
        self.has_medical_profile = true;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub enum RecordKind {
    Consultation,
    Prescription,
    LabReport,
    Vaccination,
    Note,
}

/// Entry the user adds to their own health history
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct HealthRecord {
    pub id: String,
    pub date: NaiveDate,
    pub kind: RecordKind,
    pub title: String,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthRecordInput {
    pub date: NaiveDate,
    pub kind: RecordKind,
    pub title: String,
    pub notes: Option<String>,
}

impl HealthRecord {
    pub fn create(id: String, input: HealthRecordInput, today: NaiveDate) -> Result<Self, Error> {
        FieldErrors::default()
            .require("title", &input.title)
            .check("date", input.date <= today, "Date cannot be in the future")
            .finish()?;

        Ok(Self {
            id,
            date: input.date,
            kind: input.kind,
            title: input.title.trim().to_string(),
            notes: input.notes,
        })
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    Appointment,
    Order,
    Record,
}

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct TimelineEntry {
    pub date: NaiveDate,
    pub kind: TimelineKind,
    pub reference_id: String,
    pub title: String,
    pub detail: Option<String>,
}

/// Health history, newest first.
///
/// `appointments` should already be the history bucket; cancelled visits
/// are left out.
pub fn timeline(
    records: &[HealthRecord],
    appointments: &[Appointment],
    orders: &[Order],
) -> Vec<TimelineEntry> {
    let records = records.iter().map(|r| TimelineEntry {
        date: r.date,
        kind: TimelineKind::Record,
        reference_id: r.id.clone(),
        title: r.title.clone(),
        detail: r.notes.clone(),
    });

    let appointments = appointments
        .iter()
        .filter(|a| a.status != Some(AppointmentStatus::Cancelled))
        .filter_map(|a| {
            Some(TimelineEntry {
                date: a.date?,
                kind: TimelineKind::Appointment,
                reference_id: a.id.clone(),
                title: format!("Consultation with {}", a.doctor.name),
                detail: Some(format!("{}, {}", a.doctor.specialty, a.hospital)),
            })
        });

    let orders = orders.iter().map(|o| TimelineEntry {
        date: local_date(o.placed_at),
        kind: TimelineKind::Order,
        reference_id: o.id.clone(),
        title: format!("Medicine order ({} items)", o.lines.len()),
        detail: Some(
            o.lines
                .iter()
                .map(|l| format!("{} x{}", l.name, l.quantity))
                .collect::<Vec<_>>()
                .join(", "),
        ),
    });

    let mut entries: Vec<TimelineEntry> = records.chain(appointments).chain(orders).collect();
    entries.sort_by_key(|e| Reverse(e.date));
    entries
}

fn local_date(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&chrono::Local).date_naive()
}
