use std::collections::HashSet;

use serde::Deserialize;

use crate::catalog::{Doctor, Hospital, Medicine};

pub const MAX_SUGGESTIONS: usize = 5;

/// Location value meaning "every location"
pub const ALL_LOCATIONS: &str = "All";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub location: Option<String>,
    pub q: Option<String>,
}

impl SearchQuery {
    fn location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty() && *l != ALL_LOCATIONS)
    }

    fn needle(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

pub fn doctor_matches(doctor: &Doctor, needle: &str) -> bool {
    contains(&doctor.name, needle) || contains(&doctor.specialty, needle)
}

pub fn hospital_matches(hospital: &Hospital, needle: &str) -> bool {
    contains(&hospital.name, needle) || hospital.services.iter().any(|s| contains(s, needle))
}

pub fn filter_doctors<'a>(doctors: &'a [Doctor], query: &SearchQuery) -> Vec<&'a Doctor> {
    let location = query.location();
    let needle = query.needle();
    doctors
        .iter()
        .filter(|d| location.map_or(true, |l| d.location == l))
        .filter(|d| needle.as_deref().map_or(true, |n| doctor_matches(d, n)))
        .collect()
}

pub fn filter_hospitals<'a>(hospitals: &'a [Hospital], query: &SearchQuery) -> Vec<&'a Hospital> {
    let location = query.location();
    let needle = query.needle();
    hospitals
        .iter()
        .filter(|h| location.map_or(true, |l| h.location == l))
        .filter(|h| needle.as_deref().map_or(true, |n| hospital_matches(h, n)))
        .collect()
}

pub fn filter_medicines<'a>(medicines: &'a [Medicine], query: &SearchQuery) -> Vec<&'a Medicine> {
    let needle = query.needle();
    medicines
        .iter()
        .filter(|m| {
            needle
                .as_deref()
                .map_or(true, |n| contains(&m.name, n) || contains(&m.category, n))
        })
        .collect()
}

/// Up to five distinct names or specialties containing `text`
pub fn doctor_suggestions(doctors: &[Doctor], text: &str) -> Vec<String> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    distinct(
        doctors
            .iter()
            .flat_map(|d| [&d.name, &d.specialty])
            .filter(|s| contains(s, &needle)),
    )
}

/// Up to five distinct hospital names or services containing `text`
pub fn hospital_suggestions(hospitals: &[Hospital], text: &str) -> Vec<String> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    distinct(
        hospitals
            .iter()
            .flat_map(|h| std::iter::once(&h.name).chain(h.services.iter()))
            .filter(|s| contains(s, &needle)),
    )
}

fn distinct<'a>(candidates: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    candidates
        .filter(|s| seen.insert(*s))
        .take(MAX_SUGGESTIONS)
        .cloned()
        .collect()
}
