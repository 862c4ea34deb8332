/// Reference data records
pub mod models;

use serde::Deserialize;

use crate::{appointments::DoctorRef, errors::Error};

pub use models::{Doctor, Hospital, HospitalDoctor, Medicine};

const SEED: &str = include_str!("seed.json");

/// Read-only reference data shared by every request
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Catalog {
    pub doctors: Vec<Doctor>,
    pub hospitals: Vec<Hospital>,
    pub medicines: Vec<Medicine>,
}

impl Catalog {
    pub fn new(doctors: Vec<Doctor>, hospitals: Vec<Hospital>, medicines: Vec<Medicine>) -> Self {
        Self { doctors, hospitals, medicines }
    }

    /// Catalog bundled with the binary
    pub fn seeded() -> Result<Self, Error> {
        Self::from_json(SEED)
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn doctor(&self, id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    pub fn hospital(&self, id: &str) -> Option<&Hospital> {
        self.hospitals.iter().find(|h| h.id == id)
    }

    pub fn medicine(&self, id: &str) -> Option<&Medicine> {
        self.medicines.iter().find(|m| m.id == id)
    }

    /// Resolves the doctor and hospital an appointment is booked against.
    ///
    /// Standalone doctors are looked up first; when a hospital is given the
    /// name must be one of the doctor's affiliations. Doctors only listed on
    /// a hospital's staff resolve to that hospital.
    pub fn booking_target(
        &self,
        doctor_id: &str,
        hospital: Option<&str>,
    ) -> Result<(DoctorRef, String), Error> {
        if let Some(doctor) = self.doctor(doctor_id) {
            let hospital = match hospital {
                Some(name) if doctor.hospitals.iter().any(|h| h == name) => name.to_string(),
                Some(name) => {
                    return Err(Error::validation(format!(
                        "{} does not consult at {}",
                        doctor.name, name
                    )))
                }
                None => doctor
                    .hospitals
                    .first()
                    .cloned()
                    .ok_or_else(|| Error::validation(format!("{} has no hospital", doctor.name)))?,
            };

            let doctor_ref = DoctorRef {
                doctor_id: doctor.id.clone(),
                name: doctor.name.clone(),
                specialty: doctor.specialty.clone(),
                consultation_fee: doctor.consultation_fee,
            };
            return Ok((doctor_ref, hospital));
        }

        self.hospitals
            .iter()
            .filter(|h| hospital.map_or(true, |name| h.name == name))
            .find_map(|h| {
                h.doctors.iter().find(|d| d.id == doctor_id).map(|d| {
                    let doctor_ref = DoctorRef {
                        doctor_id: d.id.clone(),
                        name: d.name.clone(),
                        specialty: d.specialty.clone(),
                        consultation_fee: d.consultation_fee,
                    };
                    (doctor_ref, h.name.clone())
                })
            })
            .ok_or_else(|| Error::not_found("Doctor"))
    }

    /// Distinct locations across doctors and hospitals, sorted
    pub fn locations(&self) -> Vec<String> {
        let mut locations: Vec<String> = self
            .doctors
            .iter()
            .map(|d| d.location.clone())
            .chain(self.hospitals.iter().map(|h| h.location.clone()))
            .collect();
        locations.sort();
        locations.dedup();
        locations
    }
}
