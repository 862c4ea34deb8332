use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub location: String,
    pub rating: f32,
    pub consultation_fee: u32,
    pub experience_years: u32,
    pub bio: String,
    pub hours: String,
    pub hospitals: Vec<String>,
}

/// Doctor listed under a hospital's staff
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HospitalDoctor {
    pub id: String,
    pub name: String,
    pub designation: String,
    pub specialty: String,
    pub consultation_fee: u32,
    pub availability: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: String,
    pub name: String,
    pub location: String,
    pub address: String,
    pub contact: String,
    pub services: Vec<String>,
    pub facilities: Vec<String>,
    pub rating: f32,
    pub doctors: Vec<HospitalDoctor>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: u32,
    pub prescription_required: bool,
    #[serde(default)]
    pub description: String,
}
