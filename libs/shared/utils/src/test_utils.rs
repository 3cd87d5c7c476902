use serde_json::{json, Value};

use shared_config::AppConfig;

pub const DOCTORS_PATH: &str = "/doctors.json";

pub struct TestConfig {
    pub api_base_url: String,
    pub fetch_timeout_secs: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:54321".to_string(),
            fetch_timeout_secs: 2,
        }
    }
}

impl TestConfig {
    /// Config for a mock server started at `uri`.
    pub fn for_mock_server(uri: &str) -> Self {
        Self {
            api_base_url: uri.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            doctors_api_url: format!("{}{}", self.api_base_url, DOCTORS_PATH),
            fetch_timeout_secs: self.fetch_timeout_secs,
            ..AppConfig::default()
        }
    }
}

/// Builder for one upstream doctor record.
pub struct DoctorFixture {
    id: String,
    name: String,
    specialities: Vec<String>,
    fees: String,
    experience: String,
    clinic: Option<String>,
    in_clinic: bool,
    video_consult: bool,
}

impl DoctorFixture {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            specialities: Vec::new(),
            fees: "₹ 500".to_string(),
            experience: "5 Years of experience".to_string(),
            clinic: None,
            in_clinic: true,
            video_consult: true,
        }
    }

    pub fn speciality(mut self, name: &str) -> Self {
        self.specialities.push(name.to_string());
        self
    }

    pub fn fees(mut self, fees: &str) -> Self {
        self.fees = fees.to_string();
        self
    }

    pub fn experience(mut self, experience: &str) -> Self {
        self.experience = experience.to_string();
        self
    }

    pub fn clinic(mut self, name: &str) -> Self {
        self.clinic = Some(name.to_string());
        self
    }

    pub fn modes(mut self, in_clinic: bool, video_consult: bool) -> Self {
        self.in_clinic = in_clinic;
        self.video_consult = video_consult;
        self
    }

    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "name_initials": initials(&self.name),
            "photo": format!("https://example.com/photos/{}.jpg", self.id),
            "doctor_introduction": format!("{} has been practising for years.", self.name),
            "specialities": self.specialities.iter().map(|s| json!({ "name": s })).collect::<Vec<_>>(),
            "fees": self.fees,
            "experience": self.experience,
            "languages": ["English", "Hindi"],
            "clinic": self.clinic.as_ref().map(|name| json!({
                "name": name,
                "address": {
                    "locality": "Whitefield",
                    "city": "Bangalore",
                    "address_line1": "12 Main Road",
                    "location": "12.97,77.75",
                    "logo_url": null
                }
            })),
            "video_consult": self.video_consult,
            "in_clinic": self.in_clinic
        })
    }
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter(|part| !part.ends_with('.'))
        .filter_map(|part| part.chars().next())
        .collect()
}

pub struct MockDirectoryResponses;

impl MockDirectoryResponses {
    pub fn doctors(fixtures: &[DoctorFixture]) -> Value {
        Value::Array(fixtures.iter().map(DoctorFixture::to_json).collect())
    }

    /// A small directory exercising every filter.
    pub fn sample_directory() -> Value {
        Self::doctors(&[
            DoctorFixture::new("1", "Dr. James Carter")
                .speciality("Dentist")
                .fees("₹ 500")
                .experience("5 Years of experience")
                .clinic("Smile Dental Studio")
                .modes(true, false),
            DoctorFixture::new("2", "Dr. Jane Iyer")
                .speciality("Dentist")
                .speciality("Orthodontist")
                .fees("₹ 200")
                .experience("12 Years of experience")
                .clinic("City Care Clinic")
                .modes(false, true),
            DoctorFixture::new("3", "Dr. Jack Rao")
                .speciality("General Physician")
                .fees("₹ 800")
                .experience("1 Years of experience")
                .modes(false, false),
            DoctorFixture::new("4", "Dr. Amy Shah")
                .speciality("Dermatologist")
                .fees("")
                .experience("20 Years of experience")
                .clinic("Skin First")
                .modes(true, true),
        ])
    }
}
