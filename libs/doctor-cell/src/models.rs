use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use shared_models::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub name_initials: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub doctor_introduction: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub specialities: Vec<Speciality>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub fees: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub experience: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub languages: Vec<String>,
    #[serde(default)]
    pub clinic: Option<Clinic>,
    #[serde(default)]
    pub video_consult: bool,
    #[serde(default)]
    pub in_clinic: bool,
}

impl Doctor {
    pub fn speciality_names(&self) -> impl Iterator<Item = &str> {
        self.specialities.iter().map(|s| s.name.as_str())
    }

    pub fn has_speciality(&self, name: &str) -> bool {
        self.speciality_names().any(|s| s == name)
    }

    pub fn clinic_name(&self) -> Option<&str> {
        self.clinic.as_ref().and_then(|c| c.name.as_deref())
    }

    /// Fee amount with every non-digit stripped ("₹ 1,500" -> 1500).
    pub fn fee_amount(&self) -> Option<u32> {
        let digits: String = self.fees.chars().filter(|c| c.is_ascii_digit()).collect();
        digits.parse().ok()
    }

    /// Years taken from the first run of digits ("13 Years of experience" -> 13).
    pub fn experience_years(&self) -> Option<u32> {
        let digits: String = self
            .experience
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }

    pub fn offers(&self, consultation: ConsultationType) -> bool {
        match consultation {
            ConsultationType::InClinic => self.in_clinic,
            ConsultationType::VideoConsult => self.video_consult,
            ConsultationType::All => self.in_clinic || self.video_consult,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speciality {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Clinic {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<ClinicAddress>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClinicAddress {
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

// The upstream feed mixes strings, numbers and nulls for scalar fields.
// Null reads as empty, which the numeric accessors treat as unparseable.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawScalar {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<RawScalar>::deserialize(deserializer)? {
        Some(RawScalar::Text(text)) => text,
        Some(RawScalar::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationType {
    InClinic,
    VideoConsult,
    All,
}

impl ConsultationType {
    pub const ALL: [ConsultationType; 3] = [
        ConsultationType::InClinic,
        ConsultationType::VideoConsult,
        ConsultationType::All,
    ];

    pub fn as_param(&self) -> &'static str {
        match self {
            ConsultationType::InClinic => "in_clinic",
            ConsultationType::VideoConsult => "video_consult",
            ConsultationType::All => "all",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_param() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConsultationType::InClinic => "In Clinic",
            ConsultationType::VideoConsult => "Video Consult",
            ConsultationType::All => "All",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    FeesLowHigh,
    ExperienceHighLow,
}

impl SortOption {
    pub const ALL: [SortOption; 2] = [SortOption::FeesLowHigh, SortOption::ExperienceHighLow];

    pub fn as_param(&self) -> &'static str {
        match self {
            SortOption::FeesLowHigh => "fees_low_high",
            SortOption::ExperienceHighLow => "experience_high_low",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_param() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOption::FeesLowHigh => "Fees: Low to High",
            SortOption::ExperienceHighLow => "Experience: Most Experience first",
        }
    }
}

/// Filter and sort choices for one listing. Every field at its default imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_text: String,
    pub speciality_search_text: String,
    pub selected_specialities: BTreeSet<String>,
    pub consultation: Option<ConsultationType>,
    pub sort: Option<SortOption>,
}

impl FilterState {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Filter state plus the doctor pinned from the autocomplete list, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryState {
    pub filters: FilterState,
    pub pinned: Option<String>,
}

impl From<FilterState> for DirectoryState {
    fn from(filters: FilterState) -> Self {
        Self { filters, pinned: None }
    }
}

/// User interactions the listing page can produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DirectoryEvent {
    SearchTextChanged { text: String },
    SearchCleared,
    SpecialitySearchChanged { text: String },
    SpecialityToggled { name: String },
    SpecialitiesCleared,
    ConsultationSelected { consultation: Option<ConsultationType> },
    SortSelected { sort: Option<SortOption> },
    SuggestionSelected { doctor_id: String },
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Loading,
    Empty,
    Results,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialityOption {
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub name: String,
    pub specialities: Vec<String>,
    /// Query string the listing navigates to when this suggestion is picked.
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub status: ListingStatus,
    pub doctors: Vec<Doctor>,
    pub total: usize,
    pub pinned: bool,
    pub suggestions: Vec<Suggestion>,
    pub specialities: Vec<SpecialityOption>,
    pub state: DirectoryState,
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigateRequest {
    #[serde(default)]
    pub query: String,
    pub event: DirectoryEvent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigateResponse {
    pub query: String,
    pub location: String,
}

#[derive(Debug, Error)]
pub enum DoctorError {
    #[error("Doctor directory endpoint is not configured")]
    NotConfigured,

    #[error("Failed to reach doctor directory: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Doctor directory responded with status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Doctor directory returned malformed data: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Doctor directory unavailable: {0}")]
    Unavailable(String),

    #[error("Doctor not found: {0}")]
    NotFound(String),
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::NotFound(id) => AppError::NotFound(format!("Doctor not found: {}", id)),
            other => AppError::ExternalService(other.to_string()),
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingStatus::Loading => write!(f, "loading"),
            ListingStatus::Empty => write!(f, "empty"),
            ListingStatus::Results => write!(f, "results"),
        }
    }
}
