// libs/doctor-cell/src/services/directory.rs
use std::collections::HashSet;

use tracing::{debug, warn};

use crate::models::{
    DirectoryEvent, DirectoryState, Doctor, DoctorError, Listing, ListingStatus,
    SpecialityOption, Suggestion,
};
use crate::services::catalog::DoctorCatalog;
use crate::services::session::DirectorySession;
use crate::services::{filter, query, suggest};

/// Builds listing views from the catalog and a decoded listing state.
#[derive(Clone)]
pub struct DirectoryService {
    catalog: DoctorCatalog,
}

impl DirectoryService {
    pub fn new(catalog: DoctorCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &DoctorCatalog {
        &self.catalog
    }

    pub async fn listing(&self, state: DirectoryState) -> Result<Listing, DoctorError> {
        let query = query::encode(&state);

        let Some(doctors) = self.catalog.doctors().await? else {
            return Ok(Listing {
                status: ListingStatus::Loading,
                doctors: vec![],
                total: 0,
                pinned: false,
                suggestions: vec![],
                specialities: vec![],
                state,
                query,
            });
        };

        let (results, pinned) = match pinned_doctor(&doctors, &state) {
            Some(doctor) => (vec![doctor.clone()], true),
            None => (filter::apply(&doctors, &state.filters), false),
        };

        let status = if results.is_empty() {
            ListingStatus::Empty
        } else {
            ListingStatus::Results
        };

        Ok(Listing {
            status,
            total: results.len(),
            doctors: results,
            pinned,
            suggestions: suggestions_for(&doctors, &state),
            specialities: speciality_options(&doctors, &state),
            state,
            query,
        })
    }

    pub async fn suggestions(&self, state: &DirectoryState) -> Result<Vec<Suggestion>, DoctorError> {
        Ok(match self.catalog.doctors().await? {
            Some(doctors) => suggestions_for(&doctors, state),
            None => vec![],
        })
    }

    pub async fn specialities(&self, state: &DirectoryState) -> Result<Vec<SpecialityOption>, DoctorError> {
        Ok(match self.catalog.doctors().await? {
            Some(doctors) => speciality_options(&doctors, state),
            None => vec![],
        })
    }

    /// Apply `event` to `state` and return the session after it.
    pub async fn navigate(
        &self,
        state: DirectoryState,
        event: DirectoryEvent,
    ) -> Result<DirectorySession, DoctorError> {
        let doctors = self.catalog.doctors().await?.unwrap_or_default();
        Ok(DirectorySession::new(state).with(event, &doctors))
    }
}

/// Every distinct speciality name, in first-seen order.
pub fn speciality_vocabulary(doctors: &[Doctor]) -> Vec<String> {
    let mut seen = HashSet::new();
    doctors
        .iter()
        .flat_map(|d| d.speciality_names())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

fn pinned_doctor<'a>(doctors: &'a [Doctor], state: &DirectoryState) -> Option<&'a Doctor> {
    let id = state.pinned.as_deref()?;
    let found = doctors.iter().find(|d| d.id == id);
    if found.is_none() {
        warn!("Pinned doctor {} is not in the catalog, showing filtered results", id);
    }
    found
}

fn suggestions_for(doctors: &[Doctor], state: &DirectoryState) -> Vec<Suggestion> {
    suggest::suggest(doctors, &state.filters.search_text)
        .into_iter()
        .map(|doctor| {
            let picked = DirectorySession::new(state.clone()).with(
                DirectoryEvent::SuggestionSelected { doctor_id: doctor.id.clone() },
                doctors,
            );
            Suggestion {
                id: doctor.id.clone(),
                name: doctor.name.clone(),
                specialities: doctor.speciality_names().map(str::to_string).collect(),
                query: picked.query_string(),
            }
        })
        .collect()
}

fn speciality_options(doctors: &[Doctor], state: &DirectoryState) -> Vec<SpecialityOption> {
    let needle = state.filters.speciality_search_text.trim().to_lowercase();
    let options: Vec<SpecialityOption> = speciality_vocabulary(doctors)
        .into_iter()
        .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
        .map(|name| SpecialityOption {
            selected: state.filters.selected_specialities.contains(&name),
            name,
        })
        .collect();

    debug!("{} speciality options for '{}'", options.len(), needle);
    options
}
