// libs/doctor-cell/src/services/session.rs
use tracing::{debug, warn};

use crate::models::{DirectoryEvent, DirectoryState, Doctor};
use crate::services::query;

/// Listing state driven by user interaction events.
///
/// The session only ever changes through [`DirectorySession::apply`]; the address bar is
/// kept in sync by navigating to [`DirectorySession::location`] after each event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectorySession {
    state: DirectoryState,
}

impl DirectorySession {
    pub fn new(state: DirectoryState) -> Self {
        Self { state }
    }

    pub fn from_query(query: &str) -> Self {
        Self::new(query::decode(query))
    }

    pub fn state(&self) -> &DirectoryState {
        &self.state
    }

    pub fn query_string(&self) -> String {
        query::encode(&self.state)
    }

    pub fn location(&self) -> String {
        query::location(&self.state)
    }

    /// Apply one event. `doctors` resolves suggestion picks to a name.
    pub fn apply(&mut self, event: DirectoryEvent, doctors: &[Doctor]) {
        debug!("Applying directory event: {:?}", event);
        let filters = &mut self.state.filters;

        match event {
            DirectoryEvent::SearchTextChanged { text } => {
                filters.search_text = text;
                self.state.pinned = None;
            }
            DirectoryEvent::SearchCleared => {
                filters.search_text.clear();
                self.state.pinned = None;
            }
            DirectoryEvent::SpecialitySearchChanged { text } => {
                filters.speciality_search_text = text;
            }
            DirectoryEvent::SpecialityToggled { name } => {
                if name.is_empty() {
                    warn!("Ignoring toggle of an empty speciality name");
                } else if !filters.selected_specialities.remove(&name) {
                    filters.selected_specialities.insert(name);
                }
            }
            DirectoryEvent::SpecialitiesCleared => {
                filters.selected_specialities.clear();
            }
            DirectoryEvent::ConsultationSelected { consultation } => {
                filters.consultation = consultation;
            }
            DirectoryEvent::SortSelected { sort } => {
                filters.sort = sort;
            }
            DirectoryEvent::SuggestionSelected { doctor_id } if doctor_id.is_empty() => {
                warn!("Ignoring suggestion with an empty doctor id");
            }
            DirectoryEvent::SuggestionSelected { doctor_id } => {
                match doctors.iter().find(|d| d.id == doctor_id) {
                    Some(doctor) => {
                        filters.search_text = doctor.name.clone();
                        self.state.pinned = Some(doctor.id.clone());
                    }
                    None => warn!("Ignoring suggestion for unknown doctor {}", doctor_id),
                }
            }
            DirectoryEvent::Reset => {
                self.state = DirectoryState::default();
            }
        }
    }

    /// Consume the session, returning the state after `event`.
    pub fn with(mut self, event: DirectoryEvent, doctors: &[Doctor]) -> Self {
        self.apply(event, doctors);
        self
    }
}
