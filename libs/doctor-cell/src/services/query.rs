// libs/doctor-cell/src/services/query.rs
//! Query-string codec for the listing state.
//!
//! Every listing URL carries its whole state, so a view can be bookmarked or shared and
//! decoded back into exactly the same filters. Parameters:
//!
//! | key            | value                                        |
//! |----------------|----------------------------------------------|
//! | `search`       | free text                                    |
//! | `speciality`   | free text                                    |
//! | `specialities` | JSON array of speciality names               |
//! | `consultation` | `in_clinic`, `video_consult` or `all`        |
//! | `sort`         | `fees_low_high` or `experience_high_low`     |
//! | `pinned`       | id of the doctor picked from the suggestions |
//!
//! Decoding never fails: anything missing, empty or malformed falls back to the default.

use std::collections::{BTreeSet, HashMap};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use tracing::warn;
use url::form_urlencoded;

use crate::models::{ConsultationType, DirectoryState, FilterState, SortOption};

pub const SEARCH_PARAM: &str = "search";
pub const SPECIALITY_PARAM: &str = "speciality";
pub const SPECIALITIES_PARAM: &str = "specialities";
pub const CONSULTATION_PARAM: &str = "consultation";
pub const SORT_PARAM: &str = "sort";
pub const PINNED_PARAM: &str = "pinned";

pub fn decode(query: &str) -> DirectoryState {
    let query = query.strip_prefix('?').unwrap_or(query);

    // Last occurrence wins, like URLSearchParams.set.
    let params: HashMap<String, String> = form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();
    let get = |key: &str| params.get(key).map(String::as_str).filter(|v| !v.is_empty());

    let filters = FilterState {
        search_text: get(SEARCH_PARAM).unwrap_or_default().to_string(),
        speciality_search_text: get(SPECIALITY_PARAM).unwrap_or_default().to_string(),
        selected_specialities: get(SPECIALITIES_PARAM)
            .map(decode_specialities)
            .unwrap_or_default(),
        consultation: get(CONSULTATION_PARAM).and_then(|raw| {
            let parsed = ConsultationType::from_param(raw);
            if parsed.is_none() {
                warn!("Ignoring unknown consultation type '{}'", raw);
            }
            parsed
        }),
        sort: get(SORT_PARAM).and_then(|raw| {
            let parsed = SortOption::from_param(raw);
            if parsed.is_none() {
                warn!("Ignoring unknown sort option '{}'", raw);
            }
            parsed
        }),
    };

    DirectoryState {
        filters,
        pinned: get(PINNED_PARAM).map(str::to_string),
    }
}

pub fn encode(state: &DirectoryState) -> String {
    let filters = &state.filters;
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if !filters.search_text.is_empty() {
        serializer.append_pair(SEARCH_PARAM, &filters.search_text);
    }
    if !filters.speciality_search_text.is_empty() {
        serializer.append_pair(SPECIALITY_PARAM, &filters.speciality_search_text);
    }
    if !filters.selected_specialities.is_empty() {
        serializer.append_pair(SPECIALITIES_PARAM, &encode_specialities(&filters.selected_specialities));
    }
    if let Some(consultation) = filters.consultation {
        serializer.append_pair(CONSULTATION_PARAM, consultation.as_param());
    }
    if let Some(sort) = filters.sort {
        serializer.append_pair(SORT_PARAM, sort.as_param());
    }
    if let Some(pinned) = state.pinned.as_deref().filter(|id| !id.is_empty()) {
        serializer.append_pair(PINNED_PARAM, pinned);
    }

    serializer.finish()
}

/// Path plus query for client-side navigation to `state`.
pub fn location(state: &DirectoryState) -> String {
    let query = encode(state);
    if query.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", query)
    }
}

fn decode_specialities(raw: &str) -> BTreeSet<String> {
    match serde_json::from_str::<Vec<serde_json::Value>>(raw) {
        Ok(values) => values
            .into_iter()
            .filter_map(|value| match value {
                serde_json::Value::String(name) if !name.is_empty() => Some(name),
                _ => None,
            })
            .collect(),
        Err(e) => {
            warn!("Ignoring malformed specialities parameter '{}': {}", raw, e);
            BTreeSet::new()
        }
    }
}

fn encode_specialities(specialities: &BTreeSet<String>) -> String {
    // A set of strings always serializes.
    serde_json::to_string(specialities).unwrap_or_else(|_| "[]".to_string())
}

impl fmt::Display for DirectoryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self))
    }
}

impl FromStr for DirectoryState {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(decode(s))
    }
}

impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(&DirectoryState::from(self.clone())))
    }
}

impl FromStr for FilterState {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(decode(s).filters)
    }
}
