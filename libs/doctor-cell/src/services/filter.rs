// libs/doctor-cell/src/services/filter.rs
use std::cmp::Ordering;

use tracing::debug;

use crate::models::{ConsultationType, Doctor, FilterState, SortOption};

/// Filter `doctors` by every active predicate in `state`, then apply the selected sort.
///
/// Output is always a subset of the input. Without a sort it keeps collection order; with
/// one the sort is stable, and records whose fee/experience has no usable number go last.
pub fn apply(doctors: &[Doctor], state: &FilterState) -> Vec<Doctor> {
    let search = normalized(&state.search_text);
    let speciality_search = normalized(&state.speciality_search_text);

    let mut filtered: Vec<Doctor> = doctors
        .iter()
        .filter(|doc| matches_search(doc, search.as_deref()))
        .filter(|doc| matches_speciality_text(doc, speciality_search.as_deref()))
        .filter(|doc| has_all_specialities(doc, state))
        .filter(|doc| matches_consultation(doc, state.consultation))
        .cloned()
        .collect();

    if let Some(sort) = state.sort {
        sort_doctors(&mut filtered, sort);
    }

    debug!("Filtered {} of {} doctors with {:?}", filtered.len(), doctors.len(), state);
    filtered
}

pub fn sort_doctors(doctors: &mut [Doctor], sort: SortOption) {
    match sort {
        SortOption::FeesLowHigh => {
            doctors.sort_by(|a, b| missing_last(a.fee_amount(), b.fee_amount(), |x, y| x.cmp(&y)));
        }
        SortOption::ExperienceHighLow => {
            doctors.sort_by(|a, b| {
                missing_last(a.experience_years(), b.experience_years(), |x, y| y.cmp(&x))
            });
        }
    }
}

// Unparseable values always sort after parseable ones, whatever the direction.
fn missing_last(a: Option<u32>, b: Option<u32>, cmp: impl Fn(u32, u32) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn normalized(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn matches_search(doctor: &Doctor, needle: Option<&str>) -> bool {
    let Some(needle) = needle else {
        return true;
    };

    contains_ci(&doctor.name, needle)
        || doctor.speciality_names().any(|s| contains_ci(s, needle))
        || doctor.clinic_name().is_some_and(|c| contains_ci(c, needle))
}

fn matches_speciality_text(doctor: &Doctor, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => doctor.speciality_names().any(|s| contains_ci(s, needle)),
        None => true,
    }
}

fn has_all_specialities(doctor: &Doctor, state: &FilterState) -> bool {
    state
        .selected_specialities
        .iter()
        .all(|selected| doctor.has_speciality(selected))
}

fn matches_consultation(doctor: &Doctor, consultation: Option<ConsultationType>) -> bool {
    consultation.is_none_or(|c| doctor.offers(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Clinic, Speciality};

    fn doctor(id: &str, name: &str, specialities: &[&str]) -> Doctor {
        Doctor {
            id: id.to_string(),
            name: name.to_string(),
            name_initials: None,
            photo: None,
            doctor_introduction: None,
            specialities: specialities
                .iter()
                .map(|s| Speciality { name: s.to_string() })
                .collect(),
            fees: String::new(),
            experience: String::new(),
            languages: vec![],
            clinic: None,
            video_consult: false,
            in_clinic: false,
        }
    }

    fn ids(doctors: &[Doctor]) -> Vec<&str> {
        doctors.iter().map(|d| d.id.as_str()).collect()
    }

    fn state() -> FilterState {
        FilterState::default()
    }

    #[test]
    fn test_default_state_returns_input_order() {
        let doctors = vec![doctor("3", "C", &[]), doctor("1", "A", &[]), doctor("2", "B", &[])];
        assert_eq!(ids(&apply(&doctors, &state())), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_search_matches_name_speciality_and_clinic() {
        let mut clinic_doc = doctor("3", "Dr. Rao", &["Dentist"]);
        clinic_doc.clinic = Some(Clinic { name: Some("Heart Care Centre".into()), address: None });
        let doctors = vec![
            doctor("1", "Dr. Hearton", &["Dentist"]),
            doctor("2", "Dr. Iyer", &["Heart Surgeon"]),
            clinic_doc,
            doctor("4", "Dr. Shah", &["Dermatologist"]),
        ];

        let filters = FilterState { search_text: "  HEART ".into(), ..state() };
        assert_eq!(ids(&apply(&doctors, &filters)), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_speciality_text_filter() {
        let doctors = vec![
            doctor("1", "A", &["Cardiologist"]),
            doctor("2", "B", &["Dentist"]),
            doctor("3", "C", &[]),
        ];
        let filters = FilterState { speciality_search_text: "cardio".into(), ..state() };
        assert_eq!(ids(&apply(&doctors, &filters)), vec!["1"]);
    }

    #[test]
    fn test_selected_specialities_require_all() {
        let doctors = vec![
            doctor("1", "A", &["Dentist"]),
            doctor("2", "B", &["Dentist", "Orthodontist", "Surgeon"]),
            doctor("3", "C", &["Orthodontist"]),
        ];
        let filters = FilterState {
            selected_specialities: ["Dentist".to_string(), "Orthodontist".to_string()].into(),
            ..state()
        };
        assert_eq!(ids(&apply(&doctors, &filters)), vec!["2"]);
    }

    #[test]
    fn test_consultation_filters() {
        let mut in_clinic = doctor("1", "A", &[]);
        in_clinic.in_clinic = true;
        let neither = doctor("2", "B", &[]);
        let mut video = doctor("3", "C", &[]);
        video.video_consult = true;
        let doctors = vec![in_clinic, neither, video];

        let all = FilterState { consultation: Some(ConsultationType::All), ..state() };
        assert_eq!(ids(&apply(&doctors, &all)), vec!["1", "3"]);

        let clinic = FilterState { consultation: Some(ConsultationType::InClinic), ..state() };
        assert_eq!(ids(&apply(&doctors, &clinic)), vec!["1"]);

        let video_only = FilterState { consultation: Some(ConsultationType::VideoConsult), ..state() };
        assert_eq!(ids(&apply(&doctors, &video_only)), vec!["3"]);
    }

    #[test]
    fn test_sort_by_fees_low_high() {
        let doctors: Vec<Doctor> = ["₹500", "₹200", "₹800"]
            .iter()
            .enumerate()
            .map(|(i, fee)| Doctor { fees: fee.to_string(), ..doctor(&i.to_string(), "X", &[]) })
            .collect();
        let filters = FilterState { sort: Some(SortOption::FeesLowHigh), ..state() };

        let fees: Vec<_> = apply(&doctors, &filters).iter().filter_map(|d| d.fee_amount()).collect();
        assert_eq!(fees, vec![200, 500, 800]);
    }

    #[test]
    fn test_sort_by_experience_high_low() {
        let doctors: Vec<Doctor> = ["5 Years", "12 Years", "1 Years"]
            .iter()
            .enumerate()
            .map(|(i, exp)| Doctor { experience: exp.to_string(), ..doctor(&i.to_string(), "X", &[]) })
            .collect();
        let filters = FilterState { sort: Some(SortOption::ExperienceHighLow), ..state() };

        let years: Vec<_> = apply(&doctors, &filters).iter().filter_map(|d| d.experience_years()).collect();
        assert_eq!(years, vec![12, 5, 1]);
    }

    #[test]
    fn test_unparseable_values_sort_last_in_both_directions() {
        let doctors = vec![
            Doctor { fees: String::new(), experience: "n/a".into(), ..doctor("blank", "X", &[]) },
            Doctor { fees: "₹300".into(), experience: "3 Years".into(), ..doctor("a", "X", &[]) },
            Doctor { fees: "on request".into(), experience: String::new(), ..doctor("text", "X", &[]) },
            Doctor { fees: "₹100".into(), experience: "9 Years".into(), ..doctor("b", "X", &[]) },
        ];

        let by_fee = FilterState { sort: Some(SortOption::FeesLowHigh), ..state() };
        assert_eq!(ids(&apply(&doctors, &by_fee)), vec!["b", "a", "blank", "text"]);

        let by_experience = FilterState { sort: Some(SortOption::ExperienceHighLow), ..state() };
        assert_eq!(ids(&apply(&doctors, &by_experience)), vec!["b", "a", "blank", "text"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let doctors = vec![
            Doctor { fees: "₹500".into(), ..doctor("first", "X", &[]) },
            Doctor { fees: "₹100".into(), ..doctor("cheap", "X", &[]) },
            Doctor { fees: "₹500".into(), ..doctor("second", "X", &[]) },
        ];
        let filters = FilterState { sort: Some(SortOption::FeesLowHigh), ..state() };
        assert_eq!(ids(&apply(&doctors, &filters)), vec!["cheap", "first", "second"]);
    }

    #[test]
    fn test_output_is_subset_of_input() {
        let doctors = vec![
            doctor("1", "Dr. Jane", &["Dentist"]),
            doctor("2", "Dr. John", &["Dentist", "Surgeon"]),
            doctor("3", "Dr. Amy", &["Surgeon"]),
        ];
        let states = [
            state(),
            FilterState { search_text: "dr".into(), sort: Some(SortOption::FeesLowHigh), ..state() },
            FilterState { selected_specialities: ["Surgeon".to_string()].into(), ..state() },
            FilterState { consultation: Some(ConsultationType::All), ..state() },
            FilterState { search_text: "nobody".into(), ..state() },
        ];

        for filters in &states {
            for found in apply(&doctors, filters) {
                assert!(doctors.contains(&found), "{:?} invented {:?}", filters, found.id);
            }
        }
    }
}
