// libs/doctor-cell/src/services/suggest.rs
use crate::models::Doctor;

pub const MAX_SUGGESTIONS: usize = 3;

/// First doctors (collection order) whose name or a speciality contains `search_text`.
pub fn suggest<'a>(doctors: &'a [Doctor], search_text: &str) -> Vec<&'a Doctor> {
    let needle = search_text.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    doctors
        .iter()
        .filter(|doc| {
            doc.name.to_lowercase().contains(&needle)
                || doc.speciality_names().any(|s| s.to_lowercase().contains(&needle))
        })
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Speciality;

    fn doctor(id: &str, name: &str, speciality: Option<&str>) -> Doctor {
        Doctor {
            id: id.to_string(),
            name: name.to_string(),
            name_initials: None,
            photo: None,
            doctor_introduction: None,
            specialities: speciality
                .map(|s| vec![Speciality { name: s.to_string() }])
                .unwrap_or_default(),
            fees: "₹500".to_string(),
            experience: "5 Years".to_string(),
            languages: vec![],
            clinic: None,
            video_consult: true,
            in_clinic: true,
        }
    }

    fn names<'a>(doctors: &[&'a Doctor]) -> Vec<&'a str> {
        doctors.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_suggest_keeps_collection_order() {
        let doctors = vec![
            doctor("1", "James", None),
            doctor("2", "Jane", None),
            doctor("3", "Jack", None),
            doctor("4", "Amy", None),
        ];
        assert_eq!(names(&suggest(&doctors, "ja")), vec!["James", "Jane", "Jack"]);
    }

    #[test]
    fn test_suggest_truncates_to_three() {
        let doctors = vec![
            doctor("1", "Amy", None),
            doctor("2", "Jane", None),
            doctor("3", "Jack", None),
            doctor("4", "Janet", None),
            doctor("5", "Jasper", None),
        ];
        assert_eq!(names(&suggest(&doctors, "JA")), vec!["Jane", "Jack", "Janet"]);
    }

    #[test]
    fn test_suggest_matches_speciality() {
        let doctors = vec![
            doctor("1", "Dr. Rao", Some("Dentist")),
            doctor("2", "Dr. Iyer", Some("Cardiologist")),
        ];
        assert_eq!(names(&suggest(&doctors, "dent")), vec!["Dr. Rao"]);
    }

    #[test]
    fn test_empty_search_suggests_nothing() {
        let doctors = vec![doctor("1", "James", None)];
        assert!(suggest(&doctors, "").is_empty());
        assert!(suggest(&doctors, "   ").is_empty());
    }
}
