//! Server-rendered listing page.
//!
//! Every control is a link or a GET form whose target is the encoded state after the
//! corresponding interaction event, so the address bar always carries the whole listing state.

use std::fmt::Write;

use crate::models::{
    ConsultationType, DirectoryEvent, DirectoryState, Doctor, Listing, ListingStatus, SortOption,
};
use crate::services::query::{self, CONSULTATION_PARAM, SORT_PARAM, SPECIALITIES_PARAM};
use crate::services::DirectorySession;

pub fn render_listing(listing: &Listing) -> String {
    let mut body = String::new();
    body.push_str(&render_controls(listing));

    match listing.status {
        ListingStatus::Loading => {
            body.push_str(r#"<p data-testid="loading">Loading doctors...</p>"#);
        }
        ListingStatus::Empty => {
            body.push_str(r#"<p data-testid="no-doctors-found">No doctors found.</p>"#);
        }
        ListingStatus::Results => {
            let _ = write!(body, r#"<p data-testid="result-count">{} doctors</p>"#, listing.total);
            for doctor in &listing.doctors {
                body.push_str(&render_card(doctor));
            }
        }
    }

    page(&body)
}

pub fn render_error(state: &DirectoryState, message: &str) -> String {
    let body = format!(
        r#"<div data-testid="load-error"><p>Could not load the doctor directory.</p><p>{}</p><a href="{}">Try again</a></div>"#,
        escape(message),
        escape(&query::location(state)),
    );
    page(&body)
}

fn page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Doctor Listing</title></head>
<body data-testid="doctor-listing-page">
<h1>Doctor Listing</h1>
{}
</body>
</html>"#,
        body
    )
}

fn after(state: &DirectoryState, event: DirectoryEvent) -> String {
    DirectorySession::new(state.clone()).with(event, &[]).location()
}

fn render_controls(listing: &Listing) -> String {
    let state = &listing.state;
    let filters = &state.filters;
    let mut html = String::from(r#"<section data-testid="filters">"#);

    // Text inputs submit as a plain GET; the other controls ride along as hidden fields.
    let _ = write!(
        html,
        r#"<form method="get" action="/" data-testid="search-form"><input type="search" name="search" placeholder="Search by name, speciality or clinic" value="{}" data-testid="autocomplete-input"><input type="search" name="speciality" placeholder="Filter specialities" value="{}" data-testid="speciality-search">"#,
        escape(&filters.search_text),
        escape(&filters.speciality_search_text),
    );
    if !filters.selected_specialities.is_empty() {
        let encoded = serde_json::to_string(&filters.selected_specialities).unwrap_or_default();
        let _ = write!(html, r#"<input type="hidden" name="{}" value="{}">"#, SPECIALITIES_PARAM, escape(&encoded));
    }
    if let Some(consultation) = filters.consultation {
        let _ = write!(html, r#"<input type="hidden" name="{}" value="{}">"#, CONSULTATION_PARAM, consultation.as_param());
    }
    if let Some(sort) = filters.sort {
        let _ = write!(html, r#"<input type="hidden" name="{}" value="{}">"#, SORT_PARAM, sort.as_param());
    }
    html.push_str(r#"<button type="submit">Search</button></form>"#);

    if !listing.suggestions.is_empty() && !listing.pinned {
        html.push_str(r#"<ul data-testid="suggestion-list">"#);
        for suggestion in &listing.suggestions {
            let _ = write!(
                html,
                r#"<li data-testid="suggestion-item"><a href="/?{}">{}</a> <small>{}</small></li>"#,
                escape(&suggestion.query),
                escape(&suggestion.name),
                escape(&suggestion.specialities.join(", ")),
            );
        }
        html.push_str("</ul>");
    }

    html.push_str(r#"<fieldset data-testid="filter-header-speciality"><legend>Speciality</legend>"#);
    for option in &listing.specialities {
        let href = after(state, DirectoryEvent::SpecialityToggled { name: option.name.clone() });
        let _ = write!(
            html,
            r#"<a role="checkbox" aria-checked="{}" href="{}" data-testid="filter-specialty-{}">{} {}</a>"#,
            option.selected,
            escape(&href),
            escape(&test_id(&option.name)),
            if option.selected { "&#9745;" } else { "&#9744;" },
            escape(&option.name),
        );
    }
    html.push_str("</fieldset>");

    html.push_str(r#"<fieldset data-testid="filter-header-moc"><legend>Mode of consultation</legend>"#);
    for consultation in ConsultationType::ALL {
        let selected = filters.consultation == Some(consultation);
        let next = if selected { None } else { Some(consultation) };
        let href = after(state, DirectoryEvent::ConsultationSelected { consultation: next });
        let _ = write!(
            html,
            r#"<a role="radio" aria-checked="{}" href="{}" data-testid="filter-{}">{}</a>"#,
            selected,
            escape(&href),
            consultation.as_param().replace('_', "-"),
            consultation.label(),
        );
    }
    html.push_str("</fieldset>");

    html.push_str(r#"<fieldset data-testid="filter-header-sort"><legend>Sort by</legend>"#);
    for sort in SortOption::ALL {
        let selected = filters.sort == Some(sort);
        let next = if selected { None } else { Some(sort) };
        let href = after(state, DirectoryEvent::SortSelected { sort: next });
        let _ = write!(
            html,
            r#"<a role="radio" aria-checked="{}" href="{}" data-testid="sort-{}">{}</a>"#,
            selected,
            escape(&href),
            if sort == SortOption::FeesLowHigh { "fees" } else { "experience" },
            sort.label(),
        );
    }
    html.push_str("</fieldset>");

    if !filters.is_default() || state.pinned.is_some() {
        let _ = write!(html, r#"<a href="{}" data-testid="clear-filters">Clear all</a>"#, after(state, DirectoryEvent::Reset));
    }

    html.push_str("</section>");
    html
}

fn render_card(doctor: &Doctor) -> String {
    let specialities: Vec<&str> = doctor.speciality_names().collect();
    let clinic = doctor.clinic.as_ref();
    let address = clinic.and_then(|c| c.address.as_ref());
    let location = [
        address.and_then(|a| a.locality.as_deref()),
        address.and_then(|a| a.city.as_deref()),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(", ");

    let mut html = String::from(r#"<article data-testid="doctor-card">"#);
    if let Some(photo) = doctor.photo.as_deref() {
        let _ = write!(html, r#"<img src="{}" alt="{}" width="100" height="100">"#, escape(photo), escape(&doctor.name));
    }
    let _ = write!(
        html,
        r#"<h3 data-testid="doctor-name">{}</h3><p data-testid="doctor-specialty">{}</p><p data-testid="doctor-experience">{}</p><p data-testid="doctor-fee">Fee: {}</p>"#,
        escape(&doctor.name),
        escape(&specialities.join(", ")),
        escape(&doctor.experience),
        escape(&doctor.fees),
    );
    if !doctor.languages.is_empty() {
        let _ = write!(html, "<p>{}</p>", escape(&doctor.languages.join(", ")));
    }
    let _ = write!(
        html,
        "<p>{}</p>",
        escape(doctor.doctor_introduction.as_deref().unwrap_or("No introduction available.")),
    );
    if let Some(name) = doctor.clinic_name() {
        let _ = write!(html, "<p>{} &ndash; {}</p>", escape(name), escape(&location));
    }
    // Booking is not wired up yet.
    html.push_str(r#"<button type="button" disabled data-testid="book-appointment">Book Appointment</button></article>"#);
    html
}

fn test_id(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
