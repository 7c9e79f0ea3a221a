//! Canonical structured document for a CV or cover letter.
#![allow(dead_code)]
//!
//! Every section is independently optional. "Populated" means present and
//! non-empty — an empty string, empty list, or absent field all count as
//! not-populated and the section is skipped entirely (no empty headers are
//! ever emitted, and the layout walk must agree with the markup layer about
//! which sections exist).
//!
//! Wire names are camelCase: the document JSON originates from the JS/TS
//! editor frontend.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Document root
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredDocument {
    /// Fixed-height header block (name, title, contact). Not part of the
    /// body height estimate — the page budget reserves space for it.
    #[serde(default)]
    pub personal_details: Option<PersonalDetails>,

    #[serde(default)]
    pub summary: Option<String>,

    /// Flat list sections.
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub accomplishments: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,

    /// Repeating-entry sections.
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub awards: Vec<AwardEntry>,
    #[serde(default)]
    pub certifications: Vec<CertificationEntry>,
    #[serde(default)]
    pub publications: Vec<PublicationEntry>,
    #[serde(default)]
    pub volunteer_work: Vec<VolunteerEntry>,

    /// Open-ended trailing sections whose identity is data-defined
    /// (e.g. "Patents", "References"). Laid out individually, in order.
    #[serde(default)]
    pub additional_sections: Vec<AdditionalSection>,
}

// ────────────────────────────────────────────────────────────────────────────
// Section records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub years: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    #[serde(default)]
    pub years: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardEntry {
    pub title: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationEntry {
    pub name: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationEntry {
    pub title: String,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerEntry {
    pub role: String,
    pub organization: String,
    #[serde(default)]
    pub years: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalSection {
    pub name: String,
    pub content: String,
}
