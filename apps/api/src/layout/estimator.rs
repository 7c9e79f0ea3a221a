//! Section height estimator — predicts rendered height without a layout pass.
//!
//! Maps (section kind, document) to an estimated height in millimeters using
//! a fixed heuristic model per section kind. Pure, total, deterministic: a
//! missing or empty substructure contributes zero, never an error.
//!
//! This is an approximation contract, not a physics simulation. The constants
//! below encode empirically-tuned line/entry heights at the standard template
//! font sizes; the planner's spacing thresholds absorb the residual error.
//! Known coarse spots: `languages`/`interests` are charged a single wrapped
//! line regardless of count, and character counts assume ~60 chars per
//! wrapped line of free text.

use serde::Serialize;

use crate::models::document::StructuredDocument;

// ────────────────────────────────────────────────────────────────────────────
// Section kinds
// ────────────────────────────────────────────────────────────────────────────

/// Closed set of section tags, in no particular order. The planner walks
/// [`FIXED_SECTION_ORDER`] and then the document's additional sections;
/// `Additional` carries the index into `document.additional_sections`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Summary,
    Roles,
    Experience,
    Education,
    Skills,
    Projects,
    Accomplishments,
    Awards,
    Certifications,
    Languages,
    Interests,
    Publications,
    VolunteerWork,
    Additional(usize),
}

/// Canonical walk order for the schema-defined sections. Additional sections
/// trail this list, in document order.
pub const FIXED_SECTION_ORDER: [SectionKind; 13] = [
    SectionKind::Summary,
    SectionKind::Roles,
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Skills,
    SectionKind::Projects,
    SectionKind::Accomplishments,
    SectionKind::Awards,
    SectionKind::Certifications,
    SectionKind::Languages,
    SectionKind::Interests,
    SectionKind::Publications,
    SectionKind::VolunteerWork,
];

impl SectionKind {
    /// Stable identifier for the markup layer. Additional sections resolve
    /// their data-defined name via [`SectionKind::label`].
    pub fn slug(&self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Roles => "roles",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Accomplishments => "accomplishments",
            SectionKind::Awards => "awards",
            SectionKind::Certifications => "certifications",
            SectionKind::Languages => "languages",
            SectionKind::Interests => "interests",
            SectionKind::Publications => "publications",
            SectionKind::VolunteerWork => "volunteerWork",
            SectionKind::Additional(_) => "additional",
        }
    }

    /// Display label: the section's data-defined name for additional
    /// sections, the slug for everything else.
    pub fn label(&self, document: &StructuredDocument) -> String {
        match self {
            SectionKind::Additional(index) => document
                .additional_sections
                .get(*index)
                .map_or_else(|| self.slug().to_string(), |s| s.name.clone()),
            _ => self.slug().to_string(),
        }
    }

    /// Whether the section exists and is non-empty in this document.
    /// The planner and the markup layer must apply the same filter.
    pub fn is_populated(&self, document: &StructuredDocument) -> bool {
        match self {
            SectionKind::Summary => {
                document.summary.as_deref().is_some_and(|s| !s.is_empty())
            }
            SectionKind::Roles => !document.roles.is_empty(),
            SectionKind::Experience => !document.experience.is_empty(),
            SectionKind::Education => !document.education.is_empty(),
            SectionKind::Skills => !document.skills.is_empty(),
            SectionKind::Projects => !document.projects.is_empty(),
            SectionKind::Accomplishments => !document.accomplishments.is_empty(),
            SectionKind::Awards => !document.awards.is_empty(),
            SectionKind::Certifications => !document.certifications.is_empty(),
            SectionKind::Languages => !document.languages.is_empty(),
            SectionKind::Interests => !document.interests.is_empty(),
            SectionKind::Publications => !document.publications.is_empty(),
            SectionKind::VolunteerWork => !document.volunteer_work.is_empty(),
            SectionKind::Additional(index) => document
                .additional_sections
                .get(*index)
                .is_some_and(|s| !s.content.is_empty()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Heuristic constants (part of the behavioral contract — tuned, not derived)
// ────────────────────────────────────────────────────────────────────────────

/// Overhead charged to every section: title plus its padding.
pub const SECTION_BASE_MM: f32 = 8.0;
/// Height of one wrapped line of body text.
pub const LINE_HEIGHT_MM: f32 = 4.0;
/// Assumed characters per wrapped line of free text.
pub const CHARS_PER_LINE: usize = 60;
/// A summary renders at least this many lines (short summaries get padding).
pub const MIN_SUMMARY_LINES: usize = 3;
/// Assumed skill chips per wrapped line.
pub const SKILL_CHIPS_PER_LINE: usize = 8;
/// Entry chrome for one experience entry: role/company/years header block.
pub const EXPERIENCE_ENTRY_MM: f32 = 12.0;

/// Per-entry height for the uniform repeating and flat-list sections.
/// Returns `None` for kinds with a non-linear formula (summary, experience,
/// skills, languages/interests, additional).
fn per_entry_mm(kind: SectionKind) -> Option<f32> {
    match kind {
        SectionKind::Roles => Some(4.0),
        SectionKind::Education => Some(12.0),
        SectionKind::Projects => Some(8.0),
        SectionKind::Accomplishments => Some(4.0),
        SectionKind::Awards => Some(6.0),
        SectionKind::Certifications => Some(6.0),
        SectionKind::Publications => Some(6.0),
        SectionKind::VolunteerWork => Some(10.0),
        _ => None,
    }
}

fn entry_count(kind: SectionKind, document: &StructuredDocument) -> usize {
    match kind {
        SectionKind::Roles => document.roles.len(),
        SectionKind::Education => document.education.len(),
        SectionKind::Projects => document.projects.len(),
        SectionKind::Accomplishments => document.accomplishments.len(),
        SectionKind::Awards => document.awards.len(),
        SectionKind::Certifications => document.certifications.len(),
        SectionKind::Publications => document.publications.len(),
        SectionKind::VolunteerWork => document.volunteer_work.len(),
        _ => 0,
    }
}

/// Estimated wrapped-line count for a run of free text.
fn text_lines(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_LINE)
}

// ────────────────────────────────────────────────────────────────────────────
// Estimation
// ────────────────────────────────────────────────────────────────────────────

/// Estimates the rendered height of one section in millimeters.
///
/// Total over the whole input domain: an empty or absent substructure
/// contributes zero (the planner normally filters those out before calling,
/// but nothing here can fail).
pub fn estimate_section_height(kind: SectionKind, document: &StructuredDocument) -> f32 {
    let body_mm = match kind {
        SectionKind::Summary => {
            let len = document.summary.as_deref().unwrap_or("").chars().count();
            let lines = len.div_ceil(CHARS_PER_LINE).max(MIN_SUMMARY_LINES);
            lines as f32 * LINE_HEIGHT_MM
        }

        SectionKind::Experience => document
            .experience
            .iter()
            .map(|entry| EXPERIENCE_ENTRY_MM + entry.bullets.len() as f32 * LINE_HEIGHT_MM)
            .sum(),

        SectionKind::Skills => {
            let lines = document.skills.len().div_ceil(SKILL_CHIPS_PER_LINE).max(1);
            lines as f32 * LINE_HEIGHT_MM
        }

        // Charged as a single wrapped chip line regardless of count.
        SectionKind::Languages | SectionKind::Interests => LINE_HEIGHT_MM,

        SectionKind::Additional(index) => {
            let content = document
                .additional_sections
                .get(index)
                .map_or("", |s| s.content.as_str());
            text_lines(content) as f32 * LINE_HEIGHT_MM
        }

        kind => match per_entry_mm(kind) {
            Some(mm) => entry_count(kind, document) as f32 * mm,
            // Unreachable: every non-tabular kind is matched above.
            None => 2.0 * LINE_HEIGHT_MM,
        },
    };

    SECTION_BASE_MM + body_mm
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::{
        AdditionalSection, AwardEntry, CertificationEntry, EducationEntry, ExperienceEntry,
        ProjectEntry, PublicationEntry, VolunteerEntry,
    };

    fn doc() -> StructuredDocument {
        StructuredDocument::default()
    }

    fn mm(kind: SectionKind, document: &StructuredDocument) -> f32 {
        estimate_section_height(kind, document)
    }

    // ── summary ─────────────────────────────────────────────────────────────

    #[test]
    fn test_summary_short_text_padded_to_three_lines() {
        let mut d = doc();
        d.summary = Some("a".repeat(40));
        // ceil(40/60) = 1, padded to 3 lines → 8 + 3*4 = 20
        assert_eq!(mm(SectionKind::Summary, &d), 20.0);
    }

    #[test]
    fn test_summary_long_text_scales_by_60_char_lines() {
        let mut d = doc();
        d.summary = Some("a".repeat(250));
        // ceil(250/60) = 5 lines → 8 + 20 = 28
        assert_eq!(mm(SectionKind::Summary, &d), 28.0);
    }

    #[test]
    fn test_summary_counts_chars_not_bytes() {
        let mut d = doc();
        d.summary = Some("é".repeat(60));
        // 60 chars (120 bytes) is exactly one estimated line, padded to 3
        assert_eq!(mm(SectionKind::Summary, &d), 20.0);
    }

    #[test]
    fn test_summary_absent_still_total() {
        assert_eq!(mm(SectionKind::Summary, &doc()), 20.0);
    }

    // ── experience ──────────────────────────────────────────────────────────

    #[test]
    fn test_experience_entry_chrome_plus_bullets() {
        let mut d = doc();
        d.experience = vec![
            ExperienceEntry {
                role: "Engineer".into(),
                company: "Acme".into(),
                years: None,
                bullets: vec!["a".into(), "b".into(), "c".into()],
            },
            ExperienceEntry {
                role: "Intern".into(),
                company: "Acme".into(),
                years: None,
                bullets: vec![],
            },
        ];
        // 8 + (12 + 3*4) + (12 + 0) = 44
        assert_eq!(mm(SectionKind::Experience, &d), 44.0);
    }

    // ── flat lists and uniform repeating sections ───────────────────────────

    #[test]
    fn test_education_12mm_per_entry() {
        let mut d = doc();
        d.education = vec![
            EducationEntry { degree: "BSc".into(), institution: "MIT".into(), years: None };
            2
        ];
        assert_eq!(mm(SectionKind::Education, &d), 32.0);
    }

    #[test]
    fn test_skills_wrap_at_eight_chips_per_line() {
        let mut d = doc();
        d.skills = (0..8).map(|i| format!("skill-{i}")).collect();
        assert_eq!(mm(SectionKind::Skills, &d), 12.0, "8 chips fit one line");
        d.skills.push("one more".into());
        assert_eq!(mm(SectionKind::Skills, &d), 16.0, "9th chip wraps to a second line");
    }

    #[test]
    fn test_skills_empty_still_charges_one_line() {
        assert_eq!(mm(SectionKind::Skills, &doc()), 12.0);
    }

    #[test]
    fn test_projects_8mm_per_entry() {
        let mut d = doc();
        d.projects = vec![ProjectEntry { title: "p".into(), description: None }; 3];
        assert_eq!(mm(SectionKind::Projects, &d), 32.0);
    }

    #[test]
    fn test_accomplishments_and_roles_4mm_per_item() {
        let mut d = doc();
        d.accomplishments = vec!["x".into(); 5];
        d.roles = vec!["Backend".into(), "SRE".into()];
        assert_eq!(mm(SectionKind::Accomplishments, &d), 28.0);
        assert_eq!(mm(SectionKind::Roles, &d), 16.0);
    }

    #[test]
    fn test_awards_certifications_publications_6mm_per_entry() {
        let mut d = doc();
        d.awards = vec![AwardEntry { title: "a".into(), issuer: None, year: None }; 2];
        d.certifications =
            vec![CertificationEntry { name: "c".into(), issuer: None, year: None }; 3];
        d.publications = vec![PublicationEntry { title: "p".into(), venue: None, year: None }; 1];
        assert_eq!(mm(SectionKind::Awards, &d), 20.0);
        assert_eq!(mm(SectionKind::Certifications, &d), 26.0);
        assert_eq!(mm(SectionKind::Publications, &d), 14.0);
    }

    #[test]
    fn test_languages_and_interests_flat_single_line() {
        let mut d = doc();
        d.languages = vec!["English".into(), "French".into(), "German".into()];
        d.interests = (0..20).map(|i| format!("interest-{i}")).collect();
        // Count-independent by design
        assert_eq!(mm(SectionKind::Languages, &d), 12.0);
        assert_eq!(mm(SectionKind::Interests, &d), 12.0);
    }

    #[test]
    fn test_volunteer_work_10mm_per_entry() {
        let mut d = doc();
        d.volunteer_work =
            vec![VolunteerEntry { role: "Mentor".into(), organization: "Code Club".into(), years: None }; 2];
        assert_eq!(mm(SectionKind::VolunteerWork, &d), 28.0);
    }

    // ── additional sections ─────────────────────────────────────────────────

    #[test]
    fn test_additional_section_free_text_lines() {
        let mut d = doc();
        d.additional_sections = vec![AdditionalSection {
            name: "Patents".into(),
            content: "a".repeat(130),
        }];
        // ceil(130/60) = 3 lines → 8 + 12 = 20 (no minimum-line padding here)
        assert_eq!(mm(SectionKind::Additional(0), &d), 20.0);
    }

    #[test]
    fn test_additional_section_out_of_range_index_is_base_only() {
        assert_eq!(mm(SectionKind::Additional(7), &doc()), 8.0);
    }

    // ── population filter ───────────────────────────────────────────────────

    #[test]
    fn test_empty_string_summary_not_populated() {
        let mut d = doc();
        d.summary = Some(String::new());
        assert!(!SectionKind::Summary.is_populated(&d));
        d.summary = Some("x".into());
        assert!(SectionKind::Summary.is_populated(&d));
    }

    #[test]
    fn test_empty_content_additional_section_not_populated() {
        let mut d = doc();
        d.additional_sections =
            vec![AdditionalSection { name: "References".into(), content: String::new() }];
        assert!(!SectionKind::Additional(0).is_populated(&d));
    }

    #[test]
    fn test_nothing_populated_in_empty_document() {
        let d = doc();
        assert!(FIXED_SECTION_ORDER.iter().all(|k| !k.is_populated(&d)));
    }
}
