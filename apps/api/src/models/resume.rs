//! Resume data model — the structured document the builder edits and renders.
//!
//! Field names serialize as camelCase so persisted blobs keep the historical
//! JSON layout (`personalInfo`, `sectionOrder`, …) and older saves hydrate
//! cleanly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// The four independently orderable resume sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Personal,
    Experience,
    Education,
    Skills,
}

impl Section {
    /// Canonical order, used for new resumes and to repair incomplete orders.
    pub const ALL: [Section; 4] = [
        Section::Personal,
        Section::Experience,
        Section::Education,
        Section::Skills,
    ];

    /// The section's default display title (templates may override).
    pub fn default_title(self) -> &'static str {
        match self {
            Section::Personal => "Personal Info",
            Section::Experience => "Experience",
            Section::Education => "Education",
            Section::Skills => "Skills",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resume data
// ────────────────────────────────────────────────────────────────────────────

/// Contact block and summary. `name` is the only field the export boundary
/// requires; everything else may be empty and simply renders nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
}

/// One work-history entry. `id` is assigned at creation and stays stable
/// across reorders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    /// Ordered bullet strings.
    pub description: Vec<String>,
}

/// One education entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub honors: Option<String>,
}

/// The full editable resume document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    /// Uniqueness is encouraged but enforced only at the input surface,
    /// not here.
    pub skills: Vec<String>,
    /// Permutation of the four sections; controls render and edit order.
    pub section_order: Vec<Section>,
    /// Per-section display-title overrides (set when a template is applied;
    /// user edits win afterwards).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub section_names: BTreeMap<Section, String>,
}

impl Default for ResumeData {
    fn default() -> Self {
        ResumeData {
            personal_info: PersonalInfo::default(),
            experience: Vec::new(),
            education: Vec::new(),
            skills: Vec::new(),
            section_order: Section::ALL.to_vec(),
            section_names: BTreeMap::new(),
        }
    }
}

impl ResumeData {
    /// Display title for a section: user/template override first, then the
    /// built-in default.
    pub fn section_title(&self, section: Section) -> &str {
        self.section_names
            .get(&section)
            .map(String::as_str)
            .unwrap_or_else(|| section.default_title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_section_order_is_canonical() {
        let data = ResumeData::default();
        assert_eq!(data.section_order, Section::ALL.to_vec());
    }

    #[test]
    fn test_section_serializes_lowercase() {
        let json = serde_json::to_string(&Section::Experience).unwrap();
        assert_eq!(json, "\"experience\"");
    }

    #[test]
    fn test_resume_data_round_trips_camel_case() {
        let mut data = ResumeData::default();
        data.personal_info.name = "Ada Lovelace".to_string();
        let json = serde_json::to_string(&data).unwrap();
        assert!(
            json.contains("personalInfo"),
            "expected camelCase keys: {json}"
        );
        assert!(json.contains("sectionOrder"));
        let back: ResumeData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn test_legacy_blob_missing_new_fields_still_parses() {
        // A pre-sectionNames save must hydrate with defaults filled in.
        let legacy = r#"{
            "personalInfo": {"name": "A", "email": "", "phone": "", "location": "", "summary": ""},
            "experience": [],
            "education": [],
            "skills": ["Go"],
            "sectionOrder": ["personal", "skills", "experience", "education"]
        }"#;
        let data: ResumeData = serde_json::from_str(legacy).unwrap();
        assert_eq!(data.skills, vec!["Go".to_string()]);
        assert!(data.section_names.is_empty());
        assert_eq!(data.section_order[1], Section::Skills);
    }

    #[test]
    fn test_section_title_prefers_override() {
        let mut data = ResumeData::default();
        assert_eq!(data.section_title(Section::Skills), "Skills");
        data.section_names
            .insert(Section::Skills, "Core Competencies".to_string());
        assert_eq!(data.section_title(Section::Skills), "Core Competencies");
    }
}
