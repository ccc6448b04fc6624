//! The resume store — single owner of ResumeData, the settings tree, and the
//! active template selection.
//!
//! Lifecycle: construct → hydrate (once) → mutate → persist-on-each-mutation.
//! Every mutation is a synchronous read-modify-write that swaps in a new
//! object and persists the full blob; the store itself never rejects a
//! write — callers pre-validate where validation matters (export boundary).
//!
//! The store is injected into consumers (no ambient singleton) and is not
//! internally synchronized; the service layer serializes access.
#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::models::resume::{EducationEntry, ExperienceEntry, PersonalInfo, ResumeData, Section};
use crate::schema::registry::{self, TemplateId};
use crate::settings::path;
use crate::settings::persist::StateStore;
use crate::settings::value::{deep_merge, SettingNode, SettingValue};

/// Persisted-state keys, stable across versions.
const RESUME_KEY: &str = "resume-data";
const SETTINGS_KEY: &str = "resume-global-settings";
const TEMPLATE_KEY: &str = "resume-template-state";

/// The `resume-template-state` blob: which template is active and whether the
/// template dialog was open, persisted independently of settings and data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct TemplateState {
    selected_template: TemplateId,
    dialog_open: bool,
}

impl Default for TemplateState {
    fn default() -> Self {
        TemplateState {
            selected_template: TemplateId::DEFAULT,
            dialog_open: false,
        }
    }
}

/// Partial personal-info update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfoPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
}

/// Partial experience update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperiencePatch {
    pub company: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<Vec<String>>,
}

/// Partial education update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationPatch {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
    pub honors: Option<String>,
}

pub struct ResumeStore {
    backend: Box<dyn StateStore>,
    resume: ResumeData,
    settings: SettingNode,
    template: TemplateState,
    hydrated: bool,
}

impl ResumeStore {
    /// Builds a store with in-memory defaults. Nothing is read until
    /// [`hydrate`](Self::hydrate).
    pub fn new(backend: Box<dyn StateStore>) -> Self {
        ResumeStore {
            backend,
            resume: ResumeData::default(),
            settings: registry::default_settings(TemplateId::DEFAULT),
            template: TemplateState::default(),
            hydrated: false,
        }
    }

    // ── Reads ───────────────────────────────────────────────────────────────

    pub fn resume(&self) -> &ResumeData {
        &self.resume
    }

    pub fn settings(&self) -> &SettingNode {
        &self.settings
    }

    pub fn template(&self) -> TemplateId {
        self.template.selected_template
    }

    pub fn dialog_open(&self) -> bool {
        self.template.dialog_open
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    // ── Hydration ───────────────────────────────────────────────────────────

    /// Loads persisted state once. Missing or unparsable blobs fall back to
    /// built-in defaults; parsed blobs are deep-merged onto the defaults so
    /// leaves added since the save was written resolve to their defaults
    /// while every persisted value is preserved. Idempotent.
    pub fn hydrate(&mut self) {
        if self.hydrated {
            return;
        }

        self.template = self
            .load_json::<TemplateState>(TEMPLATE_KEY)
            .unwrap_or_default();

        let defaults = registry::default_settings(self.template.selected_template);
        self.settings = match self.load_json::<SettingNode>(SETTINGS_KEY) {
            Some(saved) => deep_merge(&defaults, &saved),
            None => defaults,
        };

        let resume_defaults = ResumeData::default();
        self.resume = self
            .load_json::<ResumeData>(RESUME_KEY)
            .map(|mut loaded| {
                // Field-level defaulting happens in serde; the order list is
                // repaired here so the section-set invariant survives any
                // hand-edited or truncated blob.
                loaded.section_order = normalize_section_order(&loaded.section_order);
                loaded
            })
            .unwrap_or(resume_defaults);

        self.hydrated = true;
    }

    fn load_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.backend.load(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("discarding unparsable persisted blob '{key}': {e}");
                None
            }
        }
    }

    // ── Settings mutations ──────────────────────────────────────────────────

    /// Writes one leaf through the path accessor and persists the whole
    /// configuration object.
    pub fn update_setting(&mut self, setting_path: &str, value: impl Into<SettingValue>) {
        self.settings = path::write(&self.settings, setting_path, value);
        self.persist_settings();
    }

    /// Replaces the configuration wholesale with `template`'s declared
    /// defaults (no merge with the outgoing tree) and records the selection.
    /// Also applies the template's section titles to the resume document.
    pub fn apply_template(&mut self, template: TemplateId) {
        self.settings = registry::default_settings(template);
        self.template.selected_template = template;

        let mut resume = self.resume.clone();
        resume.section_names = registry::section_names(template)
            .iter()
            .map(|(section, title)| (*section, (*title).to_string()))
            .collect();
        self.resume = resume;

        self.persist_settings();
        self.persist_template();
        self.persist_resume();
    }

    /// Records the selection without touching the configuration.
    pub fn set_selected_template(&mut self, template: TemplateId) {
        self.template.selected_template = template;
        self.persist_template();
    }

    pub fn set_dialog_open(&mut self, open: bool) {
        self.template.dialog_open = open;
        self.persist_template();
    }

    // ── Resume mutations ────────────────────────────────────────────────────

    pub fn update_personal_info(&mut self, patch: PersonalInfoPatch) {
        let current = &self.resume.personal_info;
        let personal_info = PersonalInfo {
            name: patch.name.unwrap_or_else(|| current.name.clone()),
            email: patch.email.unwrap_or_else(|| current.email.clone()),
            phone: patch.phone.unwrap_or_else(|| current.phone.clone()),
            location: patch.location.unwrap_or_else(|| current.location.clone()),
            summary: patch.summary.unwrap_or_else(|| current.summary.clone()),
            linkedin: patch.linkedin.or_else(|| current.linkedin.clone()),
            portfolio: patch.portfolio.or_else(|| current.portfolio.clone()),
        };
        self.resume = ResumeData {
            personal_info,
            ..self.resume.clone()
        };
        self.persist_resume();
    }

    /// Appends a new experience entry and returns its assigned id (stable
    /// across reorders).
    pub fn add_experience(&mut self, mut entry: ExperienceEntry) -> Uuid {
        entry.id = Uuid::new_v4();
        let id = entry.id;
        let mut experience = self.resume.experience.clone();
        experience.push(entry);
        self.resume = ResumeData {
            experience,
            ..self.resume.clone()
        };
        self.persist_resume();
        id
    }

    /// Applies a patch to the entry with `id`; unknown ids are a no-op.
    pub fn update_experience(&mut self, id: Uuid, patch: ExperiencePatch) {
        let experience = self
            .resume
            .experience
            .iter()
            .map(|entry| {
                if entry.id != id {
                    return entry.clone();
                }
                ExperienceEntry {
                    id: entry.id,
                    company: patch.company.clone().unwrap_or_else(|| entry.company.clone()),
                    position: patch.position.clone().unwrap_or_else(|| entry.position.clone()),
                    location: patch.location.clone().unwrap_or_else(|| entry.location.clone()),
                    start_date: patch
                        .start_date
                        .clone()
                        .unwrap_or_else(|| entry.start_date.clone()),
                    end_date: patch.end_date.clone().unwrap_or_else(|| entry.end_date.clone()),
                    description: patch
                        .description
                        .clone()
                        .unwrap_or_else(|| entry.description.clone()),
                }
            })
            .collect();
        self.resume = ResumeData {
            experience,
            ..self.resume.clone()
        };
        self.persist_resume();
    }

    pub fn remove_experience(&mut self, id: Uuid) {
        let experience = self
            .resume
            .experience
            .iter()
            .filter(|entry| entry.id != id)
            .cloned()
            .collect();
        self.resume = ResumeData {
            experience,
            ..self.resume.clone()
        };
        self.persist_resume();
    }

    /// Reorders experience entries by id. Ids not present are ignored;
    /// entries missing from `order` keep their relative order at the end.
    pub fn reorder_experience(&mut self, order: &[Uuid]) {
        let experience = reorder_by_id(&self.resume.experience, order, |e| e.id);
        self.resume = ResumeData {
            experience,
            ..self.resume.clone()
        };
        self.persist_resume();
    }

    pub fn add_education(&mut self, mut entry: EducationEntry) -> Uuid {
        entry.id = Uuid::new_v4();
        let id = entry.id;
        let mut education = self.resume.education.clone();
        education.push(entry);
        self.resume = ResumeData {
            education,
            ..self.resume.clone()
        };
        self.persist_resume();
        id
    }

    pub fn update_education(&mut self, id: Uuid, patch: EducationPatch) {
        let education = self
            .resume
            .education
            .iter()
            .map(|entry| {
                if entry.id != id {
                    return entry.clone();
                }
                EducationEntry {
                    id: entry.id,
                    institution: patch
                        .institution
                        .clone()
                        .unwrap_or_else(|| entry.institution.clone()),
                    degree: patch.degree.clone().unwrap_or_else(|| entry.degree.clone()),
                    field: patch.field.clone().unwrap_or_else(|| entry.field.clone()),
                    start_date: patch
                        .start_date
                        .clone()
                        .unwrap_or_else(|| entry.start_date.clone()),
                    end_date: patch.end_date.clone().unwrap_or_else(|| entry.end_date.clone()),
                    gpa: patch.gpa.clone().or_else(|| entry.gpa.clone()),
                    honors: patch.honors.clone().or_else(|| entry.honors.clone()),
                }
            })
            .collect();
        self.resume = ResumeData {
            education,
            ..self.resume.clone()
        };
        self.persist_resume();
    }

    pub fn remove_education(&mut self, id: Uuid) {
        let education = self
            .resume
            .education
            .iter()
            .filter(|entry| entry.id != id)
            .cloned()
            .collect();
        self.resume = ResumeData {
            education,
            ..self.resume.clone()
        };
        self.persist_resume();
    }

    pub fn reorder_education(&mut self, order: &[Uuid]) {
        let education = reorder_by_id(&self.resume.education, order, |e| e.id);
        self.resume = ResumeData {
            education,
            ..self.resume.clone()
        };
        self.persist_resume();
    }

    /// Replaces the skills list outright. Deduplication is an input-surface
    /// concern, not enforced here.
    pub fn update_skills(&mut self, skills: Vec<String>) {
        self.resume = ResumeData {
            skills,
            ..self.resume.clone()
        };
        self.persist_resume();
    }

    /// Replaces the section order. The proposed order is normalized so the
    /// section *set* is invariant: duplicates and unknowns drop out, missing
    /// sections append in canonical order.
    pub fn reorder_sections(&mut self, order: &[Section]) {
        self.resume = ResumeData {
            section_order: normalize_section_order(order),
            ..self.resume.clone()
        };
        self.persist_resume();
    }

    // ── Persistence ─────────────────────────────────────────────────────────

    fn persist_resume(&self) {
        self.save_json(RESUME_KEY, &self.resume);
    }

    fn persist_settings(&self) {
        self.save_json(SETTINGS_KEY, &self.settings);
    }

    fn persist_template(&self) {
        self.save_json(TEMPLATE_KEY, &self.template);
    }

    fn save_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(blob) => self.backend.save(key, &blob),
            Err(e) => warn!("could not serialize '{key}': {e}"),
        }
    }
}

/// Keeps the first occurrence of each known section, then appends whatever
/// is missing in canonical order. The result is always a permutation of all
/// four sections.
fn normalize_section_order(proposed: &[Section]) -> Vec<Section> {
    let mut order: Vec<Section> = Vec::with_capacity(Section::ALL.len());
    for section in proposed {
        if !order.contains(section) {
            order.push(*section);
        }
    }
    for section in Section::ALL {
        if !order.contains(&section) {
            order.push(section);
        }
    }
    order
}

/// Stable reorder-by-id: listed ids first in the given order, unlisted
/// entries after in their current order.
fn reorder_by_id<T: Clone>(items: &[T], order: &[Uuid], id_of: impl Fn(&T) -> Uuid) -> Vec<T> {
    let mut reordered: Vec<T> = Vec::with_capacity(items.len());
    for id in order {
        if let Some(item) = items.iter().find(|item| id_of(item) == *id) {
            if !reordered.iter().any(|r| id_of(r) == *id) {
                reordered.push(item.clone());
            }
        }
    }
    for item in items {
        if !reordered.iter().any(|r| id_of(r) == id_of(item)) {
            reordered.push(item.clone());
        }
    }
    reordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::path::read;
    use crate::settings::persist::MemoryStore;

    fn make_store() -> ResumeStore {
        let mut store = ResumeStore::new(Box::new(MemoryStore::new()));
        store.hydrate();
        store
    }

    fn make_experience(company: &str) -> ExperienceEntry {
        ExperienceEntry {
            id: Uuid::nil(),
            company: company.to_string(),
            position: "Engineer".to_string(),
            location: "Remote".to_string(),
            start_date: "01/2020".to_string(),
            end_date: "Present".to_string(),
            description: vec!["Did things".to_string()],
        }
    }

    #[test]
    fn test_hydrate_is_idempotent() {
        let mut store = make_store();
        assert!(store.is_hydrated());
        store.update_skills(vec!["Rust".to_string()]);
        store.hydrate(); // second call must not reload and clobber
        assert_eq!(store.resume().skills, vec!["Rust".to_string()]);
    }

    #[test]
    fn test_hydrate_with_empty_backend_uses_defaults() {
        let store = make_store();
        assert_eq!(store.template(), TemplateId::Minimal);
        assert_eq!(
            read(store.settings(), "typography.body.fontSize").and_then(|v| v.as_number()),
            Some(14.0)
        );
    }

    #[test]
    fn test_hydrate_recovers_from_unparsable_blob() {
        let backend = MemoryStore::seeded(&[
            (RESUME_KEY, "{not json"),
            (SETTINGS_KEY, "also not json"),
        ]);
        let mut store = ResumeStore::new(Box::new(backend));
        store.hydrate();
        assert_eq!(store.resume(), &ResumeData::default());
        assert!(read(store.settings(), "margin.top").is_some());
    }

    #[test]
    fn test_hydrate_backfills_missing_leaves_and_keeps_saved_ones() {
        // Simulates a blob written before spacing.header existed.
        let saved = r#"{"margin": {"top": 99}, "typography": {"body": {"fontSize": 10}}}"#;
        let backend = MemoryStore::seeded(&[(SETTINGS_KEY, saved)]);
        let mut store = ResumeStore::new(Box::new(backend));
        store.hydrate();
        // Saved leaves preserved.
        assert_eq!(
            read(store.settings(), "margin.top").and_then(|v| v.as_number()),
            Some(99.0)
        );
        assert_eq!(
            read(store.settings(), "typography.body.fontSize").and_then(|v| v.as_number()),
            Some(10.0)
        );
        // Missing leaves backfilled from defaults.
        assert_eq!(
            read(store.settings(), "spacing.header.bottom").and_then(|v| v.as_number()),
            Some(16.0)
        );
        assert_eq!(
            read(store.settings(), "layout.headerStyle").and_then(|v| v.as_text()),
            Some("minimal")
        );
    }

    #[test]
    fn test_hydrate_merges_onto_persisted_templates_defaults() {
        let backend = MemoryStore::seeded(&[(
            TEMPLATE_KEY,
            r#"{"selectedTemplate": "professional", "dialogOpen": true}"#,
        )]);
        let mut store = ResumeStore::new(Box::new(backend));
        store.hydrate();
        assert_eq!(store.template(), TemplateId::Professional);
        assert!(store.dialog_open());
        // No settings blob saved → professional defaults, not minimal's.
        assert_eq!(
            read(store.settings(), "colors.accent").and_then(|v| v.as_text()),
            Some("#3b82f6")
        );
    }

    #[test]
    fn test_update_setting_persists_full_configuration() {
        let mut store = make_store();
        store.update_setting("margin.top", 64.0);
        assert_eq!(
            read(store.settings(), "margin.top").and_then(|v| v.as_number()),
            Some(64.0)
        );
        // A fresh store over the same backend sees the write.
        let raw = store.backend.load(SETTINGS_KEY).expect("settings persisted");
        let reloaded: SettingNode = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            read(&reloaded, "margin.top").and_then(|v| v.as_number()),
            Some(64.0)
        );
    }

    #[test]
    fn test_apply_template_replaces_wholesale_no_residue() {
        let mut store = make_store();
        store.apply_template(TemplateId::Professional);
        store.update_setting("margin.top", 111.0);
        store.apply_template(TemplateId::Creative);
        assert_eq!(store.settings(), &registry::default_settings(TemplateId::Creative));
        // And back again: deep-equal to professional's declared defaults.
        store.apply_template(TemplateId::Professional);
        assert_eq!(
            store.settings(),
            &registry::default_settings(TemplateId::Professional)
        );
    }

    #[test]
    fn test_apply_template_sets_section_titles() {
        let mut store = make_store();
        store.apply_template(TemplateId::Professional);
        assert_eq!(
            store.resume().section_title(Section::Skills),
            "Core Competencies"
        );
    }

    #[test]
    fn test_template_state_persisted_separately_from_settings() {
        let mut store = make_store();
        store.apply_template(TemplateId::Academic);
        store.set_dialog_open(true);
        let raw = store.backend.load(TEMPLATE_KEY).expect("template state persisted");
        assert!(raw.contains("academic"));
        assert!(raw.contains("\"dialogOpen\":true"));
    }

    #[test]
    fn test_add_update_remove_experience() {
        let mut store = make_store();
        let id = store.add_experience(make_experience("Acme"));
        assert_eq!(store.resume().experience.len(), 1);
        assert_eq!(store.resume().experience[0].id, id);

        store.update_experience(
            id,
            ExperiencePatch {
                position: Some("Staff Engineer".to_string()),
                ..ExperiencePatch::default()
            },
        );
        assert_eq!(store.resume().experience[0].position, "Staff Engineer");
        assert_eq!(store.resume().experience[0].company, "Acme");

        store.remove_experience(id);
        assert!(store.resume().experience.is_empty());
    }

    #[test]
    fn test_update_experience_unknown_id_is_noop() {
        let mut store = make_store();
        store.add_experience(make_experience("Acme"));
        let before = store.resume().clone();
        store.update_experience(
            Uuid::new_v4(),
            ExperiencePatch {
                company: Some("Other".to_string()),
                ..ExperiencePatch::default()
            },
        );
        assert_eq!(store.resume(), &before);
    }

    #[test]
    fn test_reorder_experience_is_stable_for_ids() {
        let mut store = make_store();
        let a = store.add_experience(make_experience("A"));
        let b = store.add_experience(make_experience("B"));
        let c = store.add_experience(make_experience("C"));
        store.reorder_experience(&[c, a]);
        let companies: Vec<&str> = store
            .resume()
            .experience
            .iter()
            .map(|e| e.company.as_str())
            .collect();
        // Listed ids first, the unlisted entry keeps its place after.
        assert_eq!(companies, vec!["C", "A", "B"]);
        assert_eq!(store.resume().experience[0].id, c);
        assert_eq!(store.resume().experience[1].id, a);
        assert_eq!(store.resume().experience[2].id, b);
    }

    #[test]
    fn test_reorder_sections_preserves_membership() {
        let mut store = make_store();
        store.reorder_sections(&[Section::Skills, Section::Personal]);
        let mut sorted = store.resume().section_order.clone();
        sorted.sort();
        let mut all = Section::ALL.to_vec();
        all.sort();
        assert_eq!(sorted, all);
        assert_eq!(store.resume().section_order[0], Section::Skills);
        assert_eq!(store.resume().section_order[1], Section::Personal);
    }

    #[test]
    fn test_reorder_sections_drops_duplicates() {
        let mut store = make_store();
        store.reorder_sections(&[
            Section::Skills,
            Section::Skills,
            Section::Experience,
            Section::Personal,
            Section::Education,
        ]);
        assert_eq!(store.resume().section_order.len(), 4);
        assert_eq!(store.resume().section_order[0], Section::Skills);
    }

    #[test]
    fn test_mutations_persist_resume_synchronously() {
        let mut store = make_store();
        store.update_personal_info(PersonalInfoPatch {
            name: Some("Grace Hopper".to_string()),
            ..PersonalInfoPatch::default()
        });
        let raw = store.backend.load(RESUME_KEY).expect("resume persisted");
        assert!(raw.contains("Grace Hopper"));
    }

    #[test]
    fn test_personal_info_patch_keeps_unset_fields() {
        let mut store = make_store();
        store.update_personal_info(PersonalInfoPatch {
            name: Some("Grace".to_string()),
            email: Some("grace@navy.mil".to_string()),
            ..PersonalInfoPatch::default()
        });
        store.update_personal_info(PersonalInfoPatch {
            phone: Some("555-0100".to_string()),
            ..PersonalInfoPatch::default()
        });
        let info = &store.resume().personal_info;
        assert_eq!(info.name, "Grace");
        assert_eq!(info.email, "grace@navy.mil");
        assert_eq!(info.phone, "555-0100");
    }
}
