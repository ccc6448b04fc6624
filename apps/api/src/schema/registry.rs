//! Template registry — the declarative schema that drives both rendering and
//! the settings UI.
//!
//! Each template variant declares a tree of field descriptors. The base
//! sections (margin, typography, spacing) are shared structurally; each
//! variant extends them with its own colors and layout sections. Alongside
//! the schema every template carries a *concrete* default settings tree
//! (actual values, distinct from the descriptors) and its section-title
//! overrides.
#![allow(dead_code)]

use std::sync::LazyLock;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::models::resume::Section;
use crate::schema::options;
use crate::settings::value::SettingNode;

// ────────────────────────────────────────────────────────────────────────────
// Template identifiers
// ────────────────────────────────────────────────────────────────────────────

/// The closed set of template variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    Professional,
    Creative,
    Minimal,
    Academic,
}

impl TemplateId {
    pub const ALL: [TemplateId; 4] = [
        TemplateId::Professional,
        TemplateId::Creative,
        TemplateId::Minimal,
        TemplateId::Academic,
    ];

    /// The variant every fallback lands on.
    pub const DEFAULT: TemplateId = TemplateId::Minimal;

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Professional => "professional",
            TemplateId::Creative => "creative",
            TemplateId::Minimal => "minimal",
            TemplateId::Academic => "academic",
        }
    }

    /// Parses a template identifier. Unknown ids return `None`; callers
    /// treat that as "keep the current selection".
    pub fn parse(value: &str) -> Option<TemplateId> {
        match value {
            "professional" => Some(TemplateId::Professional),
            "creative" => Some(TemplateId::Creative),
            "minimal" => Some(TemplateId::Minimal),
            "academic" => Some(TemplateId::Academic),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Field descriptors and schema nodes
// ────────────────────────────────────────────────────────────────────────────

/// A schema leaf: the control type and constraints for one editable field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldConfig {
    Slider { min: f64, max: f64, step: f64 },
    /// `options` names a shared option set (see [`options::resolve`]).
    Select { options: &'static str },
    Color,
    Checkbox,
}

/// One node of a template's schema tree: a field descriptor leaf or a named
/// grouping — never both. Groupings keep declaration order, which is also
/// the order the settings UI presents them in.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Field(FieldConfig),
    Group(Vec<(&'static str, SchemaNode)>),
}

impl SchemaNode {
    pub fn as_group(&self) -> Option<&[(&'static str, SchemaNode)]> {
        match self {
            SchemaNode::Group(entries) => Some(entries),
            SchemaNode::Field(_) => None,
        }
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SchemaNode::Field(field) => field.serialize(serializer),
            SchemaNode::Group(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (name, node) in entries {
                    map.serialize_entry(name, node)?;
                }
                map.end()
            }
        }
    }
}

/// A template: identifier, catalog metadata, and its schema tree.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateDefinition {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub settings: SchemaNode,
}

// ────────────────────────────────────────────────────────────────────────────
// Schema construction (base + per-template extension)
// ────────────────────────────────────────────────────────────────────────────

fn slider(min: f64, max: f64, step: f64) -> SchemaNode {
    SchemaNode::Field(FieldConfig::Slider { min, max, step })
}

fn select(options: &'static str) -> SchemaNode {
    SchemaNode::Field(FieldConfig::Select { options })
}

fn color() -> SchemaNode {
    SchemaNode::Field(FieldConfig::Color)
}

fn checkbox() -> SchemaNode {
    SchemaNode::Field(FieldConfig::Checkbox)
}

fn font_pair() -> SchemaNode {
    SchemaNode::Group(vec![
        ("fontFamily", select("fontFamilies")),
        ("fontSize", select("fontSizes")),
    ])
}

/// The sections every template shares.
fn base_sections() -> Vec<(&'static str, SchemaNode)> {
    vec![
        (
            "margin",
            SchemaNode::Group(vec![
                ("top", slider(24.0, 144.0, 4.0)),
                ("bottom", slider(24.0, 144.0, 4.0)),
                ("left", slider(24.0, 144.0, 4.0)),
                ("right", slider(24.0, 144.0, 4.0)),
            ]),
        ),
        (
            "typography",
            SchemaNode::Group(vec![
                ("heading", font_pair()),
                ("body", font_pair()),
                ("subheading", font_pair()),
                ("sectionHeading", font_pair()),
            ]),
        ),
        (
            "spacing",
            SchemaNode::Group(vec![
                (
                    "sectionHeading",
                    SchemaNode::Group(vec![
                        ("top", slider(0.0, 48.0, 4.0)),
                        ("bottom", slider(0.0, 48.0, 4.0)),
                    ]),
                ),
                (
                    "listItem",
                    SchemaNode::Group(vec![("bottom", slider(0.0, 24.0, 2.0))]),
                ),
                (
                    "list",
                    SchemaNode::Group(vec![("bottom", slider(0.0, 32.0, 2.0))]),
                ),
                (
                    "descriptionList",
                    SchemaNode::Group(vec![("spacing", slider(0.0, 16.0, 2.0))]),
                ),
                (
                    "header",
                    SchemaNode::Group(vec![("bottom", slider(0.0, 24.0, 2.0))]),
                ),
            ]),
        ),
    ]
}

/// Extends the base sections with a template's colors and layout groups.
fn extend_base(
    colors: Vec<(&'static str, SchemaNode)>,
    layout: Vec<(&'static str, SchemaNode)>,
) -> SchemaNode {
    let mut sections = base_sections();
    sections.push(("colors", SchemaNode::Group(colors)));
    sections.push(("layout", SchemaNode::Group(layout)));
    SchemaNode::Group(sections)
}

static DEFINITIONS: LazyLock<Vec<TemplateDefinition>> = LazyLock::new(|| {
    vec![
        TemplateDefinition {
            id: TemplateId::Professional,
            name: "Executive",
            description: "Bold and professional for senior roles",
            category: "professional",
            settings: extend_base(
                vec![
                    ("primary", color()),
                    ("secondary", color()),
                    ("accent", color()),
                ],
                vec![
                    ("headerStyle", select("headerStyles")),
                    ("sectionDividers", checkbox()),
                ],
            ),
        },
        TemplateDefinition {
            id: TemplateId::Creative,
            name: "Portfolio",
            description: "Modern and creative for design roles",
            category: "creative",
            settings: extend_base(
                vec![
                    ("primary", color()),
                    ("secondary", color()),
                    ("accent", color()),
                ],
                vec![
                    ("headerStyle", select("headerStyles")),
                    ("backgroundPattern", select("backgroundPatterns")),
                    ("skillStyle", select("skillStyles")),
                ],
            ),
        },
        TemplateDefinition {
            id: TemplateId::Minimal,
            name: "Clean",
            description: "Simple and clean for any industry",
            category: "minimal",
            settings: extend_base(
                vec![("primary", color()), ("secondary", color())],
                vec![
                    ("headerStyle", select("headerStyles")),
                    ("compactSpacing", checkbox()),
                ],
            ),
        },
        TemplateDefinition {
            id: TemplateId::Academic,
            name: "Scholar",
            description: "Structured and scholarly for research roles",
            category: "academic",
            settings: extend_base(
                vec![("primary", color()), ("secondary", color())],
                vec![
                    ("headerStyle", select("headerStyles")),
                    ("compactSpacing", checkbox()),
                    ("publicationStyle", select("publicationStyles")),
                ],
            ),
        },
    ]
});

/// All template definitions, catalog order.
pub fn catalog() -> &'static [TemplateDefinition] {
    &DEFINITIONS
}

/// The definition for a template id.
pub fn definition(id: TemplateId) -> &'static TemplateDefinition {
    let index = match id {
        TemplateId::Professional => 0,
        TemplateId::Creative => 1,
        TemplateId::Minimal => 2,
        TemplateId::Academic => 3,
    };
    &DEFINITIONS[index]
}

/// Resolves a raw identifier to a definition, falling back to the default
/// (minimal) template for unknown ids. Never fails.
pub fn definition_or_default(id: &str) -> &'static TemplateDefinition {
    definition(TemplateId::parse(id).unwrap_or(TemplateId::DEFAULT))
}

// ────────────────────────────────────────────────────────────────────────────
// Concrete defaults and section titles
// ────────────────────────────────────────────────────────────────────────────

fn margin_defaults() -> SettingNode {
    SettingNode::group([
        ("top", SettingNode::leaf(48.0)),
        ("bottom", SettingNode::leaf(48.0)),
        ("left", SettingNode::leaf(48.0)),
        ("right", SettingNode::leaf(48.0)),
    ])
}

fn typography_defaults(
    heading: (&'static str, f64),
    body: (&'static str, f64),
    subheading: (&'static str, f64),
    section_heading: (&'static str, f64),
) -> SettingNode {
    let role = |(family, size): (&'static str, f64)| {
        SettingNode::group([
            ("fontFamily", SettingNode::leaf(family)),
            ("fontSize", SettingNode::leaf(size)),
        ])
    };
    SettingNode::group([
        ("heading", role(heading)),
        ("body", role(body)),
        ("subheading", role(subheading)),
        ("sectionHeading", role(section_heading)),
    ])
}

fn spacing_defaults(
    section_heading: (f64, f64),
    list_item: f64,
    list: f64,
    description_list: f64,
    header: f64,
) -> SettingNode {
    SettingNode::group([
        (
            "sectionHeading",
            SettingNode::group([
                ("top", SettingNode::leaf(section_heading.0)),
                ("bottom", SettingNode::leaf(section_heading.1)),
            ]),
        ),
        (
            "listItem",
            SettingNode::group([("bottom", SettingNode::leaf(list_item))]),
        ),
        (
            "list",
            SettingNode::group([("bottom", SettingNode::leaf(list))]),
        ),
        (
            "descriptionList",
            SettingNode::group([("spacing", SettingNode::leaf(description_list))]),
        ),
        (
            "header",
            SettingNode::group([("bottom", SettingNode::leaf(header))]),
        ),
    ])
}

/// The concrete default configuration applied when a template is selected.
/// A fresh tree every call — callers own it outright.
pub fn default_settings(id: TemplateId) -> SettingNode {
    match id {
        TemplateId::Professional => SettingNode::group([
            ("margin", margin_defaults()),
            (
                "typography",
                typography_defaults(
                    ("Georgia, serif", 28.0),
                    ("Arial, sans-serif", 12.0),
                    ("Georgia, serif", 16.0),
                    ("Georgia, serif", 14.0),
                ),
            ),
            ("spacing", spacing_defaults((24.0, 12.0), 12.0, 20.0, 8.0, 16.0)),
            (
                "colors",
                SettingNode::group([
                    ("primary", SettingNode::leaf("#1f2937")),
                    ("secondary", SettingNode::leaf("#6b7280")),
                    ("accent", SettingNode::leaf("#3b82f6")),
                ]),
            ),
            (
                "layout",
                SettingNode::group([
                    ("headerStyle", SettingNode::leaf("centered")),
                    ("sectionDividers", SettingNode::leaf(true)),
                ]),
            ),
        ]),
        TemplateId::Creative => SettingNode::group([
            ("margin", margin_defaults()),
            (
                "typography",
                typography_defaults(
                    ("Helvetica, sans-serif", 32.0),
                    ("Open Sans, sans-serif", 14.0),
                    ("Helvetica, sans-serif", 18.0),
                    ("Helvetica, sans-serif", 16.0),
                ),
            ),
            ("spacing", spacing_defaults((32.0, 16.0), 16.0, 24.0, 12.0, 20.0)),
            (
                "colors",
                SettingNode::group([
                    ("primary", SettingNode::leaf("#000000")),
                    ("secondary", SettingNode::leaf("#666666")),
                    ("accent", SettingNode::leaf("#ff6b6b")),
                ]),
            ),
            (
                "layout",
                SettingNode::group([
                    ("headerStyle", SettingNode::leaf("creative")),
                    ("backgroundPattern", SettingNode::leaf("dots")),
                    ("skillStyle", SettingNode::leaf("tags")),
                ]),
            ),
        ]),
        TemplateId::Minimal => SettingNode::group([
            ("margin", margin_defaults()),
            (
                "typography",
                typography_defaults(
                    ("Inter, sans-serif", 24.0),
                    ("Inter, sans-serif", 14.0),
                    ("Inter, sans-serif", 18.0),
                    ("Inter, sans-serif", 14.0),
                ),
            ),
            ("spacing", spacing_defaults((24.0, 12.0), 12.0, 20.0, 8.0, 16.0)),
            (
                "colors",
                SettingNode::group([
                    ("primary", SettingNode::leaf("#000000")),
                    ("secondary", SettingNode::leaf("#333333")),
                ]),
            ),
            (
                "layout",
                SettingNode::group([
                    ("headerStyle", SettingNode::leaf("minimal")),
                    ("compactSpacing", SettingNode::leaf(false)),
                ]),
            ),
        ]),
        TemplateId::Academic => SettingNode::group([
            ("margin", margin_defaults()),
            (
                "typography",
                typography_defaults(
                    ("Georgia, serif", 24.0),
                    ("Times New Roman, serif", 12.0),
                    ("Georgia, serif", 16.0),
                    ("Georgia, serif", 14.0),
                ),
            ),
            ("spacing", spacing_defaults((24.0, 12.0), 12.0, 20.0, 8.0, 16.0)),
            (
                "colors",
                SettingNode::group([
                    ("primary", SettingNode::leaf("#000000")),
                    ("secondary", SettingNode::leaf("#333333")),
                ]),
            ),
            (
                "layout",
                SettingNode::group([
                    ("headerStyle", SettingNode::leaf("minimal")),
                    ("compactSpacing", SettingNode::leaf(false)),
                    ("publicationStyle", SettingNode::leaf("apa")),
                ]),
            ),
        ]),
    }
}

/// Section display titles a template applies on selection.
pub fn section_names(id: TemplateId) -> &'static [(Section, &'static str)] {
    match id {
        TemplateId::Professional => &[
            (Section::Personal, "Professional Summary"),
            (Section::Experience, "Professional Experience"),
            (Section::Education, "Education"),
            (Section::Skills, "Core Competencies"),
        ],
        TemplateId::Creative => &[
            (Section::Personal, "About"),
            (Section::Experience, "Work Experience"),
            (Section::Education, "Education"),
            (Section::Skills, "Skills & Tools"),
        ],
        TemplateId::Minimal => &[
            (Section::Personal, "Personal Info"),
            (Section::Experience, "Experience"),
            (Section::Education, "Education"),
            (Section::Skills, "Skills"),
        ],
        TemplateId::Academic => &[
            (Section::Personal, "Profile"),
            (Section::Experience, "Academic Experience"),
            (Section::Education, "Education"),
            (Section::Skills, "Research Interests"),
        ],
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Schema validation
// ────────────────────────────────────────────────────────────────────────────

/// Checks the structural rules: groupings are non-empty, and every select
/// leaf references a resolvable option set.
pub fn validate_schema(node: &SchemaNode) -> Result<(), String> {
    validate_at(node, "")
}

fn validate_at(node: &SchemaNode, path: &str) -> Result<(), String> {
    match node {
        SchemaNode::Field(FieldConfig::Select { options: set }) => {
            if options::resolve(set).is_empty() {
                return Err(format!("select at '{path}' references unknown option set '{set}'"));
            }
            Ok(())
        }
        SchemaNode::Field(_) => Ok(()),
        SchemaNode::Group(entries) => {
            if entries.is_empty() {
                return Err(format!("empty grouping at '{path}'"));
            }
            for (name, child) in entries {
                let child_path = if path.is_empty() {
                    (*name).to_string()
                } else {
                    format!("{path}.{name}")
                };
                validate_at(child, &child_path)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::path::read;

    #[test]
    fn test_parse_known_and_unknown_ids() {
        assert_eq!(TemplateId::parse("creative"), Some(TemplateId::Creative));
        assert_eq!(TemplateId::parse("brutalist"), None);
        assert_eq!(TemplateId::parse(""), None);
    }

    #[test]
    fn test_definition_or_default_falls_back_to_minimal() {
        let def = definition_or_default("no-such-template");
        assert_eq!(def.id, TemplateId::Minimal);
        let def = definition_or_default("academic");
        assert_eq!(def.id, TemplateId::Academic);
    }

    #[test]
    fn test_every_schema_validates() {
        for def in catalog() {
            validate_schema(&def.settings)
                .unwrap_or_else(|e| panic!("{} schema invalid: {e}", def.id.as_str()));
        }
    }

    #[test]
    fn test_base_sections_shared_across_templates() {
        for def in catalog() {
            let top: Vec<&str> = def
                .settings
                .as_group()
                .unwrap()
                .iter()
                .map(|(name, _)| *name)
                .collect();
            assert_eq!(
                &top[..3],
                &["margin", "typography", "spacing"],
                "{} must extend the base sections",
                def.id.as_str()
            );
            assert!(top.contains(&"colors"));
            assert!(top.contains(&"layout"));
        }
    }

    #[test]
    fn test_schema_serializes_like_declared_shape() {
        let def = definition(TemplateId::Professional);
        let json = serde_json::to_value(&def.settings).unwrap();
        assert_eq!(json["margin"]["top"]["type"], "slider");
        assert_eq!(json["margin"]["top"]["min"], 24.0);
        assert_eq!(json["typography"]["body"]["fontFamily"]["options"], "fontFamilies");
        assert_eq!(json["layout"]["sectionDividers"]["type"], "checkbox");
    }

    #[test]
    fn test_defaults_cover_every_schema_leaf() {
        // The hydration invariant starts here: a template's own defaults
        // must resolve every leaf path its schema declares.
        fn walk(node: &SchemaNode, prefix: &str, paths: &mut Vec<String>) {
            match node {
                SchemaNode::Field(_) => paths.push(prefix.to_string()),
                SchemaNode::Group(entries) => {
                    for (name, child) in entries {
                        let path = if prefix.is_empty() {
                            (*name).to_string()
                        } else {
                            format!("{prefix}.{name}")
                        };
                        walk(child, &path, paths);
                    }
                }
            }
        }
        for def in catalog() {
            let defaults = default_settings(def.id);
            let mut paths = Vec::new();
            walk(&def.settings, "", &mut paths);
            assert!(!paths.is_empty());
            for path in paths {
                assert!(
                    read(&defaults, &path).is_some(),
                    "{} defaults missing '{path}'",
                    def.id.as_str()
                );
            }
        }
    }

    #[test]
    fn test_professional_defaults_match_declared_values() {
        let defaults = default_settings(TemplateId::Professional);
        assert_eq!(
            read(&defaults, "typography.heading.fontSize").and_then(|v| v.as_number()),
            Some(28.0)
        );
        assert_eq!(
            read(&defaults, "colors.accent").and_then(|v| v.as_text()),
            Some("#3b82f6")
        );
        assert_eq!(
            read(&defaults, "layout.sectionDividers").and_then(|v| v.as_flag()),
            Some(true)
        );
    }

    #[test]
    fn test_section_names_cover_all_sections() {
        for id in TemplateId::ALL {
            let names = section_names(id);
            assert_eq!(names.len(), 4, "{} section names", id.as_str());
        }
    }
}
