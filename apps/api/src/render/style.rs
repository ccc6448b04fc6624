//! Style resolution — from the dynamic settings tree to concrete values.
//!
//! Two layers come out of the tree before rendering starts:
//!
//! - a [`StyleSheet`]: margins, the four typography roles, spacing, and
//!   colors. Hydration guarantees every declared leaf is present, but each
//!   read still falls back to the built-in default so a drifted tree can
//!   never poison a render.
//! - a [`LayoutVariant`]: the closed, template-tagged shape of the layout
//!   section. The renderer dispatches on this tag; it never probes a shared
//!   object for fields that may or may not exist.

use serde::{Deserialize, Serialize};

use crate::render::tree::Margins;
use crate::schema::registry::TemplateId;
use crate::settings::path::read;
use crate::settings::value::SettingNode;

// ────────────────────────────────────────────────────────────────────────────
// Leaf readers with fallbacks
// ────────────────────────────────────────────────────────────────────────────

fn number_at(settings: &SettingNode, path: &str, fallback: f64) -> f64 {
    read(settings, path)
        .and_then(|v| v.as_number())
        .unwrap_or(fallback)
}

fn text_at(settings: &SettingNode, path: &str, fallback: &str) -> String {
    read(settings, path)
        .and_then(|v| v.as_text())
        .unwrap_or(fallback)
        .to_string()
}

fn flag_at(settings: &SettingNode, path: &str, fallback: bool) -> bool {
    read(settings, path)
        .and_then(|v| v.as_flag())
        .unwrap_or(fallback)
}

// ────────────────────────────────────────────────────────────────────────────
// Stylesheet
// ────────────────────────────────────────────────────────────────────────────

/// One typography role: family + size.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRole {
    pub family: String,
    pub size: f64,
}

/// Spacing leaves, already scaled for compact mode when the variant asks
/// for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Spacing {
    pub section_heading_top: f64,
    pub section_heading_bottom: f64,
    pub list_item_bottom: f64,
    pub list_bottom: f64,
    pub description_item: f64,
    pub header_bottom: f64,
}

impl Spacing {
    fn scaled(&self, factor: f64) -> Spacing {
        Spacing {
            section_heading_top: self.section_heading_top * factor,
            section_heading_bottom: self.section_heading_bottom * factor,
            list_item_bottom: self.list_item_bottom * factor,
            list_bottom: self.list_bottom * factor,
            description_item: self.description_item * factor,
            header_bottom: self.header_bottom * factor,
        }
    }
}

/// Everything the renderer needs that is a plain value.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    pub margin: Margins,
    pub heading: TypeRole,
    pub body: TypeRole,
    pub subheading: TypeRole,
    pub section_heading: TypeRole,
    pub spacing: Spacing,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

const FALLBACK_FAMILY: &str = "Inter, sans-serif";

impl StyleSheet {
    /// Resolves the sheet from a settings tree. Fallbacks are the minimal
    /// template's values.
    pub fn resolve(settings: &SettingNode) -> StyleSheet {
        let role = |name: &str, size: f64| TypeRole {
            family: text_at(
                settings,
                &format!("typography.{name}.fontFamily"),
                FALLBACK_FAMILY,
            ),
            size: number_at(settings, &format!("typography.{name}.fontSize"), size),
        };
        StyleSheet {
            margin: Margins {
                top: number_at(settings, "margin.top", 48.0),
                right: number_at(settings, "margin.right", 48.0),
                bottom: number_at(settings, "margin.bottom", 48.0),
                left: number_at(settings, "margin.left", 48.0),
            },
            heading: role("heading", 24.0),
            body: role("body", 14.0),
            subheading: role("subheading", 18.0),
            section_heading: role("sectionHeading", 14.0),
            spacing: Spacing {
                section_heading_top: number_at(settings, "spacing.sectionHeading.top", 24.0),
                section_heading_bottom: number_at(settings, "spacing.sectionHeading.bottom", 12.0),
                list_item_bottom: number_at(settings, "spacing.listItem.bottom", 12.0),
                list_bottom: number_at(settings, "spacing.list.bottom", 20.0),
                description_item: number_at(settings, "spacing.descriptionList.spacing", 8.0),
                header_bottom: number_at(settings, "spacing.header.bottom", 16.0),
            },
            primary: text_at(settings, "colors.primary", "#000000"),
            secondary: text_at(settings, "colors.secondary", "#333333"),
            accent: text_at(settings, "colors.accent", "#3b82f6"),
        }
    }

    /// The sheet with spacing compacted (75%), for variants that ask.
    pub fn compacted(mut self) -> StyleSheet {
        self.spacing = self.spacing.scaled(0.75);
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout variants
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderStyle {
    Minimal,
    Centered,
    LeftAligned,
    Creative,
}

impl HeaderStyle {
    fn parse(value: &str, fallback: HeaderStyle) -> HeaderStyle {
        match value {
            "minimal" => HeaderStyle::Minimal,
            "centered" => HeaderStyle::Centered,
            "left-aligned" => HeaderStyle::LeftAligned,
            "creative" => HeaderStyle::Creative,
            _ => fallback,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillStyle {
    List,
    Tags,
    Bars,
}

impl SkillStyle {
    fn parse(value: &str) -> SkillStyle {
        match value {
            "tags" => SkillStyle::Tags,
            "bars" => SkillStyle::Bars,
            // "list" and anything unrecognized render as the joined list.
            _ => SkillStyle::List,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundPattern {
    None,
    Dots,
    Lines,
}

impl BackgroundPattern {
    fn parse(value: &str) -> BackgroundPattern {
        match value {
            "dots" => BackgroundPattern::Dots,
            "lines" => BackgroundPattern::Lines,
            _ => BackgroundPattern::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStyle {
    Apa,
    Mla,
    Chicago,
}

impl PublicationStyle {
    fn parse(value: &str) -> PublicationStyle {
        match value {
            "mla" => PublicationStyle::Mla,
            "chicago" => PublicationStyle::Chicago,
            _ => PublicationStyle::Apa,
        }
    }
}

/// The layout section of each template's configuration, as a closed tagged
/// variant. Each template carries exactly the fields its schema declares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutVariant {
    Professional {
        header_style: HeaderStyle,
        section_dividers: bool,
    },
    Creative {
        header_style: HeaderStyle,
        background: BackgroundPattern,
        skill_style: SkillStyle,
    },
    Minimal {
        header_style: HeaderStyle,
        compact_spacing: bool,
    },
    Academic {
        header_style: HeaderStyle,
        compact_spacing: bool,
        publication_style: PublicationStyle,
    },
}

impl LayoutVariant {
    /// Reads the variant for `template` out of the settings tree. Missing or
    /// mistyped leaves take the template's declared defaults.
    pub fn resolve(template: TemplateId, settings: &SettingNode) -> LayoutVariant {
        let header = |fallback| {
            HeaderStyle::parse(&text_at(settings, "layout.headerStyle", ""), fallback)
        };
        match template {
            TemplateId::Professional => LayoutVariant::Professional {
                header_style: header(HeaderStyle::Centered),
                section_dividers: flag_at(settings, "layout.sectionDividers", true),
            },
            TemplateId::Creative => LayoutVariant::Creative {
                header_style: header(HeaderStyle::Creative),
                background: BackgroundPattern::parse(&text_at(
                    settings,
                    "layout.backgroundPattern",
                    "none",
                )),
                skill_style: SkillStyle::parse(&text_at(settings, "layout.skillStyle", "list")),
            },
            TemplateId::Minimal => LayoutVariant::Minimal {
                header_style: header(HeaderStyle::Minimal),
                compact_spacing: flag_at(settings, "layout.compactSpacing", false),
            },
            TemplateId::Academic => LayoutVariant::Academic {
                header_style: header(HeaderStyle::Minimal),
                compact_spacing: flag_at(settings, "layout.compactSpacing", false),
                publication_style: PublicationStyle::parse(&text_at(
                    settings,
                    "layout.publicationStyle",
                    "apa",
                )),
            },
        }
    }

    pub fn header_style(&self) -> HeaderStyle {
        match *self {
            LayoutVariant::Professional { header_style, .. }
            | LayoutVariant::Creative { header_style, .. }
            | LayoutVariant::Minimal { header_style, .. }
            | LayoutVariant::Academic { header_style, .. } => header_style,
        }
    }

    /// Whether inter-section dividers are drawn at all.
    pub fn dividers_enabled(&self) -> bool {
        match *self {
            LayoutVariant::Professional { section_dividers, .. } => section_dividers,
            _ => true,
        }
    }

    pub fn skill_style(&self) -> SkillStyle {
        match *self {
            LayoutVariant::Creative { skill_style, .. } => skill_style,
            _ => SkillStyle::List,
        }
    }

    pub fn background(&self) -> BackgroundPattern {
        match *self {
            LayoutVariant::Creative { background, .. } => background,
            _ => BackgroundPattern::None,
        }
    }

    pub fn compact_spacing(&self) -> bool {
        match *self {
            LayoutVariant::Minimal { compact_spacing, .. }
            | LayoutVariant::Academic { compact_spacing, .. } => compact_spacing,
            _ => false,
        }
    }

    pub fn publication_style(&self) -> Option<PublicationStyle> {
        match *self {
            LayoutVariant::Academic {
                publication_style, ..
            } => Some(publication_style),
            _ => None,
        }
    }

    /// The delimiter used when skills render as one joined string.
    pub fn skill_delimiter(&self) -> &'static str {
        match self {
            LayoutVariant::Creative { .. } => " • ",
            _ => ", ",
        }
    }
}
