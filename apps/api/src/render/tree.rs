//! The laid-out document representation.
//!
//! A [`LayoutTree`] is the renderer's entire output and the export
//! pipeline's entire input: a margin box, an optional background pattern,
//! and styled blocks per section in render order. It is plain data —
//! serializable, comparable, and free of behavior — so the export side can
//! materialize it into a printable document however it likes.
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::models::resume::Section;
use crate::render::style::BackgroundPattern;
use crate::schema::registry::TemplateId;

/// Outer page padding, in px.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Medium,
    Semibold,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
}

/// Resolved text styling for one block. Every field is concrete by the time
/// it lands here — fallbacks are the renderer's job, not the consumer's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f64,
    pub color: String,
    pub weight: FontWeight,
    pub italic: bool,
    pub align: TextAlign,
}

/// One styled run of text with its vertical spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub text: String,
    pub style: TextStyle,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

/// A node inside a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Node {
    Text(TextBlock),
    /// Disc-bulleted list (experience description bullets).
    Bullets {
        items: Vec<String>,
        style: TextStyle,
        item_spacing: f64,
        margin_bottom: f64,
    },
    /// Discrete colored chips, one per skill.
    Chips {
        items: Vec<String>,
        style: TextStyle,
        fill: String,
        margin_bottom: f64,
    },
    /// Labeled progress bars, one per skill.
    Bars {
        items: Vec<String>,
        style: TextStyle,
        track: String,
        fill: String,
        margin_bottom: f64,
    },
}

/// One rendered section plus whether a divider follows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionBlock {
    pub section: Section,
    pub nodes: Vec<Node>,
    pub divider_after: bool,
}

/// The full laid-out document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutTree {
    pub template: TemplateId,
    pub margin: Margins,
    pub background: BackgroundPattern,
    pub sections: Vec<SectionBlock>,
}

impl LayoutTree {
    /// Sections that actually rendered content, in order.
    pub fn rendered_sections(&self) -> impl Iterator<Item = Section> + '_ {
        self.sections.iter().map(|block| block.section)
    }
}
