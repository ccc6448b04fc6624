//! The layout renderer.
//!
//! `render` is a pure function of resume data, the settings tree, and the
//! active template id, producing the [`LayoutTree`] both the live preview
//! and the PDF export consume. It never fails: missing optional fields
//! render nothing, unknown enum-ish leaves fall back to template defaults,
//! and required-field validation belongs to the export boundary.

use crate::models::resume::{EducationEntry, ExperienceEntry, ResumeData, Section};
use crate::render::dates::format_date;
use crate::render::style::{
    HeaderStyle, LayoutVariant, PublicationStyle, SkillStyle, StyleSheet, TypeRole,
};
use crate::render::tree::{
    FontWeight, LayoutTree, Node, SectionBlock, TextAlign, TextBlock, TextStyle,
};
use crate::schema::registry::TemplateId;
use crate::settings::value::SettingNode;

/// Lays out the whole document: header variant, then each section in
/// `section_order`, with dividers between consecutive sections except after
/// the last and never after skills.
pub fn render(resume: &ResumeData, settings: &SettingNode, template: TemplateId) -> LayoutTree {
    let variant = LayoutVariant::resolve(template, settings);
    let mut sheet = StyleSheet::resolve(settings);
    if variant.compact_spacing() {
        sheet = sheet.compacted();
    }

    let ctx = RenderContext {
        resume,
        sheet: &sheet,
        variant,
    };

    let order = &resume.section_order;
    let sections = order
        .iter()
        .enumerate()
        .map(|(index, section)| SectionBlock {
            section: *section,
            nodes: ctx.section_nodes(*section),
            divider_after: divider_after(&variant, order, index),
        })
        .collect();

    LayoutTree {
        template,
        margin: sheet.margin,
        background: variant.background(),
        sections,
    }
}

/// A divider follows a section unless it is the last one, unless it is the
/// skills section, or unless the variant disables dividers outright.
fn divider_after(variant: &LayoutVariant, order: &[Section], index: usize) -> bool {
    variant.dividers_enabled() && index < order.len().saturating_sub(1) && order[index] != Section::Skills
}

struct RenderContext<'a> {
    resume: &'a ResumeData,
    sheet: &'a StyleSheet,
    variant: LayoutVariant,
}

impl RenderContext<'_> {
    fn section_nodes(&self, section: Section) -> Vec<Node> {
        match section {
            Section::Personal => self.personal_nodes(),
            Section::Experience => self.experience_nodes(),
            Section::Education => self.education_nodes(),
            Section::Skills => self.skills_nodes(),
        }
    }

    // ── Text style helpers ──────────────────────────────────────────────────

    fn style(&self, role: &TypeRole, color: &str, weight: FontWeight) -> TextStyle {
        TextStyle {
            font_family: role.family.clone(),
            font_size: role.size,
            color: color.to_string(),
            weight,
            italic: false,
            align: self.align(),
        }
    }

    /// Body style at a size offset (the original detail lines run 1–2px
    /// below body size).
    fn detail_style(&self, offset: f64) -> TextStyle {
        let mut style = self.style(&self.sheet.body, &self.sheet.secondary, FontWeight::Normal);
        style.font_size = (self.sheet.body.size + offset).max(1.0);
        style
    }

    fn align(&self) -> TextAlign {
        match self.variant.header_style() {
            HeaderStyle::Centered => TextAlign::Center,
            _ => TextAlign::Left,
        }
    }

    fn text(&self, text: impl Into<String>, style: TextStyle, bottom: f64) -> Node {
        Node::Text(TextBlock {
            text: text.into(),
            style,
            margin_top: 0.0,
            margin_bottom: bottom,
        })
    }

    fn section_heading(&self, section: Section) -> Node {
        let mut style = self.style(
            &self.sheet.section_heading,
            &self.sheet.primary,
            FontWeight::Semibold,
        );
        // Section headings stay left-aligned in every variant; only the
        // personal header centers.
        style.align = TextAlign::Left;
        Node::Text(TextBlock {
            text: self.resume.section_title(section).to_string(),
            style,
            margin_top: self.sheet.spacing.section_heading_top,
            margin_bottom: self.sheet.spacing.section_heading_bottom,
        })
    }

    // ── Personal header (template-variant dispatch) ─────────────────────────

    /// The personal block. All variants consume the same fields; they differ
    /// in alignment, name color, and decoration.
    fn personal_nodes(&self) -> Vec<Node> {
        let info = &self.resume.personal_info;
        let mut nodes = Vec::new();

        let name_color = match self.variant.header_style() {
            HeaderStyle::Creative => &self.sheet.accent,
            _ => &self.sheet.primary,
        };
        let display_name = if info.name.is_empty() {
            "Your Name"
        } else {
            info.name.as_str()
        };
        nodes.push(self.text(
            display_name,
            self.style(&self.sheet.heading, name_color, FontWeight::Bold),
            self.sheet.spacing.header_bottom,
        ));

        let contact: Vec<&str> = [&info.email, &info.phone, &info.location]
            .into_iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();
        if !contact.is_empty() {
            nodes.push(self.text(
                contact.join(" | "),
                self.style(&self.sheet.body, &self.sheet.secondary, FontWeight::Normal),
                self.sheet.spacing.header_bottom,
            ));
        }

        let links: Vec<String> = [
            info.linkedin.as_deref().map(|l| format!("LinkedIn: {l}")),
            info.portfolio.as_deref().map(|p| format!("Portfolio: {p}")),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !links.is_empty() {
            nodes.push(self.text(
                links.join(" | "),
                self.style(&self.sheet.body, &self.sheet.secondary, FontWeight::Normal),
                self.sheet.spacing.list_bottom,
            ));
        }

        if !info.summary.is_empty() {
            nodes.push(self.text(
                info.summary.clone(),
                self.style(&self.sheet.body, &self.sheet.primary, FontWeight::Normal),
                self.sheet.spacing.list_bottom,
            ));
        }

        nodes
    }

    // ── Experience ──────────────────────────────────────────────────────────

    fn experience_nodes(&self) -> Vec<Node> {
        let mut nodes = vec![self.section_heading(Section::Experience)];
        let last = self.resume.experience.len().saturating_sub(1);
        for (index, entry) in self.resume.experience.iter().enumerate() {
            self.push_experience(&mut nodes, entry, index == last);
        }
        nodes
    }

    fn push_experience(&self, nodes: &mut Vec<Node>, entry: &ExperienceEntry, is_last: bool) {
        let mut subheading = self.style(&self.sheet.subheading, &self.sheet.primary, FontWeight::Semibold);
        subheading.align = TextAlign::Left;
        nodes.push(self.text(entry.position.clone(), subheading, 0.0));

        if !entry.company.is_empty() {
            let mut style = self.style(&self.sheet.body, &self.sheet.secondary, FontWeight::Medium);
            style.align = TextAlign::Left;
            nodes.push(self.text(entry.company.clone(), style, 0.0));
        }

        let dates = self.date_range(&entry.start_date, &entry.end_date);
        let meta: Vec<&str> = [entry.location.as_str(), dates.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if !meta.is_empty() {
            let mut style = self.detail_style(-2.0);
            style.align = TextAlign::Left;
            nodes.push(self.text(meta.join(" | "), style, self.sheet.spacing.header_bottom));
        }

        if !entry.description.is_empty() {
            let mut style = self.style(&self.sheet.body, &self.sheet.primary, FontWeight::Normal);
            style.align = TextAlign::Left;
            nodes.push(Node::Bullets {
                items: entry.description.clone(),
                style,
                item_spacing: self.sheet.spacing.description_item,
                margin_bottom: if is_last {
                    self.sheet.spacing.list_bottom
                } else {
                    self.sheet.spacing.list_item_bottom
                },
            });
        }
    }

    // ── Education ───────────────────────────────────────────────────────────

    fn education_nodes(&self) -> Vec<Node> {
        let mut nodes = vec![self.section_heading(Section::Education)];
        for entry in &self.resume.education {
            match self.variant.publication_style() {
                Some(style) => self.push_education_citation(&mut nodes, entry, style),
                None => self.push_education(&mut nodes, entry),
            }
        }
        nodes
    }

    fn push_education(&self, nodes: &mut Vec<Node>, entry: &EducationEntry) {
        let degree_line = if entry.field.is_empty() {
            entry.degree.clone()
        } else {
            format!("{} in {}", entry.degree, entry.field)
        };
        let mut subheading = self.style(&self.sheet.subheading, &self.sheet.primary, FontWeight::Semibold);
        subheading.align = TextAlign::Left;
        nodes.push(self.text(degree_line, subheading, 0.0));

        if !entry.institution.is_empty() {
            let mut style = self.style(&self.sheet.body, &self.sheet.secondary, FontWeight::Medium);
            style.align = TextAlign::Left;
            nodes.push(self.text(entry.institution.clone(), style, 0.0));
        }

        let mut detail = self.date_range(&entry.start_date, &entry.end_date);
        if let Some(gpa) = entry.gpa.as_deref().filter(|g| !g.is_empty()) {
            if !detail.is_empty() {
                detail.push_str(" | ");
            }
            detail.push_str(&format!("GPA: {gpa}"));
        }
        if !detail.is_empty() {
            let mut style = self.detail_style(-2.0);
            style.align = TextAlign::Left;
            nodes.push(self.text(detail, style, 0.0));
        }

        self.push_honors(nodes, entry);
    }

    /// Academic variant: each entry as a single citation line, ordered per
    /// the configured publication style.
    fn push_education_citation(
        &self,
        nodes: &mut Vec<Node>,
        entry: &EducationEntry,
        style: PublicationStyle,
    ) {
        let degree = if entry.field.is_empty() {
            entry.degree.clone()
        } else {
            format!("{} in {}", entry.degree, entry.field)
        };
        let dates = self.date_range(&entry.start_date, &entry.end_date);
        let citation = match style {
            PublicationStyle::Apa => format!("{}. ({}). {}.", entry.institution, dates, degree),
            PublicationStyle::Mla => format!("{}, {}, {}.", entry.institution, degree, dates),
            PublicationStyle::Chicago => format!("{}. {}. {}.", entry.institution, degree, dates),
        };
        let mut text_style = self.style(&self.sheet.body, &self.sheet.primary, FontWeight::Normal);
        text_style.align = TextAlign::Left;
        nodes.push(self.text(citation, text_style, self.sheet.spacing.list_item_bottom));

        self.push_honors(nodes, entry);
    }

    fn push_honors(&self, nodes: &mut Vec<Node>, entry: &EducationEntry) {
        if let Some(honors) = entry.honors.as_deref().filter(|h| !h.is_empty()) {
            let mut style = self.detail_style(-1.0);
            style.italic = true;
            style.align = TextAlign::Left;
            nodes.push(self.text(
                honors.to_string(),
                style,
                self.sheet.spacing.list_item_bottom,
            ));
        }
    }

    // ── Skills ──────────────────────────────────────────────────────────────

    fn skills_nodes(&self) -> Vec<Node> {
        let mut nodes = vec![self.section_heading(Section::Skills)];
        if self.resume.skills.is_empty() {
            return nodes;
        }
        let mut style = self.style(&self.sheet.body, &self.sheet.primary, FontWeight::Normal);
        style.align = TextAlign::Left;
        match self.variant.skill_style() {
            SkillStyle::Tags => nodes.push(Node::Chips {
                items: self.resume.skills.clone(),
                style,
                fill: self.sheet.accent.clone(),
                margin_bottom: self.sheet.spacing.list_bottom,
            }),
            SkillStyle::Bars => nodes.push(Node::Bars {
                items: self.resume.skills.clone(),
                style,
                track: self.sheet.secondary.clone(),
                fill: self.sheet.accent.clone(),
                margin_bottom: self.sheet.spacing.list_bottom,
            }),
            SkillStyle::List => {
                style.weight = FontWeight::Bold;
                nodes.push(self.text(
                    self.resume.skills.join(self.variant.skill_delimiter()),
                    style,
                    self.sheet.spacing.list_bottom,
                ));
            }
        }
        nodes
    }

    fn date_range(&self, start: &str, end: &str) -> String {
        let start = format_date(start);
        let end = format_date(end);
        match (start.is_empty(), end.is_empty()) {
            (true, true) => String::new(),
            (false, true) => start,
            (true, false) => end,
            (false, false) => format!("{start} - {end}"),
        }
    }
}
