//! Shared option sets for `select` fields.
//!
//! Schema leaves reference these by name ("fontFamilies"). The table is
//! fixed and shared across all templates; an unresolvable name yields an
//! empty list so the settings UI simply renders no selectable option.

use serde::Serialize;

use crate::settings::value::SettingValue;

/// A selectable option value — either a string or a number, matching the
/// scalar that gets written into the settings tree when chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Number(f64),
    Text(&'static str),
}

impl From<OptionValue> for SettingValue {
    fn from(value: OptionValue) -> Self {
        match value {
            OptionValue::Number(n) => SettingValue::Number(n),
            OptionValue::Text(s) => SettingValue::Text(s.to_string()),
        }
    }
}

/// One `{value, label}` pair offered by a select control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptionEntry {
    pub value: OptionValue,
    pub label: &'static str,
}

const fn text(value: &'static str, label: &'static str) -> OptionEntry {
    OptionEntry {
        value: OptionValue::Text(value),
        label,
    }
}

const fn number(value: f64, label: &'static str) -> OptionEntry {
    OptionEntry {
        value: OptionValue::Number(value),
        label,
    }
}

static FONT_FAMILIES: [OptionEntry; 8] = [
    text("Inter, sans-serif", "Inter"),
    text("Arial, sans-serif", "Arial"),
    text("Helvetica, sans-serif", "Helvetica"),
    text("Times New Roman, serif", "Times New Roman"),
    text("Georgia, serif", "Georgia"),
    text("Roboto, sans-serif", "Roboto"),
    text("Open Sans, sans-serif", "Open Sans"),
    text("Lato, sans-serif", "Lato"),
];

static FONT_SIZES: [OptionEntry; 9] = [
    number(10.0, "10px"),
    number(12.0, "12px"),
    number(14.0, "14px"),
    number(16.0, "16px"),
    number(18.0, "18px"),
    number(20.0, "20px"),
    number(24.0, "24px"),
    number(28.0, "28px"),
    number(32.0, "32px"),
];

static HEADER_STYLES: [OptionEntry; 4] = [
    text("minimal", "Minimal"),
    text("centered", "Centered"),
    text("left-aligned", "Left Aligned"),
    text("creative", "Creative"),
];

static SKILL_STYLES: [OptionEntry; 3] = [
    text("list", "List"),
    text("tags", "Tags"),
    text("bars", "Progress Bars"),
];

static BACKGROUND_PATTERNS: [OptionEntry; 3] = [
    text("none", "None"),
    text("dots", "Dots"),
    text("lines", "Lines"),
];

static PUBLICATION_STYLES: [OptionEntry; 3] = [
    text("apa", "APA"),
    text("mla", "MLA"),
    text("chicago", "Chicago"),
];

/// Resolves an option-set name to its entries. Unknown names resolve to an
/// empty slice rather than an error.
pub fn resolve(name: &str) -> &'static [OptionEntry] {
    match name {
        "fontFamilies" => &FONT_FAMILIES,
        "fontSizes" => &FONT_SIZES,
        "headerStyles" => &HEADER_STYLES,
        "skillStyles" => &SKILL_STYLES,
        "backgroundPatterns" => &BACKGROUND_PATTERNS,
        "publicationStyles" => &PUBLICATION_STYLES,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sets_resolve() {
        assert_eq!(resolve("fontFamilies").len(), 8);
        assert_eq!(resolve("fontSizes").len(), 9);
        assert_eq!(resolve("headerStyles").len(), 4);
        assert_eq!(resolve("skillStyles").len(), 3);
        assert_eq!(resolve("backgroundPatterns").len(), 3);
        assert_eq!(resolve("publicationStyles").len(), 3);
    }

    #[test]
    fn test_unknown_set_resolves_empty() {
        assert!(resolve("borderStyles").is_empty());
        assert!(resolve("").is_empty());
    }

    #[test]
    fn test_option_entry_serializes_value_label_pair() {
        let entry = resolve("headerStyles")[1];
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"value":"centered","label":"Centered"}"#);
    }

    #[test]
    fn test_numeric_option_converts_to_setting_value() {
        let entry = resolve("fontSizes")[0];
        assert_eq!(SettingValue::from(entry.value), SettingValue::Number(10.0));
    }
}
