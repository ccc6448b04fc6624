//! Settings UI generation — turns a template's schema tree into bound,
//! renderable control descriptors.
//!
//! The walk flattens every grouping into `(dotted path, field)` pairs,
//! grouped under the top-level section they came from (margin, typography,
//! spacing, colors, layout). Each pair becomes one control descriptor
//! carrying its current value, read through the path accessor. A path whose
//! current value is undefined — schema/config drift — is skipped rather than
//! emitted broken. Widget styling is the frontend's business; this module
//! only decides *what* controls exist and what they are bound to.

use serde::Serialize;

use crate::schema::options::{self, OptionEntry};
use crate::schema::registry::{FieldConfig, SchemaNode};
use crate::settings::path;
use crate::settings::value::{SettingNode, SettingValue};

/// One editable control, bound to a settings path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Control {
    /// Slider with a numeric mirror field.
    Slider {
        min: f64,
        max: f64,
        step: f64,
        value: f64,
    },
    /// Dropdown; `options` already resolved from the shared table (empty for
    /// an unresolvable set — the control renders with nothing to pick).
    Select {
        options: &'static [OptionEntry],
        value: SettingValue,
    },
    /// Color swatch paired with a hex text input.
    Color { value: String },
    /// Boolean toggle.
    Checkbox { value: bool },
}

/// A control plus the path its edits write to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlBinding {
    pub path: String,
    pub label: String,
    pub control: Control,
}

/// All controls under one top-level schema section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlGroup {
    pub section: String,
    pub controls: Vec<ControlBinding>,
}

/// Walks `schema` and emits one control group per top-level section, in
/// schema order, binding each field to its current value in `settings`.
pub fn control_groups(schema: &SchemaNode, settings: &SettingNode) -> Vec<ControlGroup> {
    let Some(sections) = schema.as_group() else {
        return Vec::new();
    };
    sections
        .iter()
        .map(|(section, node)| {
            let mut controls = Vec::new();
            collect(node, section, settings, &mut controls);
            ControlGroup {
                section: (*section).to_string(),
                controls,
            }
        })
        .collect()
}

fn collect(
    node: &SchemaNode,
    prefix: &str,
    settings: &SettingNode,
    out: &mut Vec<ControlBinding>,
) {
    match node {
        SchemaNode::Field(field) => {
            if let Some(control) = bind(*field, prefix, settings) {
                out.push(ControlBinding {
                    path: prefix.to_string(),
                    label: label_for(prefix),
                    control,
                });
            }
        }
        SchemaNode::Group(entries) => {
            for (name, child) in entries {
                collect(child, &format!("{prefix}.{name}"), settings, out);
            }
        }
    }
}

/// Binds a field descriptor to the current value at `path`. Returns `None`
/// when the value is undefined or has a type the control cannot represent.
fn bind(field: FieldConfig, field_path: &str, settings: &SettingNode) -> Option<Control> {
    let value = path::read(settings, field_path)?;
    match field {
        FieldConfig::Slider { min, max, step } => Some(Control::Slider {
            min,
            max,
            step,
            value: value.as_number()?,
        }),
        FieldConfig::Select { options: set } => Some(Control::Select {
            options: options::resolve(set),
            value: value.clone(),
        }),
        FieldConfig::Color => Some(Control::Color {
            value: value.as_text()?.to_string(),
        }),
        FieldConfig::Checkbox => Some(Control::Checkbox {
            value: value.as_flag()?,
        }),
    }
}

/// Human label from the last path segment: "sectionHeading" → "Section
/// Heading", "top" → "Top".
fn label_for(field_path: &str) -> String {
    let segment = field_path.rsplit('.').next().unwrap_or(field_path);
    let mut label = String::with_capacity(segment.len() + 4);
    for (i, c) in segment.chars().enumerate() {
        if i == 0 {
            label.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            label.push(' ');
            label.push(c);
        } else {
            label.push(c);
        }
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::registry::{default_settings, definition, TemplateId};
    use crate::settings::path::write;

    #[test]
    fn test_groups_follow_schema_order() {
        let def = definition(TemplateId::Minimal);
        let groups = control_groups(&def.settings, &default_settings(TemplateId::Minimal));
        let names: Vec<&str> = groups.iter().map(|g| g.section.as_str()).collect();
        assert_eq!(names, vec!["margin", "typography", "spacing", "colors", "layout"]);
    }

    #[test]
    fn test_every_declared_leaf_binds_when_defaults_present() {
        // Defaults cover the whole schema, so nothing should be skipped.
        for id in TemplateId::ALL {
            let def = definition(id);
            let groups = control_groups(&def.settings, &default_settings(id));
            let total: usize = groups.iter().map(|g| g.controls.len()).sum();
            assert!(total >= 20, "{}: expected full control set, got {total}", id.as_str());
        }
    }

    #[test]
    fn test_slider_binding_carries_constraints_and_value() {
        let def = definition(TemplateId::Minimal);
        let groups = control_groups(&def.settings, &default_settings(TemplateId::Minimal));
        let margin = &groups[0];
        let top = margin
            .controls
            .iter()
            .find(|c| c.path == "margin.top")
            .expect("margin.top bound");
        assert_eq!(top.label, "Top");
        assert_eq!(
            top.control,
            Control::Slider {
                min: 24.0,
                max: 144.0,
                step: 4.0,
                value: 48.0
            }
        );
    }

    #[test]
    fn test_select_binding_resolves_option_set() {
        let def = definition(TemplateId::Creative);
        let groups = control_groups(&def.settings, &default_settings(TemplateId::Creative));
        let layout = groups.iter().find(|g| g.section == "layout").unwrap();
        let skill_style = layout
            .controls
            .iter()
            .find(|c| c.path == "layout.skillStyle")
            .expect("skillStyle bound");
        match &skill_style.control {
            Control::Select { options, value } => {
                assert_eq!(options.len(), 3);
                assert_eq!(value, &SettingValue::Text("tags".to_string()));
            }
            other => panic!("expected select, got {other:?}"),
        }
    }

    #[test]
    fn test_undefined_path_is_skipped_not_broken() {
        let def = definition(TemplateId::Professional);
        // A settings tree missing the whole colors section (drifted config).
        let drifted = SettingNode::group([("margin", SettingNode::group([
            ("top", SettingNode::leaf(48.0)),
        ]))]);
        let groups = control_groups(&def.settings, &drifted);
        let colors = groups.iter().find(|g| g.section == "colors").unwrap();
        assert!(colors.controls.is_empty());
        let margin = groups.iter().find(|g| g.section == "margin").unwrap();
        assert_eq!(margin.controls.len(), 1);
    }

    #[test]
    fn test_type_mismatch_is_skipped() {
        let def = definition(TemplateId::Minimal);
        let settings = default_settings(TemplateId::Minimal);
        // A slider path holding a string cannot bind.
        let settings = write(&settings, "margin.top", "oops");
        let groups = control_groups(&def.settings, &settings);
        let margin = groups.iter().find(|g| g.section == "margin").unwrap();
        assert!(margin.controls.iter().all(|c| c.path != "margin.top"));
    }

    #[test]
    fn test_label_splits_camel_case() {
        assert_eq!(label_for("layout.sectionDividers"), "Section Dividers");
        assert_eq!(label_for("margin.top"), "Top");
        assert_eq!(label_for("typography.heading.fontFamily"), "Font Family");
    }
}
