//! The configuration value tree.
//!
//! Global settings are a nested tree of scalar leaves — never behavior. The
//! tree is the single runtime representation: templates produce one as their
//! defaults, the store persists one, the path accessor reads and writes one,
//! and the renderer resolves styles out of one.
//!
//! Serialization is `untagged`, so a tree round-trips as plain nested JSON
//! (`{"margin": {"top": 48, ...}}`) — the same layout older saves used.
#![allow(dead_code)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Values and nodes
// ────────────────────────────────────────────────────────────────────────────

/// A scalar setting leaf.
///
/// Variant order matters for untagged deserialization: JSON `true` must land
/// on `Flag` before a number or string is attempted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl SettingValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SettingValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            SettingValue::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<f64> for SettingValue {
    fn from(n: f64) -> Self {
        SettingValue::Number(n)
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        SettingValue::Flag(b)
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::Text(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::Text(s)
    }
}

/// One node of the configuration tree: either a scalar leaf or a named
/// grouping of further nodes — never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingNode {
    Leaf(SettingValue),
    Group(BTreeMap<String, SettingNode>),
}

impl SettingNode {
    /// An empty grouping, the identity element for [`deep_merge`].
    pub fn empty() -> Self {
        SettingNode::Group(BTreeMap::new())
    }

    pub fn leaf(value: impl Into<SettingValue>) -> Self {
        SettingNode::Leaf(value.into())
    }

    /// Builds a grouping from `(name, node)` pairs.
    pub fn group<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, SettingNode)>,
    {
        SettingNode::Group(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    pub fn as_group(&self) -> Option<&BTreeMap<String, SettingNode>> {
        match self {
            SettingNode::Group(map) => Some(map),
            SettingNode::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&SettingValue> {
        match self {
            SettingNode::Leaf(value) => Some(value),
            SettingNode::Group(_) => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Deep merge
// ────────────────────────────────────────────────────────────────────────────

/// Merges `loaded` onto `defaults`, returning a new tree.
///
/// This is the backward-compatibility contract for persisted settings:
/// defaults provide every key the loaded blob lacks, and loaded values win
/// wherever they are present. Groups merge recursively; a leaf on either side
/// of a group/leaf mismatch resolves in favor of the loaded node wholesale.
pub fn deep_merge(defaults: &SettingNode, loaded: &SettingNode) -> SettingNode {
    match (defaults, loaded) {
        (SettingNode::Group(base), SettingNode::Group(over)) => {
            let mut merged = base.clone();
            for (key, node) in over {
                let entry = match base.get(key) {
                    Some(existing) => deep_merge(existing, node),
                    None => node.clone(),
                };
                merged.insert(key.clone(), entry);
            }
            SettingNode::Group(merged)
        }
        // Loaded scalar (or loaded group replacing a scalar default) wins.
        (_, other) => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(json: &str) -> SettingNode {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_untagged_round_trip_is_plain_json() {
        let node = SettingNode::group([
            ("top", SettingNode::leaf(48.0)),
            ("style", SettingNode::leaf("centered")),
            ("dividers", SettingNode::leaf(true)),
        ]);
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"dividers":true,"style":"centered","top":48.0}"#);
        assert_eq!(tree(&json), node);
    }

    #[test]
    fn test_bool_leaf_does_not_parse_as_number() {
        let node = tree("true");
        assert_eq!(node, SettingNode::leaf(true));
    }

    #[test]
    fn test_deep_merge_defaults_backfill_missing_keys() {
        let defaults = tree(r#"{"margin": {"top": 48, "bottom": 48}, "new": {"leaf": 1}}"#);
        let loaded = tree(r#"{"margin": {"top": 24}}"#);
        let merged = deep_merge(&defaults, &loaded);
        assert_eq!(merged, tree(r#"{"margin": {"top": 24, "bottom": 48}, "new": {"leaf": 1}}"#));
    }

    #[test]
    fn test_deep_merge_loaded_values_win() {
        let defaults = tree(r##"{"colors": {"primary": "#000000"}}"##);
        let loaded = tree(r##"{"colors": {"primary": "#123456"}}"##);
        let merged = deep_merge(&defaults, &loaded);
        assert_eq!(merged, tree(r##"{"colors": {"primary": "#123456"}}"##));
    }

    #[test]
    fn test_deep_merge_does_not_mutate_inputs() {
        let defaults = tree(r#"{"a": {"b": 1}}"#);
        let loaded = tree(r#"{"a": {"c": 2}}"#);
        let defaults_before = defaults.clone();
        let loaded_before = loaded.clone();
        let _ = deep_merge(&defaults, &loaded);
        assert_eq!(defaults, defaults_before);
        assert_eq!(loaded, loaded_before);
    }

    #[test]
    fn test_deep_merge_leaf_group_mismatch_takes_loaded() {
        // A persisted blob that changed a grouping to a scalar (or vice
        // versa) wins wholesale rather than producing a hybrid.
        let defaults = tree(r#"{"layout": {"headerStyle": "minimal"}}"#);
        let loaded = tree(r#"{"layout": "legacy"}"#);
        let merged = deep_merge(&defaults, &loaded);
        assert_eq!(merged, tree(r#"{"layout": "legacy"}"#));
    }
}
