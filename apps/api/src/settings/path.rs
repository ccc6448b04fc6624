//! Dotted-path accessor over the configuration tree.
//!
//! The sole read/write gateway for nested settings. Both operations are pure
//! functions of their inputs: `read` never panics on a missing path, and
//! `write` returns a structurally new tree without touching the original.

use std::collections::BTreeMap;

use crate::settings::value::{SettingNode, SettingValue};

/// Reads the leaf at `path` ("typography.heading.fontSize"). Returns `None`
/// when any intermediate key is absent, when the path dead-ends in a leaf
/// early, or when it lands on a grouping.
pub fn read<'a>(root: &'a SettingNode, path: &str) -> Option<&'a SettingValue> {
    if path.is_empty() {
        return None;
    }
    let mut node = root;
    for key in path.split('.') {
        node = node.as_group()?.get(key)?;
    }
    node.as_leaf()
}

/// Writes `value` at `path`, returning the resulting tree.
///
/// Ancestors of the written leaf are rebuilt; sibling subtrees carry over
/// unchanged. Missing intermediate keys materialize as empty groupings, and a
/// leaf occupying an intermediate position is replaced by a grouping. An
/// empty path is a no-op clone.
pub fn write(root: &SettingNode, path: &str, value: impl Into<SettingValue>) -> SettingNode {
    if path.is_empty() {
        return root.clone();
    }
    let keys: Vec<&str> = path.split('.').collect();
    write_at(root, &keys, &value.into())
}

fn write_at(node: &SettingNode, keys: &[&str], value: &SettingValue) -> SettingNode {
    let (key, rest) = match keys.split_first() {
        Some(split) => split,
        None => return SettingNode::Leaf(value.clone()),
    };

    // A leaf in an intermediate position gives way to a fresh grouping.
    let mut map: BTreeMap<String, SettingNode> = match node.as_group() {
        Some(existing) => existing.clone(),
        None => BTreeMap::new(),
    };

    let child = match map.get(*key) {
        Some(existing) => write_at(existing, rest, value),
        None => write_at(&SettingNode::empty(), rest, value),
    };
    map.insert((*key).to_string(), child);
    SettingNode::Group(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(json: &str) -> SettingNode {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_read_nested_leaf() {
        let root = tree(r#"{"typography": {"heading": {"fontSize": 24}}}"#);
        let value = read(&root, "typography.heading.fontSize");
        assert_eq!(value, Some(&SettingValue::Number(24.0)));
    }

    #[test]
    fn test_read_missing_intermediate_returns_none() {
        let root = tree(r#"{"typography": {"heading": {"fontSize": 24}}}"#);
        assert_eq!(read(&root, "typography.body.fontSize"), None);
        assert_eq!(read(&root, "nothing.at.all"), None);
    }

    #[test]
    fn test_read_group_position_returns_none() {
        let root = tree(r#"{"typography": {"heading": {"fontSize": 24}}}"#);
        // Path lands on a grouping, not a leaf.
        assert_eq!(read(&root, "typography.heading"), None);
        // Path continues past a leaf.
        assert_eq!(read(&root, "typography.heading.fontSize.px"), None);
    }

    #[test]
    fn test_read_empty_path_returns_none() {
        let root = tree(r#"{"a": 1}"#);
        assert_eq!(read(&root, ""), None);
    }

    #[test]
    fn test_write_read_round_trip() {
        let root = tree(r#"{"margin": {"top": 48, "bottom": 48}}"#);
        let written = write(&root, "margin.top", 24.0);
        assert_eq!(read(&written, "margin.top"), Some(&SettingValue::Number(24.0)));
    }

    #[test]
    fn test_write_does_not_mutate_input() {
        let root = tree(r#"{"margin": {"top": 48}}"#);
        let before = root.clone();
        let _ = write(&root, "margin.top", 24.0);
        assert_eq!(root, before);
    }

    #[test]
    fn test_write_preserves_siblings() {
        let root = tree(r##"{"margin": {"top": 48, "bottom": 48}, "colors": {"primary": "#000"}}"##);
        let written = write(&root, "margin.top", 24.0);
        assert_eq!(read(&written, "margin.bottom"), Some(&SettingValue::Number(48.0)));
        assert_eq!(
            read(&written, "colors.primary"),
            Some(&SettingValue::Text("#000".to_string()))
        );
    }

    #[test]
    fn test_write_creates_missing_intermediates() {
        let root = SettingNode::empty();
        let written = write(&root, "layout.headerStyle", "centered");
        assert_eq!(
            read(&written, "layout.headerStyle"),
            Some(&SettingValue::Text("centered".to_string()))
        );
    }

    #[test]
    fn test_write_through_leaf_replaces_it_with_group() {
        let root = tree(r#"{"layout": "legacy"}"#);
        let written = write(&root, "layout.headerStyle", "minimal");
        assert_eq!(
            read(&written, "layout.headerStyle"),
            Some(&SettingValue::Text("minimal".to_string()))
        );
    }

    #[test]
    fn test_write_empty_path_is_noop_clone() {
        let root = tree(r#"{"a": 1}"#);
        let written = write(&root, "", 2.0);
        assert_eq!(written, root);
    }
}
