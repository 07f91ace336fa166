//! The intermediate value tree.
//!
//! Encoding happens in two passes: the serde visitor in [`ser`](crate::ser)
//! builds a [`FormNode`] tree bottom-up, then [`render`](crate::render) walks
//! it to produce text or query items.
//!
//! ## Why IndexMap?
//!
//! Children keep the order in which fields were visited, so output follows
//! declaration order unless stable key ordering is requested.
//!
//! ## Examples
//!
//! ```rust
//! use serde_urlform::{to_node, FormNode, FormOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Search { q: String, page: u32 }
//!
//! let node = to_node(&Search { q: "rust lang".into(), page: 2 }, &FormOptions::new()).unwrap();
//! assert_eq!(node.child("q").map(FormNode::values), Some(&["rust%20lang".to_string()][..]));
//! assert_eq!(node.child("page").map(FormNode::values), Some(&["2".to_string()][..]));
//! ```

use crate::percent;
use indexmap::IndexMap;

/// A node of the form value tree.
///
/// `values` hold percent-encoded scalar text attached directly at this node;
/// `children` map raw key segments to sub-trees.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormNode {
    pub(crate) values: Vec<String>,
    pub(crate) children: IndexMap<String, FormNode>,
}

impl FormNode {
    /// Creates an empty node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node carrying one already-encoded value.
    #[must_use]
    pub fn leaf(value: impl Into<String>) -> Self {
        FormNode {
            values: vec![value.into()],
            children: IndexMap::new(),
        }
    }

    /// The percent-encoded values attached at this node, in insertion order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns the child stored under `key`.
    #[must_use]
    pub fn child(&self, key: &str) -> Option<&FormNode> {
        self.children.get(key)
    }

    /// Iterates children in insertion order.
    pub fn children(&self) -> indexmap::map::Iter<'_, String, FormNode> {
        self.children.iter()
    }

    /// `true` when the node has no children; such a node is leaf-bearing.
    #[must_use]
    pub fn has_only_values(&self) -> bool {
        self.children.is_empty()
    }

    /// `true` when the node carries neither values nor children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.children.is_empty()
    }

    /// Appends an already-encoded value.
    pub fn push_value(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }

    /// Installs `child` under `key`. An existing child is replaced in place.
    pub fn insert_child(&mut self, key: impl Into<String>, child: FormNode) -> Option<FormNode> {
        self.children.insert(key.into(), child)
    }

    /// Appends values to the reserved empty-key child, which renders as `key[]`.
    pub(crate) fn push_bracketed<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.children
            .entry(String::new())
            .or_default()
            .values
            .extend(values);
    }

    /// Collapses every scalar item of an array node into one separated value.
    ///
    /// Items attached directly come first, followed by any left under the
    /// empty-key child. Both sources are cleared; the empty-key child is
    /// dropped once it has nothing left. Indexed children are untouched.
    /// The joined value is always set, so an array with no scalar items
    /// still writes `key=`.
    ///
    /// `&`, `=` and `%` would change how the output parses, so they are
    /// percent-encoded when used as the separator.
    pub fn collapse_separated(&mut self, separator: char) {
        let mut items = std::mem::take(&mut self.values);
        if let Some(bracketed) = self.children.get_mut("") {
            items.append(&mut bracketed.values);
            if bracketed.is_empty() {
                self.children.shift_remove("");
            }
        }
        let separator = match separator {
            '&' | '=' | '%' => percent::encode(separator.encode_utf8(&mut [0u8; 4])),
            other => other.to_string(),
        };
        self.values.push(items.join(separator.as_str()));
    }
}

impl FromIterator<(String, FormNode)> for FormNode {
    fn from_iter<T: IntoIterator<Item = (String, FormNode)>>(iter: T) -> Self {
        FormNode {
            values: Vec::new(),
            children: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_leaf_has_only_values() {
        let node = FormNode::leaf("1");
        assert!(node.has_only_values());
        assert_eq!(node.values(), &["1".to_string()]);
    }

    #[test]
    fn test_insert_child_last_write_wins_in_place() {
        let mut node = FormNode::new();
        node.insert_child("a", FormNode::leaf("1"));
        node.insert_child("b", FormNode::leaf("2"));
        let old = node.insert_child("a", FormNode::leaf("3"));
        assert_eq!(old, Some(FormNode::leaf("1")));
        let keys: Vec<_> = node.children().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(node.child("a"), Some(&FormNode::leaf("3")));
    }

    #[test]
    fn test_collapse_joins_own_values() {
        let mut node = FormNode::new();
        node.values = values(&["1", "2", "3"]);
        node.collapse_separated(',');
        assert_eq!(node.values(), &values(&["1,2,3"])[..]);
        assert!(node.has_only_values());
    }

    #[test]
    fn test_collapse_merges_bracketed_leftovers() {
        let mut node = FormNode::new();
        node.values = values(&["a", "b"]);
        node.push_bracketed(values(&["c", "d"]));
        node.collapse_separated('|');
        assert_eq!(node.values(), &values(&["a|b|c|d"])[..]);
        assert!(node.child("").is_none());
    }

    #[test]
    fn test_collapse_keeps_indexed_children() {
        let mut node = FormNode::new();
        node.values = values(&["x"]);
        node.insert_child("1", FormNode::from_iter([("k".to_string(), FormNode::leaf("v"))]));
        node.collapse_separated(',');
        assert_eq!(node.values(), &values(&["x"])[..]);
        assert!(node.child("1").is_some());
    }

    #[test]
    fn test_collapse_of_empty_array_writes_empty_value() {
        let mut node = FormNode::new();
        node.collapse_separated(',');
        assert_eq!(node.values(), &values(&[""])[..]);
    }

    #[test]
    fn test_collapse_of_structured_array_keeps_children() {
        let mut node = FormNode::new();
        node.insert_child("0", FormNode::from_iter([("x".to_string(), FormNode::leaf("1"))]));
        node.collapse_separated(',');
        assert_eq!(node.values(), &values(&[""])[..]);
        assert!(node.child("0").is_some());
    }

    #[test]
    fn test_collapse_escapes_structural_separators() {
        for (separator, joined) in [('&', "1%262"), ('=', "1%3D2"), ('%', "1%252"), (';', "1;2")] {
            let mut node = FormNode::new();
            node.values = values(&["1", "2"]);
            node.collapse_separated(separator);
            assert_eq!(node.values(), &values(&[joined])[..], "separator {separator:?}");
        }
    }
}
