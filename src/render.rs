//! Rendering a finished [`FormNode`] tree.
//!
//! Both output forms share one pre-order walk: a node's own values come
//! before its children's. Values at the root have no key and are written
//! bare; everything else is written as `key(path)=value`.

use crate::path::push_bracketed;
use crate::{percent, FormNode, QueryItem};

/// Walks a value tree and emits its fragments.
#[derive(Clone, Copy, Debug, Default)]
pub struct Renderer {
    stable_key_order: bool,
}

impl Renderer {
    /// With `stable_key_order`, children are visited in ascending key order
    /// instead of insertion order.
    #[must_use]
    pub fn new(stable_key_order: bool) -> Self {
        Renderer { stable_key_order }
    }

    /// Renders the `&`-joined string form.
    #[must_use]
    pub fn render(&self, node: &FormNode) -> String {
        let mut output = String::new();
        let mut first = true;
        self.walk(node, None, &mut |key: Option<&str>, value: &str| {
            if !first {
                output.push('&');
            }
            first = false;
            if let Some(key) = key {
                output.push_str(key);
                output.push('=');
            }
            output.push_str(value);
        });
        output
    }

    /// Appends the query-item form to `items`.
    pub fn extend_query_items(&self, node: &FormNode, items: &mut Vec<QueryItem>) {
        self.walk(node, None, &mut |key: Option<&str>, value: &str| {
            items.push(match key {
                Some(key) => QueryItem::new(key, value),
                None => QueryItem::bare(value),
            });
        });
    }

    /// `key` is the composed, encoded form key of `node`; `None` at the root.
    fn walk<F>(&self, node: &FormNode, key: Option<&str>, emit: &mut F)
    where
        F: FnMut(Option<&str>, &str),
    {
        for value in &node.values {
            emit(key, value.as_str());
        }

        let mut children: Vec<_> = node.children.iter().collect();
        if self.stable_key_order {
            children.sort_by(|(a, _), (b, _)| a.cmp(b));
        }

        for (segment, child) in children {
            let child_key = match key {
                None => percent::encode(segment),
                Some(parent) => {
                    let mut composed = parent.to_string();
                    push_bracketed(&mut composed, segment);
                    composed
                }
            };
            self.walk(child, Some(&child_key), emit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> FormNode {
        let mut user = FormNode::new();
        user.insert_child("name", FormNode::leaf("Ann"));
        user.insert_child("age", FormNode::leaf("30"));

        let mut root = FormNode::new();
        root.insert_child("user", user);
        root.insert_child("a b", FormNode::leaf("1"));
        root
    }

    #[test]
    fn test_insertion_order() {
        let output = Renderer::new(false).render(&tree());
        assert_eq!(output, "user[name]=Ann&user[age]=30&a%20b=1");
    }

    #[test]
    fn test_stable_order_sorts_every_level() {
        let output = Renderer::new(true).render(&tree());
        assert_eq!(output, "a%20b=1&user[age]=30&user[name]=Ann");
    }

    #[test]
    fn test_root_values_are_bare() {
        let mut root = FormNode::new();
        root.push_value("1");
        root.push_value("2");
        assert_eq!(Renderer::default().render(&root), "1&2");

        let mut items = Vec::new();
        Renderer::default().extend_query_items(&root, &mut items);
        assert_eq!(items, vec![QueryItem::bare("1"), QueryItem::bare("2")]);
    }

    #[test]
    fn test_values_precede_children() {
        let mut root = FormNode::new();
        let mut list = FormNode::new();
        list.push_value("x");
        list.insert_child("0", FormNode::leaf("y"));
        root.insert_child("k", list);
        assert_eq!(Renderer::default().render(&root), "k=x&k[0]=y");
    }

    #[test]
    fn test_bracket_child_renders_empty_brackets() {
        let mut list = FormNode::new();
        list.push_bracketed(vec!["1".to_string(), "2".to_string()]);
        let root = FormNode::from_iter([("ids".to_string(), list)]);
        assert_eq!(Renderer::default().render(&root), "ids[]=1&ids[]=2");
    }

    #[test]
    fn test_empty_tree_renders_nothing() {
        assert_eq!(Renderer::default().render(&FormNode::new()), "");
    }
}
