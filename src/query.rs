//! Query items: the name/value pair form of an encoded value.
//!
//! Items carry the same percent-encoded text the string form uses, so joining
//! them reproduces it exactly:
//!
//! ```rust
//! use serde_urlform::{query, to_query_items, to_string};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Search { q: &'static str, tags: Vec<&'static str> }
//!
//! let search = Search { q: "serde form", tags: vec!["rust", "web"] };
//! let items = to_query_items(&search).unwrap();
//! assert_eq!(items[0].name, "q");
//! assert_eq!(items[0].value.as_deref(), Some("serde%20form"));
//! assert_eq!(query::join(&items), to_string(&search).unwrap());
//! ```

use std::fmt;

/// One `name=value` pair of a query string. `value` is `None` for bare names.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryItem {
    pub name: String,
    pub value: Option<String>,
}

impl QueryItem {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        QueryItem {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// An item with no value, written as just its name.
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        QueryItem {
            name: name.into(),
            value: None,
        }
    }
}

impl fmt::Display for QueryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.name, value),
            None => f.write_str(&self.name),
        }
    }
}

/// Joins items with `&` into a form/query string.
#[must_use]
pub fn join(items: &[QueryItem]) -> String {
    let mut output = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            output.push('&');
        }
        output.push_str(&item.to_string());
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(QueryItem::new("a", "1").to_string(), "a=1");
        assert_eq!(QueryItem::new("a", "").to_string(), "a=");
        assert_eq!(QueryItem::bare("flag").to_string(), "flag");
    }

    #[test]
    fn test_join() {
        let items = vec![QueryItem::new("a", "1"), QueryItem::bare("b"), QueryItem::new("c[]", "3")];
        assert_eq!(join(&items), "a=1&b&c[]=3");
        assert_eq!(join(&[]), "");
    }
}
