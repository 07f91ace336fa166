//! # serde_urlform
//!
//! A Serde serializer for `application/x-www-form-urlencoded` bodies and URL
//! query items.
//!
//! ## Key Features
//!
//! - **Nested data**: structs, maps and sequences flatten into bracketed keys
//!   such as `user[address][city]=Paris`
//! - **Array policies**: `foo[]=1&foo[]=2`, `foo=1&foo=2` or `foo=1,2`
//! - **Date policies**: Unix seconds, ISO 8601, or a custom callback
//! - **Deterministic output**: optional lexicographic key order
//! - **Two outputs**: a percent-encoded string, or an ordered list of
//!   [`QueryItem`]s that joins back into the same string
//! - **No Unsafe Code**
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_urlform = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Basic Encoding
//!
//! ```rust
//! use serde::Serialize;
//! use serde_urlform::to_string;
//!
//! #[derive(Serialize)]
//! struct Login {
//!     user: String,
//!     remember: bool,
//!     scopes: Vec<&'static str>,
//! }
//!
//! let login = Login {
//!     user: "ann lee".to_string(),
//!     remember: true,
//!     scopes: vec!["read", "write"],
//! };
//!
//! assert_eq!(
//!     to_string(&login).unwrap(),
//!     "user=ann%20lee&remember=true&scopes[]=read&scopes[]=write"
//! );
//! ```
//!
//! ### Options
//!
//! ```rust
//! use serde::Serialize;
//! use serde_urlform::{to_string_with_options, ArrayEncoding, FormOptions};
//!
//! #[derive(Serialize)]
//! struct Filter { z: u8, a: Vec<u8> }
//!
//! let options = FormOptions::sorted().with_array_encoding(ArrayEncoding::Separator(','));
//! let form = to_string_with_options(&Filter { z: 1, a: vec![1, 2] }, &options).unwrap();
//! assert_eq!(form, "a=1,2&z=1");
//! ```
//!
//! ### Reusable Encoder
//!
//! ```rust
//! use serde::Serialize;
//! use serde_urlform::{Encoder, FormOptions, UserInfo};
//!
//! #[derive(Serialize)]
//! struct Page { n: u32 }
//!
//! let encoder = Encoder::new(FormOptions::sorted());
//! assert_eq!(encoder.encode(&Page { n: 2 }).unwrap(), "n=2");
//!
//! let items = encoder.encode_query_items_with(&Page { n: 3 }, &UserInfo::new()).unwrap();
//! assert_eq!(items[0].to_string(), "n=3");
//! ```
//!
//! ## How It Works
//!
//! Encoding runs in two passes. The [`ser::Serializer`] visits the value and
//! builds a [`FormNode`] tree; the [`render::Renderer`] then walks that tree
//! once. See the [`format`] module for the exact output rules.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Proper error propagation with `Result` types; the first error aborts the call

pub mod date;
pub mod error;
pub mod format;
pub mod node;
pub mod options;
pub mod path;
pub mod percent;
pub mod query;
pub mod render;
pub mod ser;

pub use error::{Error, Result};
pub use node::FormNode;
pub use options::{ArrayEncoding, DateEncoding, FormOptions, UserInfo};
pub use path::{Path, Segment};
pub use query::QueryItem;
pub use ser::{Fragment, Serializer};

use render::Renderer;
use serde::Serialize;
use std::borrow::Cow;
use std::io;

/// Encode any `T: Serialize` as a form-urlencoded string with default options.
///
/// # Examples
///
/// ```rust
/// use serde_urlform::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: -2 }).unwrap(), "x=1&y=-2");
/// ```
///
/// # Errors
///
/// Returns an error if any part of the value fails to encode.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &FormOptions::default())
}

/// Encode any `T: Serialize` as a form-urlencoded string with custom options.
///
/// # Errors
///
/// Returns an error if any part of the value fails to encode.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &FormOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let node = to_node(value, options)?;
    Ok(Renderer::new(options.stable_key_order).render(&node))
}

/// Encode any `T: Serialize` as an ordered list of query items.
///
/// # Examples
///
/// ```rust
/// use serde_urlform::{to_query_items, QueryItem};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Page { page: u32, q: Option<String> }
///
/// let items = to_query_items(&Page { page: 2, q: None }).unwrap();
/// assert_eq!(items, vec![QueryItem::new("page", "2")]);
/// ```
///
/// # Errors
///
/// Returns an error if any part of the value fails to encode.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_query_items<T>(value: &T) -> Result<Vec<QueryItem>>
where
    T: ?Sized + Serialize,
{
    to_query_items_with_options(value, &FormOptions::default())
}

/// Encode any `T: Serialize` as query items with custom options.
///
/// # Errors
///
/// Returns an error if any part of the value fails to encode.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_query_items_with_options<T>(value: &T, options: &FormOptions) -> Result<Vec<QueryItem>>
where
    T: ?Sized + Serialize,
{
    let node = to_node(value, options)?;
    let mut items = Vec::new();
    Renderer::new(options.stable_key_order).extend_query_items(&node, &mut items);
    Ok(items)
}

/// Build the intermediate value tree without rendering it.
///
/// # Errors
///
/// Returns an error if any part of the value fails to encode.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_node<T>(value: &T, options: &FormOptions) -> Result<FormNode>
where
    T: ?Sized + Serialize,
{
    tracing::trace!(
        array_encoding = ?options.array_encoding,
        stable_key_order = options.stable_key_order,
        "building form tree"
    );
    let fragment = value
        .serialize(Serializer::new(options, Path::root()))
        .map_err(|e| {
            tracing::debug!(error = %e, "form encoding failed");
            e
        })?;
    let node = fragment.into_node().unwrap_or_default();
    tracing::trace!(children = node.children().len(), "form tree built");
    Ok(node)
}

/// Write the form-urlencoded string of `value` to a writer.
///
/// # Examples
///
/// ```rust
/// use serde_urlform::to_writer;
/// use std::collections::BTreeMap;
///
/// let mut fields = BTreeMap::new();
/// fields.insert("grant_type", "client_credentials");
///
/// let mut body = Vec::new();
/// to_writer(&mut body, &fields).unwrap();
/// assert_eq!(body, b"grant_type=client_credentials");
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &FormOptions::default())
}

/// Write the form-urlencoded string of `value` to a writer with custom options.
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &FormOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let form = to_string_with_options(value, options)?;
    writer
        .write_all(form.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// A reusable encoder holding one set of options.
///
/// Per-call [`UserInfo`] overrides are merged over the configured user info,
/// with the override winning on key collision. The configured options are
/// never modified.
#[derive(Clone, Debug, Default)]
pub struct Encoder {
    options: FormOptions,
}

impl Encoder {
    #[must_use]
    pub fn new(options: FormOptions) -> Self {
        Encoder { options }
    }

    #[must_use]
    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Encodes `value` as a form-urlencoded string.
    ///
    /// # Errors
    ///
    /// Returns an error if any part of the value fails to encode.
    pub fn encode<T>(&self, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        to_string_with_options(value, &self.options)
    }

    /// Encodes `value` with extra user info for this call only.
    ///
    /// # Errors
    ///
    /// Returns an error if any part of the value fails to encode.
    pub fn encode_with<T>(&self, value: &T, user_info: &UserInfo) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        to_string_with_options(value, &self.call_options(user_info))
    }

    /// Encodes `value` as query items.
    ///
    /// # Errors
    ///
    /// Returns an error if any part of the value fails to encode.
    pub fn encode_query_items<T>(&self, value: &T) -> Result<Vec<QueryItem>>
    where
        T: ?Sized + Serialize,
    {
        to_query_items_with_options(value, &self.options)
    }

    /// Encodes `value` as query items with extra user info for this call only.
    ///
    /// # Errors
    ///
    /// Returns an error if any part of the value fails to encode.
    pub fn encode_query_items_with<T>(&self, value: &T, user_info: &UserInfo) -> Result<Vec<QueryItem>>
    where
        T: ?Sized + Serialize,
    {
        to_query_items_with_options(value, &self.call_options(user_info))
    }

    /// Appends the query items of `value` to `items`.
    ///
    /// Nothing is appended if encoding fails.
    ///
    /// # Errors
    ///
    /// Returns an error if any part of the value fails to encode.
    pub fn encode_into<T>(&self, value: &T, items: &mut Vec<QueryItem>, user_info: &UserInfo) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let options = self.call_options(user_info);
        let node = to_node(value, &options)?;
        Renderer::new(options.stable_key_order).extend_query_items(&node, items);
        Ok(())
    }

    fn call_options(&self, user_info: &UserInfo) -> Cow<'_, FormOptions> {
        if user_info.is_empty() {
            return Cow::Borrowed(&self.options);
        }
        let mut options = self.options.clone();
        options.user_info.merge(user_info);
        Cow::Owned(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    fn user() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        }
    }

    #[test]
    fn test_single_field() {
        #[derive(Serialize)]
        struct A {
            a: u8,
        }
        assert_eq!(to_string(&A { a: 1 }).unwrap(), "a=1");
    }

    #[test]
    fn test_point() {
        assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x=1&y=2");
    }

    #[test]
    fn test_user_default_options() {
        assert_eq!(
            to_string(&user()).unwrap(),
            "id=123&name=Alice&active=true&tags[]=admin&tags[]=user"
        );
    }

    #[test]
    fn test_to_node() {
        let node = to_node(&Point { x: 1, y: 2 }, &FormOptions::new()).unwrap();
        assert_eq!(node.child("x"), Some(&FormNode::leaf("1")));
        assert_eq!(node.child("y"), Some(&FormNode::leaf("2")));
    }

    #[test]
    fn test_top_level_scalar_is_bare() {
        assert_eq!(to_string(&"hello world").unwrap(), "hello%20world");
        assert_eq!(to_query_items(&5u8).unwrap(), vec![QueryItem::bare("5")]);
    }

    #[test]
    fn test_top_level_values_array_is_bare() {
        let options = FormOptions::new().with_array_encoding(ArrayEncoding::Values);
        assert_eq!(to_string_with_options(&[1, 2, 3], &options).unwrap(), "1&2&3");
    }

    #[test]
    fn test_writer() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
        assert_eq!(buffer, b"x=1&y=2");
    }

    #[test]
    fn test_encode_into_appends() {
        let encoder = Encoder::default();
        let mut items = vec![QueryItem::new("api_key", "k")];
        encoder
            .encode_into(&Point { x: 1, y: 2 }, &mut items, &UserInfo::new())
            .unwrap();
        assert_eq!(
            items,
            vec![
                QueryItem::new("api_key", "k"),
                QueryItem::new("x", "1"),
                QueryItem::new("y", "2"),
            ]
        );
    }

    #[test]
    fn test_call_options_do_not_leak() {
        let encoder = Encoder::new(FormOptions::new().with_user_info_entry("a", 1_u8));
        let mut extra = UserInfo::new();
        extra.insert("a", 2_u8);
        let merged = encoder.call_options(&extra);
        assert_eq!(merged.user_info.get::<u8>("a"), Some(&2));
        assert_eq!(encoder.options().user_info.get::<u8>("a"), Some(&1));
    }
}
