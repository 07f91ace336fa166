//! Configuration options for form encoding.
//!
//! This module provides types to customize the encoder:
//!
//! - [`FormOptions`]: Main configuration struct
//! - [`ArrayEncoding`]: How scalar arrays collapse into keys
//! - [`DateEncoding`]: How dates become text
//! - [`UserInfo`]: Opaque values handed to custom date callbacks
//!
//! Options are immutable once built and cheap to clone, so one instance can be
//! shared by any number of concurrent encode calls.
//!
//! ## Examples
//!
//! ```rust
//! use serde_urlform::{to_string_with_options, ArrayEncoding, FormOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Filter { tags: Vec<&'static str> }
//!
//! let filter = Filter { tags: vec!["a", "b"] };
//!
//! let options = FormOptions::new().with_array_encoding(ArrayEncoding::Separator(','));
//! assert_eq!(to_string_with_options(&filter, &options).unwrap(), "tags=a,b");
//!
//! let options = FormOptions::new().with_array_encoding(ArrayEncoding::Values);
//! assert_eq!(to_string_with_options(&filter, &options).unwrap(), "tags=a&tags=b");
//! ```

use crate::date::DateEncoder;
use crate::Result;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// How arrays of scalars are written.
///
/// Only scalar elements are affected. Structured elements are always keyed by
/// their index, e.g. `items[0][x]=1`.
///
/// # Examples
///
/// ```rust
/// use serde_urlform::ArrayEncoding;
///
/// assert_eq!(ArrayEncoding::default(), ArrayEncoding::Bracket);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ArrayEncoding {
    /// `foo[]=1&foo[]=2&foo[]=3`
    #[default]
    Bracket,
    /// `foo=1,2,3` with the given separator.
    ///
    /// The separator is written literally, except `&`, `=` and `%`, which are
    /// percent-encoded. An array without scalar items still writes `foo=`.
    Separator(char),
    /// `foo=1&foo=2&foo=3`
    Values,
}

/// Signature of a custom date strategy.
pub type DateCallback = dyn Fn(&DateTime<Utc>, &mut DateEncoder<'_>) -> Result<()> + Send + Sync;

/// How date leaves are written.
#[derive(Clone, Default)]
pub enum DateEncoding {
    /// Unix timestamp in seconds, fractional part kept: `1.5`
    #[default]
    SecondsSince1970,
    /// ISO 8601 in UTC with whole seconds: `2024-01-15T10:30:00Z`
    Iso8601,
    /// A callback that writes the date through a [`DateEncoder`].
    Custom(Arc<DateCallback>),
}

impl DateEncoding {
    /// Builds a [`DateEncoding::Custom`] from a closure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_urlform::DateEncoding;
    ///
    /// let day_only = DateEncoding::custom(|date, encoder| {
    ///     encoder.encode(&date.format("%Y-%m-%d").to_string())
    /// });
    /// ```
    pub fn custom<F>(callback: F) -> Self
    where
        F: Fn(&DateTime<Utc>, &mut DateEncoder<'_>) -> Result<()> + Send + Sync + 'static,
    {
        DateEncoding::Custom(Arc::new(callback))
    }
}

impl fmt::Debug for DateEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateEncoding::SecondsSince1970 => f.write_str("SecondsSince1970"),
            DateEncoding::Iso8601 => f.write_str("Iso8601"),
            DateEncoding::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Opaque side-channel values available to custom date callbacks.
///
/// # Examples
///
/// ```rust
/// use serde_urlform::UserInfo;
///
/// let mut info = UserInfo::new();
/// info.insert("offset", 3600_i64);
/// assert_eq!(info.get::<i64>("offset"), Some(&3600));
/// assert_eq!(info.get::<String>("offset"), None);
/// ```
#[derive(Clone, Default)]
pub struct UserInfo(IndexMap<String, Arc<dyn Any + Send + Sync>>);

impl UserInfo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn insert<T>(&mut self, key: impl Into<String>, value: T)
    where
        T: Any + Send + Sync,
    {
        self.0.insert(key.into(), Arc::new(value));
    }

    /// Returns the value under `key` if it exists and has type `T`.
    #[must_use]
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.0.get(key).and_then(|value| value.downcast_ref::<T>())
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merges `other` into `self`. Entries of `other` win on key collision.
    pub fn merge(&mut self, other: &UserInfo) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), Arc::clone(value));
        }
    }
}

impl fmt::Debug for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.keys()).finish()
    }
}

/// Configuration options for form encoding.
///
/// # Examples
///
/// ```rust
/// use serde_urlform::{ArrayEncoding, DateEncoding, FormOptions};
///
/// // Default options: bracketed arrays, Unix timestamps, visit order
/// let options = FormOptions::new();
///
/// // Deterministic output
/// let options = FormOptions::sorted();
///
/// // Custom configuration
/// let options = FormOptions::new()
///     .with_array_encoding(ArrayEncoding::Values)
///     .with_date_encoding(DateEncoding::Iso8601)
///     .with_stable_key_order(true);
/// ```
#[derive(Clone, Debug, Default)]
pub struct FormOptions {
    pub array_encoding: ArrayEncoding,
    pub date_encoding: DateEncoding,
    pub stable_key_order: bool,
    pub user_info: UserInfo,
}

impl FormOptions {
    /// Creates default options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_urlform::{ArrayEncoding, FormOptions};
    ///
    /// let options = FormOptions::new();
    /// assert_eq!(options.array_encoding, ArrayEncoding::Bracket);
    /// assert!(!options.stable_key_order);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that sort keys lexicographically at every level.
    #[must_use]
    pub fn sorted() -> Self {
        FormOptions {
            stable_key_order: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_array_encoding(mut self, array_encoding: ArrayEncoding) -> Self {
        self.array_encoding = array_encoding;
        self
    }

    #[must_use]
    pub fn with_date_encoding(mut self, date_encoding: DateEncoding) -> Self {
        self.date_encoding = date_encoding;
        self
    }

    /// Sorts children by key when rendering instead of keeping visit order.
    #[must_use]
    pub fn with_stable_key_order(mut self, stable_key_order: bool) -> Self {
        self.stable_key_order = stable_key_order;
        self
    }

    /// Replaces the user info.
    #[must_use]
    pub fn with_user_info(mut self, user_info: UserInfo) -> Self {
        self.user_info = user_info;
        self
    }

    /// Adds one user info entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_urlform::FormOptions;
    ///
    /// let options = FormOptions::new().with_user_info_entry("tz", "UTC");
    /// assert_eq!(options.user_info.get::<&str>("tz"), Some(&"UTC"));
    /// ```
    #[must_use]
    pub fn with_user_info_entry<T>(mut self, key: impl Into<String>, value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        self.user_info.insert(key, value);
        self
    }
}
