//! Error types for form encoding.
//!
//! Encoding is fail-fast: the first error raised anywhere in the value tree
//! aborts the whole call and no partial output is returned.
//!
//! ## Error Categories
//!
//! - **Encoding failures**: text that cannot be represented in a form body,
//!   reported with the key path where it occurred
//! - **Callback failures**: errors returned by a custom date strategy, passed
//!   through unchanged
//! - **Custom errors**: raised by a value's own `Serialize` implementation
//! - **I/O errors**: writer failures in [`to_writer`](crate::to_writer)
//!
//! ## Examples
//!
//! ```rust
//! use serde_urlform::{Error, percent};
//!
//! let err = percent::decode("%FF").unwrap_err();
//! assert!(matches!(err, Error::Encoding { .. }));
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding a form.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Text could not be represented in the form format.
    #[error("Unable to form-encode {value:?} at `{path}`")]
    Encoding { path: String, value: String },

    /// A custom date strategy failed. Display and source are the callback's own.
    #[error(transparent)]
    Callback(Arc<dyn StdError + Send + Sync>),

    /// The reserved date marker carried something other than an RFC 3339 timestamp.
    #[error("Invalid date payload: {0}")]
    InvalidDate(String),

    /// IO error while writing encoded output
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an encoding error for `value` found at `path`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_urlform::Error;
    ///
    /// let err = Error::encoding("items[0]", "\u{fffd}");
    /// assert!(err.to_string().contains("items[0]"));
    /// ```
    pub fn encoding(path: impl fmt::Display, value: &str) -> Self {
        Error::Encoding {
            path: path.to_string(),
            value: value.to_string(),
        }
    }

    /// Wraps an error returned from a custom date callback.
    ///
    /// The wrapped error keeps its own message; [`std::error::Error::source`]
    /// is forwarded as well.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_urlform::Error;
    ///
    /// let io = std::io::Error::new(std::io::ErrorKind::Other, "clock skew");
    /// let err = Error::callback(io);
    /// assert_eq!(err.to_string(), "clock skew");
    /// ```
    pub fn callback<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Error::Callback(Arc::new(err))
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Skew;

    impl fmt::Display for Skew {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("clock skew")
        }
    }

    impl StdError for Skew {}

    #[test]
    fn test_callback_is_transparent() {
        let err = Error::callback(Skew);
        assert_eq!(err.to_string(), "clock skew");
        match err {
            Error::Callback(inner) => assert!(inner.downcast_ref::<Skew>().is_some()),
            other => panic!("Expected callback error, got {other:?}"),
        }
    }

    #[test]
    fn test_encoding_message_names_path() {
        let err = Error::encoding("user[tags][0]", "bad");
        let msg = err.to_string();
        assert!(msg.contains("user[tags][0]"));
        assert!(msg.contains("\"bad\""));
    }
}
