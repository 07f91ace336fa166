//! Key paths locating a node from the root of the value tree.

use crate::percent;
use std::fmt;

/// One step of a [`Path`]: a field/map key or a sequence index.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl Segment {
    /// Returns the textual form of this segment as it appears in a form key.
    #[must_use]
    pub fn as_text(&self) -> std::borrow::Cow<'_, str> {
        match self {
            Segment::Key(key) => key.as_str().into(),
            Segment::Index(index) => index.to_string().into(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(index) => write!(f, "{index}"),
        }
    }
}

/// The coding path of a node. The root path is empty.
///
/// # Examples
///
/// ```rust
/// use serde_urlform::Path;
///
/// let path = Path::root().key("user").index(0).key("first name");
/// assert_eq!(path.to_string(), "user[0][first name]");
/// assert_eq!(path.to_form_key(), "user[0][first%20name]");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<Segment>);

impl Path {
    #[must_use]
    pub fn root() -> Self {
        Path(Vec::new())
    }

    /// Returns a new path extended by a key segment.
    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.push(Segment::Key(key.into()))
    }

    /// Returns a new path extended by an index segment.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.push(Segment::Index(index))
    }

    fn push(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(segment);
        Path(segments)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Composes the percent-encoded form key: `p0[p1]...[pn]`.
    ///
    /// Each segment is encoded on its own before the brackets are added.
    /// The root path yields an empty string.
    #[must_use]
    pub fn to_form_key(&self) -> String {
        let mut iter = self.0.iter();
        let Some(first) = iter.next() else {
            return String::new();
        };
        let mut key = percent::encode(&first.as_text());
        for segment in iter {
            push_bracketed(&mut key, &segment.as_text());
        }
        key
    }
}

/// Appends `[segment]` to an already composed form key, encoding the segment.
pub(crate) fn push_bracketed(key: &mut String, segment: &str) {
    key.push('[');
    key.push_str(&percent::encode(segment));
    key.push(']');
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i == 0 {
                write!(f, "{segment}")?;
            } else {
                write!(f, "[{segment}]")?;
            }
        }
        Ok(())
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<T: IntoIterator<Item = Segment>>(iter: T) -> Self {
        Path(iter.into_iter().collect())
    }
}
