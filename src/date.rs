//! Date support.
//!
//! Serde has no date type, so dates reach the encoder through a reserved
//! newtype-struct name. The encoder checks for that name before it looks at
//! anything else and applies the configured [`DateEncoding`]. Any other serde
//! format sees a plain RFC 3339 string.
//!
//! Mark a field as a date in one of three ways:
//!
//! ```rust
//! use chrono::{DateTime, TimeZone, Utc};
//! use serde::Serialize;
//! use serde_urlform::date::Date;
//!
//! #[derive(Serialize)]
//! struct Event {
//!     #[serde(with = "serde_urlform::date")]
//!     starts: DateTime<Utc>,
//!     #[serde(with = "serde_urlform::date::option")]
//!     ends: Option<DateTime<Utc>>,
//!     reminders: Vec<Date>,
//! }
//!
//! let event = Event {
//!     starts: Utc.timestamp_opt(1, 0).unwrap(),
//!     ends: None,
//!     reminders: vec![Date(Utc.timestamp_opt(2, 0).unwrap())],
//! };
//! assert_eq!(serde_urlform::to_string(&event).unwrap(), "starts=1&reminders[]=2");
//! ```

use crate::options::DateEncoding;
use crate::ser::Serializer;
use crate::{Error, FormNode, FormOptions, Path, Result, UserInfo};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer as _};

/// Newtype-struct name that marks a date payload.
pub(crate) const DATE_TOKEN: &str = "$serde_urlform::private::Date";

/// A UTC date that the form encoder recognises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(pub DateTime<Utc>);

impl From<DateTime<Utc>> for Date {
    fn from(date: DateTime<Utc>) -> Self {
        Date(date)
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serialize(&self.0, serializer)
    }
}

/// `#[serde(with = "serde_urlform::date")]` for `DateTime<Utc>` fields.
pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let payload = date.to_rfc3339_opts(SecondsFormat::AutoSi, true);
    serializer.serialize_newtype_struct(DATE_TOKEN, &payload)
}

/// `#[serde(with = "serde_urlform::date::option")]` for `Option<DateTime<Utc>>` fields.
pub mod option {
    use chrono::{DateTime, Utc};

    pub fn serialize<S>(
        date: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match date {
            Some(date) => serializer.serialize_some(&super::Date(*date)),
            None => serializer.serialize_none(),
        }
    }
}

/// Parses the payload carried by the date token.
pub(crate) fn parse_payload(payload: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(payload)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|e| Error::InvalidDate(format!("{payload:?}: {e}")))
}

/// Unix seconds with the fractional part kept, shortest decimal form.
pub(crate) fn seconds_since_1970(date: &DateTime<Utc>) -> String {
    let nanos = date.timestamp_subsec_nanos();
    if nanos == 0 {
        return date.timestamp().to_string();
    }
    let seconds = date.timestamp() as f64 + f64::from(nanos) / 1_000_000_000.0;
    seconds.to_string()
}

/// ISO 8601, UTC, whole seconds.
pub(crate) fn iso8601(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Applies the configured date strategy to `date` found at `path`.
pub(crate) fn encode_date(options: &FormOptions, path: &Path, date: &DateTime<Utc>) -> Result<FormNode> {
    match &options.date_encoding {
        DateEncoding::SecondsSince1970 => Ok(FormNode::leaf(seconds_since_1970(date))),
        DateEncoding::Iso8601 => Ok(FormNode::leaf(crate::percent::encode(&iso8601(date)))),
        DateEncoding::Custom(callback) => {
            tracing::trace!(path = %path, "applying custom date strategy");
            let mut encoder = DateEncoder::new(options, path);
            callback(date, &mut encoder)?;
            Ok(encoder.into_node())
        }
    }
}

/// Handle passed to a custom date callback.
///
/// Values written through it are encoded at the date's own path with the same
/// options as the surrounding call. The last value written wins.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use serde::Serialize;
/// use serde_urlform::{date::Date, to_string_with_options, DateEncoding, FormOptions};
///
/// #[derive(Serialize)]
/// struct Parts { year: i32, day: u32 }
///
/// #[derive(Serialize)]
/// struct Query { at: Date }
///
/// let options = FormOptions::new().with_date_encoding(DateEncoding::custom(|date, encoder| {
///     use chrono::Datelike;
///     encoder.encode(&Parts { year: date.year(), day: date.ordinal() })
/// }));
///
/// let query = Query { at: Date(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()) };
/// assert_eq!(to_string_with_options(&query, &options).unwrap(), "at[year]=2024&at[day]=32");
/// ```
pub struct DateEncoder<'a> {
    options: &'a FormOptions,
    path: &'a Path,
    node: FormNode,
}

impl<'a> DateEncoder<'a> {
    fn new(options: &'a FormOptions, path: &'a Path) -> Self {
        DateEncoder {
            options,
            path,
            node: FormNode::new(),
        }
    }

    /// Encodes `value` in place of the date.
    ///
    /// # Errors
    ///
    /// Propagates any error raised while encoding `value`.
    pub fn encode<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let fragment = value.serialize(Serializer::new(self.options, self.path.clone()))?;
        if let Some(node) = fragment.into_node() {
            self.node = node;
        }
        Ok(())
    }

    /// The path at which the date is being written.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.path
    }

    /// User info of the current encode call, overrides included.
    #[must_use]
    pub fn user_info(&self) -> &UserInfo {
        &self.options.user_info
    }

    fn into_node(self) -> FormNode {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64, nanos: u32) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, nanos).unwrap()
    }

    #[test]
    fn test_seconds_whole_and_fractional() {
        assert_eq!(seconds_since_1970(&at(0, 0)), "0");
        assert_eq!(seconds_since_1970(&at(1, 0)), "1");
        assert_eq!(seconds_since_1970(&at(1, 500_000_000)), "1.5");
        assert_eq!(seconds_since_1970(&at(-1, 0)), "-1");
    }

    #[test]
    fn test_iso8601_drops_fraction() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(iso8601(&date), "2024-01-15T10:30:00Z");
        assert_eq!(iso8601(&at(1, 250_000_000)), "1970-01-01T00:00:01Z");
    }

    #[test]
    fn test_payload_round_trips_sub_second_precision() {
        let date = at(1_700_000_000, 123_456_789);
        let payload = date.to_rfc3339_opts(SecondsFormat::AutoSi, true);
        assert_eq!(parse_payload(&payload).unwrap(), date);
    }

    #[test]
    fn test_payload_rejects_garbage() {
        assert!(matches!(parse_payload("yesterday"), Err(Error::InvalidDate(_))));
    }

    #[test]
    fn test_date_is_plain_string_elsewhere() {
        let json = serde_json::to_string(&Date(at(1, 0))).unwrap();
        assert_eq!(json, "\"1970-01-01T00:00:01Z\"");
    }

    #[test]
    fn test_custom_strategy_sees_path_and_user_info() {
        let options = FormOptions::new()
            .with_user_info_entry("suffix", "!")
            .with_date_encoding(DateEncoding::custom(|date, encoder| {
                let suffix = encoder.user_info().get::<&str>("suffix").copied().unwrap_or("");
                let text = format!("{}@{}{}", date.timestamp(), encoder.path(), suffix);
                encoder.encode(&text)
            }));
        let path = Path::root().key("when");
        let node = encode_date(&options, &path, &at(5, 0)).unwrap();
        assert_eq!(node, FormNode::leaf("5%40when%21"));
    }
}
