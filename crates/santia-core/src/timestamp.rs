//! Lenient reading of stored instants.
//!
//! Documents written by this service carry RFC 3339 text, but the
//! collections may also hold naive ISO-8601 text (no offset, meaning UTC)
//! or epoch milliseconds. All three rehydrate to the same [`Timestamp`].

use jiff::tz::TimeZone;
use jiff::Timestamp;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredInstant {
    Text(String),
    Millis(i64),
}

/// Serde `deserialize_with` adapter for [`Timestamp`] fields.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    match StoredInstant::deserialize(deserializer)? {
        StoredInstant::Text(text) => parse_text(&text).map_err(D::Error::custom),
        StoredInstant::Millis(ms) => Timestamp::from_millisecond(ms).map_err(D::Error::custom),
    }
}

/// Parse ISO-8601 text into an instant. Text without an offset is UTC.
pub fn parse_text(text: &str) -> Result<Timestamp, jiff::Error> {
    match text.parse::<Timestamp>() {
        Ok(ts) => Ok(ts),
        Err(err) => match text.parse::<jiff::civil::DateTime>() {
            Ok(naive) => naive.to_zoned(TimeZone::UTC).map(|zoned| zoned.timestamp()),
            Err(_) => Err(err),
        },
    }
}
