use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, de};
use std::time::Duration;

/// Construct a `DateTime<Utc>` from a `Duration` since the unix epoch.
pub fn datetime_utc_from_epoch_duration(duration: Duration) -> DateTime<Utc> {
    DateTime::<Utc>::from(std::time::UNIX_EPOCH + duration)
}

/// `f64` field that upstream feeds deliver as either a JSON number or a
/// numeric string.
///
/// An empty string is the feed's "no data" sentinel and decodes to `0.0` so
/// the completeness filter can drop the row; any other non-numeric string is
/// a contract violation and fails the deserializer.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug)]
pub struct FlexibleF64(pub f64);

impl<'de> Deserialize<'de> for FlexibleF64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NumOrStr {
            Num(f64),
            Text(String),
        }

        match NumOrStr::deserialize(deserializer)? {
            NumOrStr::Num(value) => Ok(FlexibleF64(value)),
            NumOrStr::Text(text) if text.is_empty() => Ok(FlexibleF64(0.0)),
            NumOrStr::Text(text) => text.parse().map(FlexibleF64).map_err(de::Error::custom),
        }
    }
}

/// `u64` epoch-millisecond timestamp delivered as either a JSON number or a
/// numeric string. An empty string decodes to `0`, the "no data" sentinel.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct FlexibleU64(pub u64);

impl<'de> Deserialize<'de> for FlexibleU64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NumOrStr {
            Num(u64),
            Text(String),
        }

        match NumOrStr::deserialize(deserializer)? {
            NumOrStr::Num(value) => Ok(FlexibleU64(value)),
            NumOrStr::Text(text) if text.is_empty() => Ok(FlexibleU64(0)),
            NumOrStr::Text(text) => text.parse().map(FlexibleU64).map_err(de::Error::custom),
        }
    }
}
