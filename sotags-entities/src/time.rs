use std::{fmt, str::FromStr};

use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime, UtcOffset};

/// A UTC point in time with millisecond precision.
///
/// The precision matches the persistent representation, i.e.
/// a timestamp survives a round trip through the database
/// without losing information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

#[derive(Debug, Error)]
#[error("timestamp out of range: {0}")]
pub struct OutOfRangeError(pub i64);

#[derive(Debug, Error)]
#[error(transparent)]
pub struct ParseError(#[from] time::error::Parse);

impl Timestamp {
    pub fn now() -> Self {
        Self::truncated(OffsetDateTime::now_utc())
    }

    pub fn try_from_millis(millis: i64) -> Result<Self, OutOfRangeError> {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
            .map(Self)
            .map_err(|_| OutOfRangeError(millis))
    }

    pub fn as_millis(self) -> i64 {
        // Every representable date fits into 64 bits when counted in milliseconds.
        (self.0.unix_timestamp_nanos() / 1_000_000) as i64
    }

    pub fn as_offset_date_time(self) -> OffsetDateTime {
        self.0
    }

    fn truncated(dt: OffsetDateTime) -> Self {
        let dt = dt.to_offset(UtcOffset::UTC);
        let millis = u32::from(dt.millisecond());
        Self(dt.replace_nanosecond(millis * 1_000_000).unwrap_or(dt))
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(from: OffsetDateTime) -> Self {
        Self::truncated(from)
    }
}

impl From<Timestamp> for OffsetDateTime {
    fn from(from: Timestamp) -> Self {
        from.0
    }
}

impl FromStr for Timestamp {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(OffsetDateTime::parse(s, &Rfc3339)?.into())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let formatted = self.0.format(&Rfc3339).map_err(|_| fmt::Error)?;
        f.write_str(&formatted)
    }
}
