use std::borrow::Cow;

use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc,
};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ValidationError;

/// `2025-08-15T21` or `2025-08-15 21+02:00`: hour given, minutes left out.
static HOUR_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2}[T ]\d{2})([+-]\d{2}:\d{2})?$").expect("valid hour pattern")
});

/// Date-time layouts carrying a UTC offset, tried after RFC 3339.
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Date-time layouts accepted when no UTC offset is present.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A parsed ISO-8601 timestamp. Entries written without an offset are local time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Timestamp {
    Local(NaiveDateTime),
    Offset(DateTime<FixedOffset>),
}

impl Timestamp {
    /// Parses `2025-08-15T21:00:00`, `2025-08-15 21:00`, `2025-08-15T21:00:00+02:00`,
    /// `2025-08-15T21:03+02:00`, `2025-08-15T21Z` or a bare `2025-08-15` (midnight).
    pub fn parse(input: &str) -> Option<Self> {
        let input: &str = &normalize(input.trim());
        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Some(Timestamp::Offset(dt));
        }
        for format in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(input, format) {
                return Some(Timestamp::Offset(dt));
            }
        }
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
                return Some(Timestamp::Local(naive));
            }
        }
        NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(Timestamp::Local)
    }

    pub fn now() -> Self {
        Timestamp::Local(Local::now().naive_local())
    }

    /// Canonical ISO-8601 rendering with second precision.
    pub fn to_iso(&self) -> String {
        match self {
            Timestamp::Local(naive) => naive.format("%Y-%m-%dT%H:%M:%S").to_string(),
            Timestamp::Offset(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, false),
        }
    }

    /// Instant used for chronological ordering.
    pub fn instant(&self) -> DateTime<Utc> {
        match self {
            Timestamp::Offset(dt) => dt.with_timezone(&Utc),
            Timestamp::Local(naive) => Local
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|| naive.and_utc()),
        }
    }
}

/// Spells a trailing `Z` as `+00:00` and fills in `:00` minutes after a bare hour.
fn normalize(input: &str) -> Cow<'_, str> {
    let input: Cow<'_, str> = match input.strip_suffix(['Z', 'z']) {
        Some(rest) if rest.len() > "YYYY-MM-DD".len() => Cow::Owned(format!("{rest}+00:00")),
        _ => Cow::Borrowed(input),
    };
    match HOUR_ONLY.captures(&input) {
        Some(caps) => {
            let offset = caps.get(2).map_or("", |m| m.as_str());
            Cow::Owned(format!("{}:00{}", &caps[1], offset))
        }
        None => input,
    }
}

/// Validates a caller supplied timestamp, or stamps the current local time.
pub fn resolve_timestamp(input: Option<&str>) -> Result<String, ValidationError> {
    match input {
        Some(raw) => Timestamp::parse(raw)
            .map(|ts| ts.to_iso())
            .ok_or_else(|| ValidationError::InvalidTimestamp {
                input: raw.to_string(),
            }),
        None => Ok(Timestamp::now().to_iso()),
    }
}
