//! Warranty Status Module
//!
//! Classifies a warranty by how many calendar days remain until it ends.
//! Every view that shows a warranty goes through [`derive_status`], so the
//! dashboard, list rows and detail pages always agree.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

// == Public Constants ==
/// Inclusive upper bound of the "expiring soon" band, in days
pub const EXPIRING_SOON_DAYS: i64 = 30;

// == Warranty Status ==
/// Lifecycle stage of a warranty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarrantyStatus {
    /// More than 30 days left
    Active,
    /// Between 0 and 30 days left, inclusive
    ExpiringSoon,
    /// End date is in the past
    Expired,
    /// No end date, or one that could not be read
    Unknown,
}

impl WarrantyStatus {
    /// Classifies a day count.
    pub fn from_days_remaining(days: i64) -> Self {
        if days < 0 {
            WarrantyStatus::Expired
        } else if days <= EXPIRING_SOON_DAYS {
            WarrantyStatus::ExpiringSoon
        } else {
            WarrantyStatus::Active
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WarrantyStatus::Active => "active",
            WarrantyStatus::ExpiringSoon => "expiring-soon",
            WarrantyStatus::Expired => "expired",
            WarrantyStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for WarrantyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Status Report ==
/// The derived status of one warranty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: WarrantyStatus,
    /// Whole days from today until the end date; negative once expired
    pub days_remaining: Option<i64>,
}

impl StatusReport {
    pub fn unknown() -> Self {
        Self {
            status: WarrantyStatus::Unknown,
            days_remaining: None,
        }
    }

    fn from_days(days: i64) -> Self {
        Self {
            status: WarrantyStatus::from_days_remaining(days),
            days_remaining: Some(days),
        }
    }

    /// Orders reports so the most urgent comes first.
    ///
    /// Warranties with a known end date sort by days remaining, soonest (or
    /// longest expired) first. Unknown ones go last.
    pub fn urgency_cmp(&self, other: &Self) -> Ordering {
        match (self.days_remaining, other.days_remaining) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

// == Derive Status ==
/// Derives a warranty's status from its end date as seen at `now`.
///
/// Both dates are reduced to calendar days before subtracting, so the time
/// of day never matters. "Today" is `now`'s date in its own time zone.
/// A missing or unreadable `expiry` yields [`WarrantyStatus::Unknown`].
pub fn derive_status<Tz: TimeZone>(expiry: Option<&str>, now: &DateTime<Tz>) -> StatusReport {
    match expiry.and_then(parse_calendar_date) {
        Some(end) => StatusReport::from_days(days_between(now.date_naive(), end)),
        None => StatusReport::unknown(),
    }
}

/// Derives a warranty's status against the current UTC date.
pub fn derive_status_now(expiry: Option<&str>) -> StatusReport {
    derive_status(expiry, &Utc::now())
}

/// Whole calendar days from `today` to `end`.
pub fn days_between(today: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(today).num_days()
}

// == Date Parsing ==
/// Date-time layouts without an offset, `T` or space separated
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Date-time layouts carrying a numeric offset
const OFFSET_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Reads the calendar date out of an ISO-8601 date or date-time string.
///
/// Accepts `YYYY-MM-DD` and date-times with or without seconds, with a `T`
/// or space separator, and with a numeric offset, a `Z`, or nothing. The
/// date is the one written in the string, i.e. taken in its own offset.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.date_naive());
    }
    if let Some(date) = OFFSET_LAYOUTS
        .iter()
        .find_map(|layout| DateTime::parse_from_str(raw, layout).ok())
        .map(|instant| instant.date_naive())
    {
        return Some(date);
    }

    // A trailing `Z` is a zero offset, so the written date is the UTC date
    let local = raw.strip_suffix(['Z', 'z']).unwrap_or(raw);
    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(local, layout).ok())
        .map(|naive| naive.date())
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        // Arbitrary strings never panic and unreadable ones map to unknown.
        #[test]
        fn prop_total_over_strings(raw in ".{0,40}", secs in 0i64..4_000_000_000) {
            let now = DateTime::from_timestamp(secs, 0).unwrap();
            let report = derive_status(Some(raw.as_str()), &now);
            prop_assert_eq!(
                report.days_remaining.is_none(),
                report.status == WarrantyStatus::Unknown
            );
        }

        // Status is a function of days remaining alone.
        #[test]
        fn prop_status_matches_days(offset in -3_650i64..3_650) {
            let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
            let end = now.date_naive() + chrono::Duration::days(offset);
            let report = derive_status(Some(end.format("%Y-%m-%d").to_string().as_str()), &now);

            prop_assert_eq!(report.days_remaining, Some(offset));
            prop_assert_eq!(report.status, WarrantyStatus::from_days_remaining(offset));
        }

        // Identical inputs give identical outputs.
        #[test]
        fn prop_deterministic(raw in "20[0-9]{2}-[01][0-9]-[0-3][0-9]", secs in 0i64..4_000_000_000) {
            let now = DateTime::from_timestamp(secs, 0).unwrap();
            prop_assert_eq!(derive_status(Some(raw.as_str()), &now), derive_status(Some(raw.as_str()), &now));
        }
    }
}
