//! Request DTOs for the Warrity service
//!
//! Defines the structure of incoming HTTP request bodies.

use chrono::{DateTime, FixedOffset, NaiveTime, Utc};
use serde::Deserialize;

use crate::cache::MAX_KEY_LENGTH;
use crate::models::Warranty;
use crate::status::parse_calendar_date;

/// Request body for storing a cached payload (PUT /cache)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key, normally built as `<resource>_<id>_<token-prefix>`
    pub key: String,
    /// Any JSON payload
    pub value: serde_json::Value,
    /// Optional TTL in seconds (uses the default if not specified)
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        None
    }
}

/// Request body for deriving one status (POST /status)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusRequest {
    /// The warranty end date; missing or malformed values yield `unknown`
    #[serde(default)]
    pub expiry_date: Option<String>,
    /// Reference instant; defaults to the current time
    #[serde(default)]
    pub now: Option<String>,
}

/// Request body for the dashboard summary (POST /warranties/summary)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub warranties: Vec<Warranty>,
    /// Reference instant; defaults to the current time
    #[serde(default)]
    pub now: Option<String>,
}

/// Resolves an optional caller-supplied "now".
///
/// Accepts RFC 3339 date-times, kept in their own offset so "today" is the
/// caller's local date, or plain dates (taken as UTC midnight).
/// Unlike warranty dates, a malformed `now` is a caller error.
pub fn resolve_now(raw: Option<&str>) -> Result<DateTime<FixedOffset>, String> {
    let Some(raw) = raw else {
        return Ok(Utc::now().fixed_offset());
    };
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw.trim()) {
        return Ok(instant);
    }
    parse_calendar_date(raw)
        .map(|date| date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
        .ok_or_else(|| format!("Unreadable 'now' value: {}", raw))
}
