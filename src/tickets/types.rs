//! Core ticket types
//!
//! - `Ticket`: a support request record as served by the ticket API
//! - `TicketCreate` / `TicketUpdate`: request payloads for the store
//!
//! Wire parsing is lenient about identifiers and timestamps so the dashboard
//! can read ticket lists produced by other backends.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Maximum length for ticket title and status
pub const MAX_FIELD_LEN: usize = 200;

/// A support ticket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    /// Unique identifier
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    /// Short summary shown in the dashboard
    #[serde(default)]
    pub title: String,
    /// Free-form status label ("Open", "Pending", "Resolved", ...)
    pub status: String,
    /// Additional details
    #[serde(default)]
    pub details: String,
    /// Creation instant (UTC)
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_date: DateTime<Utc>,
    /// Last modification instant (UTC)
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub updated_date: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Create a ticket created at the given instant
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        status: impl Into<String>,
        created_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: status.into(),
            details: String::new(),
            created_date,
            updated_date: None,
        }
    }

    /// Builder method: set details
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Calendar day of creation in UTC
    pub fn created_day(&self) -> NaiveDate {
        self.created_date.date_naive()
    }
}

/// Payload for creating a ticket
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketCreate {
    /// Requested identifier; empty means "generate one"
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub status: String,
    #[serde(default)]
    pub details: Option<String>,
}

impl TicketCreate {
    pub fn new(title: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            status: status.into(),
            details: None,
        }
    }

    /// Builder method: set an explicit id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Builder method: set details
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Partial update of a ticket; absent fields are left as they are
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        None => String::new(),
        Some(RawId::Text(s)) => s,
        Some(RawId::Number(n)) => n.to_string(),
    })
}

/// Timestamp parsing shared by the ticket record and the dashboard
pub mod timestamp {
    use super::*;

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    /// Parse a timestamp in any accepted wire form.
    ///
    /// RFC 3339 values are converted to UTC; naive date-times and bare dates
    /// are taken to be UTC already.
    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(naive.and_utc());
            }
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// Wire forms a timestamp may take
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Text(String),
        Millis(i64),
        FractionalMillis(f64),
    }

    fn from_raw<E: de::Error>(raw: RawTimestamp) -> Result<DateTime<Utc>, E> {
        match raw {
            RawTimestamp::Text(text) => parse(&text)
                .ok_or_else(|| E::custom(format!("invalid timestamp: {text:?}"))),
            RawTimestamp::Millis(ms) => from_millis(ms),
            RawTimestamp::FractionalMillis(ms) => from_millis(ms.trunc() as i64),
        }
    }

    fn from_millis<E: de::Error>(ms: i64) -> Result<DateTime<Utc>, E> {
        DateTime::from_timestamp_millis(ms)
            .ok_or_else(|| E::custom(format!("timestamp out of range: {ms}ms")))
    }

    /// Strings go through [`parse`], numbers are Unix epoch milliseconds and
    /// `null` is the epoch itself.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawTimestamp>::deserialize(deserializer)? {
            None => Ok(DateTime::<Utc>::default()),
            Some(raw) => from_raw(raw),
        }
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawTimestamp>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawTimestamp::Text(raw)) if raw.trim().is_empty() => Ok(None),
            Some(raw) => from_raw(raw).map(Some),
        }
    }
}
