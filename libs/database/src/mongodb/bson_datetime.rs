//! Serde adapter for `DateTime<Utc>` fields stored in MongoDB.
//!
//! Binary (BSON) serializers get a native BSON date so range queries compare
//! instants. Human-readable formats such as JSON keep chrono's RFC 3339 form,
//! so API payloads are unchanged.
//!
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! struct Event {
//!     #[serde(with = "database::mongodb::bson_datetime")]
//!     start_time: DateTime<Utc>,
//!     #[serde(default, with = "database::mongodb::bson_datetime::optional")]
//!     checked_in_at: Option<DateTime<Utc>>,
//! }
//! ```

use chrono::{DateTime, Utc};
use mongodb::bson;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if serializer.is_human_readable() {
        value.serialize(serializer)
    } else {
        bson::DateTime::from_millis(value.timestamp_millis()).serialize(serializer)
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    if deserializer.is_human_readable() {
        DateTime::<Utc>::deserialize(deserializer)
    } else {
        let stored = bson::DateTime::deserialize(deserializer)?;
        DateTime::from_timestamp_millis(stored.timestamp_millis())
            .ok_or_else(|| D::Error::custom("BSON date out of range"))
    }
}

/// Same as the parent module for `Option<DateTime<Utc>>`; `None` is BSON null.
pub mod optional {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(transparent)]
    struct Wrapped(#[serde(with = "super")] DateTime<Utc>);

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.map(Wrapped).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(at)| at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mongodb::bson::{Bson, Document, from_slice, to_raw_document_buf};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Slot {
        #[serde(with = "crate::mongodb::bson_datetime")]
        start: DateTime<Utc>,
        #[serde(default, with = "crate::mongodb::bson_datetime::optional")]
        checked_in_at: Option<DateTime<Utc>>,
    }

    fn slot() -> Slot {
        Slot {
            start: Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap(),
            checked_in_at: Some(Utc.with_ymd_and_hms(2025, 6, 1, 18, 5, 0).unwrap()),
        }
    }

    #[test]
    fn test_bson_stores_native_dates() {
        let raw = to_raw_document_buf(&slot()).unwrap();
        let doc = Document::try_from(raw.clone()).unwrap();

        assert!(matches!(doc.get("start"), Some(Bson::DateTime(_))));
        assert!(matches!(doc.get("checked_in_at"), Some(Bson::DateTime(_))));

        let back: Slot = from_slice(raw.as_bytes()).unwrap();
        assert_eq!(back, slot());
    }

    #[test]
    fn test_json_keeps_rfc3339() {
        let json = serde_json::to_value(slot()).unwrap();
        assert_eq!(json["start"], "2025-06-01T18:00:00Z");

        let back: Slot = serde_json::from_value(json).unwrap();
        assert_eq!(back, slot());
    }

    #[test]
    fn test_missing_optional_is_none() {
        let slot: Slot = serde_json::from_str(r#"{"start":"2025-06-01T18:00:00Z"}"#).unwrap();
        assert!(slot.checked_in_at.is_none());
    }
}
