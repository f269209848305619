//! The signature record embedded in a signed file.

use crate::marker::TIMESTAMP_FORMAT;
use chrono::{Local, NaiveDateTime, Timelike as _};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Identifier, content hash, and signing time of one `sign` call.
///
/// A fresh record is created on every signing, even when the body is
/// unchanged, so the identifier is never derived from content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureRecord {
    /// Random v4 UUID
    pub identifier: Uuid,

    /// Lowercase hex SHA-256 of the body
    pub content_hash: String,

    /// Local time, second precision
    #[serde(serialize_with = "serialize_timestamp")]
    pub signed_at: NaiveDateTime,
}

impl SignatureRecord {
    /// New record for `content_hash`, stamped with a random identifier and
    /// the current local time.
    pub fn new(content_hash: String) -> Self {
        let now = Local::now().naive_local();
        Self {
            identifier: Uuid::new_v4(),
            content_hash,
            signed_at: now.with_nanosecond(0).unwrap_or(now),
        }
    }

    /// Timestamp as written into the `_SIGNED_` marker.
    pub fn timestamp(&self) -> String {
        self.signed_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

impl fmt::Display for SignatureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SHA256: {}\nID: {}\nSigned: {}",
            self.content_hash,
            self.identifier,
            self.timestamp()
        )
    }
}

fn serialize_timestamp<S>(signed_at: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&signed_at.format(TIMESTAMP_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_record() -> SignatureRecord {
        SignatureRecord {
            identifier: Uuid::nil(),
            content_hash: "ab".repeat(32),
            signed_at: NaiveDate::from_ymd_opt(2025, 3, 14)
                .and_then(|d| d.and_hms_opt(9, 26, 53))
                .unwrap(),
        }
    }

    #[test]
    fn test_new_records_get_distinct_identifiers() {
        let a = SignatureRecord::new("00".to_owned());
        let b = SignatureRecord::new("00".to_owned());
        assert_ne!(a.identifier, b.identifier);
        assert_eq!(a.identifier.get_version_num(), 4);
    }

    #[test]
    fn test_timestamp_has_second_precision() {
        let record = SignatureRecord::new("00".to_owned());
        assert_eq!(record.signed_at.nanosecond(), 0);
        assert_eq!(record.timestamp().len(), "YYYY-MM-DD HH:MM:SS".len());
    }

    #[test]
    fn test_display() {
        let text = fixed_record().to_string();
        assert!(text.starts_with("SHA256: abab"));
        assert!(text.contains("ID: 00000000-0000-0000-0000-000000000000"));
        assert!(text.ends_with("Signed: 2025-03-14 09:26:53"));
    }

    #[test]
    fn test_serializes_marker_timestamp() {
        let json = serde_json::to_value(fixed_record()).unwrap();
        assert_eq!(json["signed_at"], "2025-03-14 09:26:53");
        assert_eq!(json["identifier"], "00000000-0000-0000-0000-000000000000");
    }
}
