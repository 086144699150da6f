/*
 *  Copyright 2025 Colliery Software
 *
 *  Licensed under the Apache License, Version 2.0 (the "License");
 *  you may not use this file except in compliance with the License.
 *  You may obtain a copy of the License at
 *
 *      http://www.apache.org/licenses/LICENSE-2.0
 *
 *  Unless required by applicable law or agreed to in writing, software
 *  distributed under the License is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  See the License for the specific language governing permissions and
 *  limitations under the License.
 */

//! Conversion helpers between SQLite column representations and domain types.
//!
//! UUIDs round-trip through BLOB (`Vec<u8>`), timestamps through RFC3339
//! strings, and monetary amounts through their canonical decimal string form.
//! Row models call these at the DAL boundary; a malformed value in the
//! database is treated as corruption.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

/// Convert a UUID to SQLite BLOB format (Vec<u8>)
pub fn uuid_to_blob(uuid: &Uuid) -> Vec<u8> {
    uuid.as_bytes().to_vec()
}

/// Convert SQLite BLOB to UUID
pub fn blob_to_uuid(blob: &[u8]) -> Result<Uuid, uuid::Error> {
    Uuid::from_slice(blob)
}

/// Convert DateTime<Utc> to RFC3339 string for SQLite storage
pub fn datetime_to_string(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Parse RFC3339 string from SQLite to DateTime<Utc>
pub fn string_to_datetime(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// Current timestamp as RFC3339 string
pub fn current_timestamp_string() -> String {
    Utc::now().to_rfc3339()
}

/// Convert a decimal amount to its TEXT storage form
pub fn decimal_to_string(d: &Decimal) -> String {
    d.to_string()
}

/// Parse a TEXT amount from SQLite into a decimal
pub fn string_to_decimal(s: &str) -> Result<Decimal, rust_decimal::Error> {
    Decimal::from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    #[test]
    fn test_uuid_blob_round_trip() {
        let id = Uuid::new_v4();
        let blob = uuid_to_blob(&id);
        assert_eq!(blob.len(), 16);
        assert_eq!(blob_to_uuid(&blob).unwrap(), id);
    }

    #[test]
    fn test_blob_to_uuid_rejects_short_blob() {
        assert!(blob_to_uuid(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_datetime_round_trip() {
        let now = Utc::now();
        let s = datetime_to_string(&now);
        let back = string_to_datetime(&s).unwrap();
        assert_eq!(now.timestamp_micros(), back.timestamp_micros());
    }

    #[test]
    fn test_decimal_round_trip() {
        let amount = Decimal::from_f64(1234.56).unwrap();
        let s = decimal_to_string(&amount);
        assert_eq!(string_to_decimal(&s).unwrap(), amount);
    }

    #[test]
    fn test_string_to_decimal_rejects_garbage() {
        assert!(string_to_decimal("not-a-number").is_err());
    }
}
