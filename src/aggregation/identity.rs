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

//! Identity helpers: tax-number splitting, address formatting and residency
//! determination from the loosely structured JSON address payloads.

use serde_json::Value;
use thiserror::Error;

use crate::models::summary::Residency;

/// Failure to interpret an address payload.
#[derive(Debug, Error)]
pub enum AddressError {
    #[error("address payload is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("address payload is not a JSON object")]
    NotAnObject,
}

/// Splits a raw tax-identification string into (prefix, number).
///
/// A literal `C1` prefix is split positionally; otherwise letters (in
/// order) form the prefix and digits (in order) the number, with any other
/// character dropped.
pub fn split_tax_number(raw: &str) -> (String, String) {
    if let Some(rest) = raw.strip_prefix("C1") {
        return ("C1".to_string(), rest.to_string());
    }

    let mut letters = String::new();
    let mut digits = String::new();
    for c in raw.chars() {
        if c.is_alphabetic() {
            letters.push(c);
        } else if c.is_ascii_digit() {
            digits.push(c);
        }
    }
    (letters, digits)
}

const KNOWN_KEYS: [&str; 6] = [
    "addressLine1",
    "addressLine2",
    "city",
    "state",
    "postcode",
    "country",
];

fn field(map: &serde_json::Map<String, Value>, key: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

/// Formats a JSON address payload into a single display line.
///
/// Non-empty components are joined with `", "` in the fixed order
/// [line1, line2, city, state, postcode, country, catch-all]; the catch-all
/// is the value of any key outside the known set (last one wins).
pub fn format_address(json_address: &str) -> Result<String, AddressError> {
    let value: Value = serde_json::from_str(json_address)?;
    let map = value.as_object().ok_or(AddressError::NotAnObject)?;

    let mut extra = String::new();
    for (key, value) in map {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            if let Some(s) = value.as_str() {
                extra = s.trim().to_string();
            }
        }
    }

    let components = [
        field(map, "addressLine1"),
        field(map, "addressLine2"),
        field(map, "city"),
        field(map, "state"),
        field(map, "postcode"),
        field(map, "country"),
        extra,
    ];

    Ok(components
        .iter()
        .filter(|c| !c.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", "))
}

/// Determines residency from the address country, compared case-insensitively
/// against the configured home country. A missing country field means
/// non-resident; an unparseable payload is an error.
pub fn residency(json_address: &str, home_country: &str) -> Result<Residency, AddressError> {
    let value: Value = serde_json::from_str(json_address)?;
    let map = value.as_object().ok_or(AddressError::NotAnObject)?;

    let country = map.get("country").and_then(Value::as_str);
    match country {
        Some(c) if c.trim().eq_ignore_ascii_case(home_country) => Ok(Residency::Resident),
        _ => Ok(Residency::NonResident),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_tax_number_c1_prefix() {
        assert_eq!(
            split_tax_number("C12023"),
            ("C1".to_string(), "2023".to_string())
        );
    }

    #[test]
    fn test_split_tax_number_scan() {
        assert_eq!(
            split_tax_number("SG123AB45"),
            ("SGAB".to_string(), "12345".to_string())
        );
    }

    #[test]
    fn test_split_tax_number_drops_other_characters() {
        assert_eq!(
            split_tax_number("SG 123-AB/45"),
            ("SGAB".to_string(), "12345".to_string())
        );
    }

    #[test]
    fn test_split_tax_number_empty() {
        assert_eq!(split_tax_number(""), (String::new(), String::new()));
    }

    #[test]
    fn test_format_address_skips_empty_components() {
        let json = r#"{"addressLine1": "1 Main St", "city": "KL", "country": "MALAYSIA"}"#;
        assert_eq!(format_address(json).unwrap(), "1 Main St, KL, MALAYSIA");
    }

    #[test]
    fn test_format_address_full_order() {
        let json = r#"{
            "country": "MALAYSIA",
            "addressLine2": "Taman Indah",
            "addressLine1": "1 Main St",
            "postcode": "50000",
            "state": "WP",
            "city": "KL",
            "landmark": "near the tower"
        }"#;
        assert_eq!(
            format_address(json).unwrap(),
            "1 Main St, Taman Indah, KL, WP, 50000, MALAYSIA, near the tower"
        );
    }

    #[test]
    fn test_format_address_all_missing_is_empty() {
        assert_eq!(format_address("{}").unwrap(), "");
    }

    #[test]
    fn test_format_address_rejects_garbage() {
        assert!(format_address("not json").is_err());
        assert!(matches!(
            format_address("[1, 2]"),
            Err(AddressError::NotAnObject)
        ));
    }

    #[test]
    fn test_residency_case_insensitive() {
        let home = "MALAYSIA";
        for country in ["MALAYSIA", "Malaysia", "malaysia"] {
            let json = format!(r#"{{"country": "{}"}}"#, country);
            assert_eq!(residency(&json, home).unwrap(), Residency::Resident);
        }
    }

    #[test]
    fn test_residency_other_or_missing_country() {
        assert_eq!(
            residency(r#"{"country": "Singapore"}"#, "MALAYSIA").unwrap(),
            Residency::NonResident
        );
        assert_eq!(
            residency("{}", "MALAYSIA").unwrap(),
            Residency::NonResident
        );
    }

    #[test]
    fn test_residency_unparseable_address_is_error() {
        assert!(residency("oops", "MALAYSIA").is_err());
    }
}
