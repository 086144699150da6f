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

//! Yearly summary record: one row per (recipient id, receiver type, year),
//! holding the aggregated incentive totals that feed CP58 rendering.
//!
//! A summary is created on first aggregation for its key and overwritten in
//! place on re-runs. Totals are recomputed from source every run, never
//! accumulated, which is what makes aggregation idempotent.

use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::database::types::{blob_to_uuid, string_to_decimal};
use crate::models::receiver::ReceiverType;

/// Residency marker derived from the recipient's address country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Residency {
    Resident,
    NonResident,
}

impl Residency {
    /// Storage code: 1 = resident, 2 = non-resident.
    pub fn code(&self) -> i32 {
        match self {
            Residency::Resident => 1,
            Residency::NonResident => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Residency::Resident),
            2 => Some(Residency::NonResident),
            _ => None,
        }
    }
}

/// A persisted yearly summary record.
#[derive(Debug, Clone)]
pub struct Cp58Summary {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub recipient_code: String,
    pub recipient_name: String,
    pub recipient_type: ReceiverType,
    pub identification_no: Option<String>,
    pub income_tax_no: Option<String>,
    pub business_registration_no: Option<String>,
    pub resident: Option<Residency>,
    pub recipient_address: Option<String>,
    pub total_referral: Option<Decimal>,
    pub total_vehicle: Option<Decimal>,
    pub total_house: Option<Decimal>,
    pub total_travel: Option<Decimal>,
    pub total_training: Option<Decimal>,
    pub total_other: Option<Decimal>,
    pub years: i32,
}

/// Field set written by an aggregation upsert. The (recipient_id,
/// recipient_type, years) triple is the upsert key.
#[derive(Debug, Clone)]
pub struct NewCp58Summary {
    pub recipient_id: Uuid,
    pub recipient_code: String,
    pub recipient_name: String,
    pub recipient_type: ReceiverType,
    pub identification_no: Option<String>,
    pub income_tax_no: Option<String>,
    pub business_registration_no: Option<String>,
    pub resident: Option<Residency>,
    pub recipient_address: Option<String>,
    pub total_referral: Option<Decimal>,
    pub total_vehicle: Option<Decimal>,
    pub total_house: Option<Decimal>,
    pub total_travel: Option<Decimal>,
    pub total_training: Option<Decimal>,
    pub total_other: Option<Decimal>,
    pub years: i32,
}

/// Row form of [`Cp58Summary`].
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = crate::database::schema::cp58_summaries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Cp58SummaryRow {
    pub id: Vec<u8>,
    pub recipient_id: Vec<u8>,
    pub recipient_code: String,
    pub recipient_name: String,
    pub recipient_type: String,
    pub identification_no: Option<String>,
    pub income_tax_no: Option<String>,
    pub business_registration_no: Option<String>,
    pub resident_code: Option<i32>,
    pub recipient_address: Option<String>,
    pub total_referral: Option<String>,
    pub total_vehicle: Option<String>,
    pub total_house: Option<String>,
    pub total_travel: Option<String>,
    pub total_training: Option<String>,
    pub total_other: Option<String>,
    pub years: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::database::schema::cp58_summaries)]
pub struct NewCp58SummaryRow {
    pub id: Vec<u8>,
    pub recipient_id: Vec<u8>,
    pub recipient_code: String,
    pub recipient_name: String,
    pub recipient_type: String,
    pub identification_no: Option<String>,
    pub income_tax_no: Option<String>,
    pub business_registration_no: Option<String>,
    pub resident_code: Option<i32>,
    pub recipient_address: Option<String>,
    pub total_referral: Option<String>,
    pub total_vehicle: Option<String>,
    pub total_house: Option<String>,
    pub total_travel: Option<String>,
    pub total_training: Option<String>,
    pub total_other: Option<String>,
    pub years: i32,
    pub created_at: String,
    pub updated_at: String,
}

fn opt_decimal(text: Option<String>) -> Option<Decimal> {
    text.map(|s| string_to_decimal(&s).expect("Invalid amount in database"))
}

impl From<Cp58SummaryRow> for Cp58Summary {
    fn from(row: Cp58SummaryRow) -> Self {
        Cp58Summary {
            id: blob_to_uuid(&row.id).expect("Invalid UUID in database"),
            recipient_id: blob_to_uuid(&row.recipient_id).expect("Invalid UUID in database"),
            recipient_code: row.recipient_code,
            recipient_name: row.recipient_name,
            recipient_type: ReceiverType::from_tag(&row.recipient_type)
                .expect("unrecognized receiver type in database"),
            identification_no: row.identification_no,
            income_tax_no: row.income_tax_no,
            business_registration_no: row.business_registration_no,
            resident: row.resident_code.map(|c| {
                Residency::from_code(c).expect("unrecognized residency code in database")
            }),
            recipient_address: row.recipient_address,
            total_referral: opt_decimal(row.total_referral),
            total_vehicle: opt_decimal(row.total_vehicle),
            total_house: opt_decimal(row.total_house),
            total_travel: opt_decimal(row.total_travel),
            total_training: opt_decimal(row.total_training),
            total_other: opt_decimal(row.total_other),
            years: row.years,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_residency_codes() {
        assert_eq!(Residency::Resident.code(), 1);
        assert_eq!(Residency::NonResident.code(), 2);
        assert_eq!(Residency::from_code(1), Some(Residency::Resident));
        assert_eq!(Residency::from_code(2), Some(Residency::NonResident));
        assert_eq!(Residency::from_code(0), None);
    }
}
