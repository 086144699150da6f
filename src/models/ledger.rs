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

//! Ledger entry model: one raw incentive row per recipient per processing
//! run. Entries are read-only input to the aggregation engine.

use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::database::types::{blob_to_uuid, string_to_decimal};

/// Which of the three recipient links an entry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientKind {
    Adviser,
    Affiliate,
    Company,
}

/// One raw incentive/commission ledger row.
///
/// Invariant: at most one of the recipient links is set; an entry with none
/// set is silently dropped by aggregation.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub adviser_id: Option<Uuid>,
    pub affiliate_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub entry_year: i32,
    pub referral_fee: Option<Decimal>,
    pub vehicle_incentive: Option<Decimal>,
    pub house_incentive: Option<Decimal>,
    pub travel_incentive: Option<Decimal>,
    pub training_incentive: Option<Decimal>,
    pub other_incentive: Option<Decimal>,
}

impl LedgerEntry {
    /// Resolves the recipient-kind discriminator, probing the links in the
    /// fixed adviser / affiliate / company order.
    pub fn recipient_kind(&self) -> Option<(RecipientKind, Uuid)> {
        if let Some(id) = self.adviser_id {
            Some((RecipientKind::Adviser, id))
        } else if let Some(id) = self.affiliate_id {
            Some((RecipientKind::Affiliate, id))
        } else {
            self.company_id.map(|id| (RecipientKind::Company, id))
        }
    }
}

/// Row form of [`LedgerEntry`].
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = crate::database::schema::ledger_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LedgerEntryRow {
    pub id: Vec<u8>,
    pub adviser_id: Option<Vec<u8>>,
    pub affiliate_id: Option<Vec<u8>>,
    pub company_id: Option<Vec<u8>>,
    pub entry_year: i32,
    pub referral_fee: Option<String>,
    pub vehicle_incentive: Option<String>,
    pub house_incentive: Option<String>,
    pub travel_incentive: Option<String>,
    pub training_incentive: Option<String>,
    pub other_incentive: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

fn opt_uuid(blob: Option<Vec<u8>>) -> Option<Uuid> {
    blob.map(|b| blob_to_uuid(&b).expect("Invalid UUID in database"))
}

fn opt_decimal(text: Option<String>) -> Option<Decimal> {
    text.map(|s| string_to_decimal(&s).expect("Invalid amount in database"))
}

impl From<LedgerEntryRow> for LedgerEntry {
    fn from(row: LedgerEntryRow) -> Self {
        LedgerEntry {
            id: blob_to_uuid(&row.id).expect("Invalid UUID in database"),
            adviser_id: opt_uuid(row.adviser_id),
            affiliate_id: opt_uuid(row.affiliate_id),
            company_id: opt_uuid(row.company_id),
            entry_year: row.entry_year,
            referral_fee: opt_decimal(row.referral_fee),
            vehicle_incentive: opt_decimal(row.vehicle_incentive),
            house_incentive: opt_decimal(row.house_incentive),
            travel_incentive: opt_decimal(row.travel_incentive),
            training_incentive: opt_decimal(row.training_incentive),
            other_incentive: opt_decimal(row.other_incentive),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> LedgerEntry {
        LedgerEntry {
            id: Uuid::new_v4(),
            adviser_id: None,
            affiliate_id: None,
            company_id: None,
            entry_year: 2024,
            referral_fee: None,
            vehicle_incentive: None,
            house_incentive: None,
            travel_incentive: None,
            training_incentive: None,
            other_incentive: None,
        }
    }

    #[test]
    fn test_unlinked_entry_has_no_kind() {
        assert!(entry().recipient_kind().is_none());
    }

    #[test]
    fn test_kind_probes_in_fixed_order() {
        let adviser = Uuid::new_v4();
        let mut e = entry();
        e.adviser_id = Some(adviser);
        e.company_id = Some(Uuid::new_v4());
        assert_eq!(e.recipient_kind(), Some((RecipientKind::Adviser, adviser)));

        let company = Uuid::new_v4();
        let mut e = entry();
        e.company_id = Some(company);
        assert_eq!(e.recipient_kind(), Some((RecipientKind::Company, company)));
    }
}
