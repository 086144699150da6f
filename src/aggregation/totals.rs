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

//! Incentive total computation for one recipient's ledger-entry group.

use rust_decimal::Decimal;

use crate::models::ledger::LedgerEntry;

/// The six additive incentive totals. A total with no contributing entries
/// is zero, not absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncentiveTotals {
    pub referral: Decimal,
    pub vehicle: Decimal,
    pub house: Decimal,
    pub travel: Decimal,
    pub training: Decimal,
    pub other: Decimal,
}

impl IncentiveTotals {
    /// Sums the non-null amount fields across a group of entries.
    pub fn from_entries(entries: &[LedgerEntry]) -> Self {
        let mut totals = IncentiveTotals::default();
        for entry in entries {
            if let Some(amount) = entry.referral_fee {
                totals.referral += amount;
            }
            if let Some(amount) = entry.vehicle_incentive {
                totals.vehicle += amount;
            }
            if let Some(amount) = entry.house_incentive {
                totals.house += amount;
            }
            if let Some(amount) = entry.travel_incentive {
                totals.travel += amount;
            }
            if let Some(amount) = entry.training_incentive {
                totals.training += amount;
            }
            if let Some(amount) = entry.other_incentive {
                totals.other += amount;
            }
        }
        totals
    }
}
