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

//! Aggregation engine: folds one year's ledger entries into yearly summary
//! records, one per (recipient, receiver type).
//!
//! Entries are partitioned by their recipient link, grouped by recipient id,
//! summed into [`IncentiveTotals`](totals::IncentiveTotals) and upserted as
//! summaries keyed on the prior year. Every run recomputes totals from source,
//! so re-running a year is idempotent.

pub mod identity;
pub mod totals;

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use diesel::sqlite::SqliteConnection;
use tracing::{debug, info};
use uuid::Uuid;

use crate::dal;
use crate::error::PipelineError;
use crate::models::ledger::{LedgerEntry, RecipientKind};
use crate::models::receiver::ReceiverType;
use crate::models::summary::NewCp58Summary;

use identity::{format_address, residency};
use totals::IncentiveTotals;

/// Runs aggregation for the year containing `today`.
///
/// Summaries are stored under `today.year() - 1`, the year the statements
/// report on. Returns the number of summaries written.
pub fn run(
    conn: &mut SqliteConnection,
    today: NaiveDate,
    home_country: &str,
) -> Result<usize, PipelineError> {
    let run_year = today.year();
    let summary_year = run_year - 1;

    let entries = dal::ledger::find_by_entry_year(conn, run_year)?;
    info!(
        run_year,
        entry_count = entries.len(),
        "aggregating ledger entries"
    );

    let mut advisers: BTreeMap<Uuid, Vec<LedgerEntry>> = BTreeMap::new();
    let mut affiliates: BTreeMap<Uuid, Vec<LedgerEntry>> = BTreeMap::new();
    let mut companies: BTreeMap<Uuid, Vec<LedgerEntry>> = BTreeMap::new();

    for entry in entries {
        match entry.recipient_kind() {
            Some((RecipientKind::Adviser, id)) => advisers.entry(id).or_default().push(entry),
            Some((RecipientKind::Affiliate, id)) => affiliates.entry(id).or_default().push(entry),
            Some((RecipientKind::Company, id)) => companies.entry(id).or_default().push(entry),
            None => debug!(entry_id = %entry.id, "ledger entry has no recipient link, skipping"),
        }
    }

    let mut written = 0;
    for (id, group) in &advisers {
        upsert_adviser_summary(conn, *id, group, summary_year, home_country)?;
        written += 1;
    }
    for (id, group) in &affiliates {
        upsert_affiliate_summary(conn, *id, group, summary_year, home_country)?;
        written += 1;
    }
    for (id, group) in &companies {
        upsert_company_summary(conn, *id, group, summary_year, home_country)?;
        written += 1;
    }

    info!(summary_year, written, "aggregation complete");
    Ok(written)
}

fn upsert_adviser_summary(
    conn: &mut SqliteConnection,
    adviser_id: Uuid,
    group: &[LedgerEntry],
    summary_year: i32,
    home_country: &str,
) -> Result<(), PipelineError> {
    let adviser = dal::recipient::adviser_by_id(conn, adviser_id)?
        .ok_or_else(|| PipelineError::RecipientNotFound(adviser_id.to_string()))?;

    let receiver_type = dal::recipient::receiver_type_for(conn, adviser_id)?
        .ok_or_else(|| PipelineError::RecipientNotFound(adviser_id.to_string()))?;

    let totals = IncentiveTotals::from_entries(group);
    let address = format_address(&adviser.residential_address)?;
    let resident = residency(&adviser.residential_address, home_country)?;

    dal::summary::upsert(
        conn,
        NewCp58Summary {
            recipient_id: adviser.id,
            recipient_code: adviser.code,
            recipient_name: adviser.preferred_name,
            recipient_type: receiver_type,
            identification_no: adviser.identification_no,
            income_tax_no: adviser.income_tax_no,
            business_registration_no: None,
            resident: Some(resident),
            recipient_address: Some(address),
            total_referral: Some(totals.referral),
            total_vehicle: Some(totals.vehicle),
            total_house: Some(totals.house),
            total_travel: Some(totals.travel),
            total_training: None,
            total_other: Some(totals.other),
            years: summary_year,
        },
    )?;
    Ok(())
}

fn upsert_affiliate_summary(
    conn: &mut SqliteConnection,
    affiliate_id: Uuid,
    group: &[LedgerEntry],
    summary_year: i32,
    home_country: &str,
) -> Result<(), PipelineError> {
    let affiliate = dal::recipient::affiliate_by_id(conn, affiliate_id)?
        .ok_or_else(|| PipelineError::RecipientNotFound(affiliate_id.to_string()))?;

    let receiver_type = dal::recipient::receiver_type_for(conn, affiliate_id)?
        .ok_or_else(|| PipelineError::RecipientNotFound(affiliate_id.to_string()))?;
    let handle = affiliate
        .sub_role(receiver_type)
        .ok_or_else(|| PipelineError::InvalidRecipientType(receiver_type.to_string()))?
        .clone();

    let totals = IncentiveTotals::from_entries(group);
    let address = format_address(&affiliate.corresponding_address)?;
    let resident = residency(&affiliate.corresponding_address, home_country)?;

    // The referral-partner sub-role is the registered business; the other
    // sub-roles are individuals identified by the affiliate's own number.
    let business_registration_no = if receiver_type == ReceiverType::ReferralPartner {
        affiliate.business_registration_no.clone()
    } else {
        None
    };

    dal::summary::upsert(
        conn,
        NewCp58Summary {
            recipient_id: handle.id,
            recipient_code: handle.code,
            recipient_name: affiliate.name,
            recipient_type: receiver_type,
            identification_no: affiliate.identification_no,
            income_tax_no: Some(String::new()),
            business_registration_no,
            resident: Some(resident),
            recipient_address: Some(address),
            total_referral: Some(totals.referral),
            total_vehicle: Some(totals.vehicle),
            total_house: Some(totals.house),
            total_travel: Some(totals.travel),
            total_training: None,
            total_other: Some(totals.other),
            years: summary_year,
        },
    )?;
    Ok(())
}

fn upsert_company_summary(
    conn: &mut SqliteConnection,
    company_id: Uuid,
    group: &[LedgerEntry],
    summary_year: i32,
    home_country: &str,
) -> Result<(), PipelineError> {
    let company = dal::recipient::company_by_id(conn, company_id)?
        .ok_or_else(|| PipelineError::RecipientNotFound(company_id.to_string()))?;

    let receiver_type = dal::recipient::receiver_type_for(conn, company_id)?
        .ok_or_else(|| PipelineError::RecipientNotFound(company_id.to_string()))?;

    let totals = IncentiveTotals::from_entries(group);
    let address = format_address(&company.branch_address)?;
    let resident = residency(&company.branch_address, home_country)?;

    dal::summary::upsert(
        conn,
        NewCp58Summary {
            recipient_id: company.id,
            recipient_code: company.code,
            recipient_name: company.name,
            recipient_type: receiver_type,
            identification_no: None,
            income_tax_no: company.owner_income_tax_no,
            business_registration_no: company.business_registration_no,
            resident: Some(resident),
            recipient_address: Some(address),
            total_referral: None,
            total_vehicle: Some(totals.vehicle),
            total_house: Some(totals.house),
            total_travel: Some(totals.travel),
            total_training: Some(totals.training),
            total_other: Some(totals.other),
            years: summary_year,
        },
    )?;
    Ok(())
}
