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

//! Recipient lookups: advisers, affiliates, companies and the receiver-type
//! mapping store.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use super::DalError;
use crate::database::schema::{advisers, affiliates, companies, receiver_mappings};
use crate::database::types::uuid_to_blob;
use crate::error::PipelineError;
use crate::models::receiver::ReceiverType;
use crate::models::recipient::{
    Adviser, AdviserRow, Affiliate, AffiliateRow, Company, CompanyRow,
};
use uuid::Uuid;

/// Resolves a recipient's canonical receiver type from the mapping store.
/// Returns `None` when the recipient has no mapping rows at all.
pub fn receiver_type_for(
    conn: &mut SqliteConnection,
    recipient_id: Uuid,
) -> Result<Option<ReceiverType>, PipelineError> {
    let tag: Option<String> = receiver_mappings::table
        .filter(receiver_mappings::recipient_id.eq(uuid_to_blob(&recipient_id)))
        .select(receiver_mappings::receiver_type)
        .first(conn)
        .optional()
        .map_err(DalError::from)?;

    tag.map(|t| ReceiverType::from_tag(&t)).transpose()
}

pub fn adviser_by_id(
    conn: &mut SqliteConnection,
    id: Uuid,
) -> Result<Option<Adviser>, DalError> {
    let row: Option<AdviserRow> = advisers::table
        .find(uuid_to_blob(&id))
        .select(AdviserRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(Into::into))
}

pub fn adviser_by_code(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<Option<Adviser>, DalError> {
    let row: Option<AdviserRow> = advisers::table
        .filter(advisers::code.eq(code))
        .select(AdviserRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(Into::into))
}

pub fn affiliate_by_id(
    conn: &mut SqliteConnection,
    id: Uuid,
) -> Result<Option<Affiliate>, DalError> {
    let row: Option<AffiliateRow> = affiliates::table
        .find(uuid_to_blob(&id))
        .select(AffiliateRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(Into::into))
}

/// Looks an affiliate up by one of its sub-role codes. Which code column is
/// searched is decided by the audience's receiver type; non-affiliate types
/// are rejected.
pub fn affiliate_by_sub_role_code(
    conn: &mut SqliteConnection,
    receiver_type: ReceiverType,
    code: &str,
) -> Result<Option<Affiliate>, PipelineError> {
    let row: Option<AffiliateRow> = match receiver_type {
        ReceiverType::ReferralPartner => affiliates::table
            .filter(affiliates::referral_partner_code.eq(code))
            .select(AffiliateRow::as_select())
            .first(conn)
            .optional()
            .map_err(DalError::from)?,
        ReceiverType::VolunteerPartner => affiliates::table
            .filter(affiliates::volunteer_partner_code.eq(code))
            .select(AffiliateRow::as_select())
            .first(conn)
            .optional()
            .map_err(DalError::from)?,
        ReceiverType::AgencyManager => affiliates::table
            .filter(affiliates::agency_manager_code.eq(code))
            .select(AffiliateRow::as_select())
            .first(conn)
            .optional()
            .map_err(DalError::from)?,
        other => return Err(PipelineError::InvalidRecipientType(other.to_string())),
    };
    Ok(row.map(Into::into))
}

pub fn company_by_id(
    conn: &mut SqliteConnection,
    id: Uuid,
) -> Result<Option<Company>, DalError> {
    let row: Option<CompanyRow> = companies::table
        .find(uuid_to_blob(&id))
        .select(CompanyRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(Into::into))
}
