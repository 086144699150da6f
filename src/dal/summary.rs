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

//! Yearly summary CRUD: keyed find, upsert, and per-audience listing.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

use super::DalError;
use crate::database::schema::cp58_summaries;
use crate::database::types::{
    current_timestamp_string, decimal_to_string, uuid_to_blob,
};
use crate::models::receiver::ReceiverType;
use crate::models::summary::{
    Cp58Summary, Cp58SummaryRow, NewCp58Summary, NewCp58SummaryRow,
};
use rust_decimal::Decimal;

fn opt_text(amount: &Option<Decimal>) -> Option<String> {
    amount.as_ref().map(decimal_to_string)
}

/// Finds the summary for an upsert key, if one exists.
pub fn find_by_key(
    conn: &mut SqliteConnection,
    recipient_id: Uuid,
    receiver_type: ReceiverType,
    years: i32,
) -> Result<Option<Cp58Summary>, DalError> {
    let row: Option<Cp58SummaryRow> = cp58_summaries::table
        .filter(cp58_summaries::recipient_id.eq(uuid_to_blob(&recipient_id)))
        .filter(cp58_summaries::recipient_type.eq(receiver_type.as_tag()))
        .filter(cp58_summaries::years.eq(years))
        .select(Cp58SummaryRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(Into::into))
}

/// Inserts or overwrites the summary for the record's key. Every field is
/// rewritten from the freshly recomputed values; totals are never
/// accumulated into an existing row.
pub fn upsert(conn: &mut SqliteConnection, new: NewCp58Summary) -> Result<(), DalError> {
    let now = current_timestamp_string();
    let existing = find_by_key(conn, new.recipient_id, new.recipient_type, new.years)?;

    match existing {
        Some(current) => {
            diesel::update(cp58_summaries::table.find(uuid_to_blob(&current.id)))
                .set((
                    cp58_summaries::recipient_code.eq(new.recipient_code),
                    cp58_summaries::recipient_name.eq(new.recipient_name),
                    cp58_summaries::identification_no.eq(new.identification_no),
                    cp58_summaries::income_tax_no.eq(new.income_tax_no),
                    cp58_summaries::business_registration_no.eq(new.business_registration_no),
                    cp58_summaries::resident_code.eq(new.resident.map(|r| r.code())),
                    cp58_summaries::recipient_address.eq(new.recipient_address),
                    cp58_summaries::total_referral.eq(opt_text(&new.total_referral)),
                    cp58_summaries::total_vehicle.eq(opt_text(&new.total_vehicle)),
                    cp58_summaries::total_house.eq(opt_text(&new.total_house)),
                    cp58_summaries::total_travel.eq(opt_text(&new.total_travel)),
                    cp58_summaries::total_training.eq(opt_text(&new.total_training)),
                    cp58_summaries::total_other.eq(opt_text(&new.total_other)),
                    cp58_summaries::updated_at.eq(now),
                ))
                .execute(conn)?;
        }
        None => {
            let row = NewCp58SummaryRow {
                id: uuid_to_blob(&Uuid::new_v4()),
                recipient_id: uuid_to_blob(&new.recipient_id),
                recipient_code: new.recipient_code,
                recipient_name: new.recipient_name,
                recipient_type: new.recipient_type.as_tag().to_string(),
                identification_no: new.identification_no,
                income_tax_no: new.income_tax_no,
                business_registration_no: new.business_registration_no,
                resident_code: new.resident.map(|r| r.code()),
                recipient_address: new.recipient_address,
                total_referral: opt_text(&new.total_referral),
                total_vehicle: opt_text(&new.total_vehicle),
                total_house: opt_text(&new.total_house),
                total_travel: opt_text(&new.total_travel),
                total_training: opt_text(&new.total_training),
                total_other: opt_text(&new.total_other),
                years: new.years,
                created_at: now.clone(),
                updated_at: now,
            };
            diesel::insert_into(cp58_summaries::table)
                .values(&row)
                .execute(conn)?;
        }
    }

    Ok(())
}

/// All summaries for one audience and year, in recipient-code order.
pub fn list_by_type_and_year(
    conn: &mut SqliteConnection,
    receiver_type: ReceiverType,
    years: i32,
) -> Result<Vec<Cp58Summary>, DalError> {
    let rows: Vec<Cp58SummaryRow> = cp58_summaries::table
        .filter(cp58_summaries::recipient_type.eq(receiver_type.as_tag()))
        .filter(cp58_summaries::years.eq(years))
        .order(cp58_summaries::recipient_code.asc())
        .select(Cp58SummaryRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(Into::into).collect())
}
