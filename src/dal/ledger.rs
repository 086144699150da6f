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

//! Ledger entry queries (read-only input to aggregation).

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use super::DalError;
use crate::database::schema::ledger_entries;
use crate::models::ledger::{LedgerEntry, LedgerEntryRow};

/// All ledger entries for a processing year.
pub fn find_by_entry_year(
    conn: &mut SqliteConnection,
    year: i32,
) -> Result<Vec<LedgerEntry>, DalError> {
    let rows: Vec<LedgerEntryRow> = ledger_entries::table
        .filter(ledger_entries::entry_year.eq(year))
        .select(LedgerEntryRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}
