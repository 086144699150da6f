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

//! Job-status persistence: one mutable row per phase, keyed by the phase's
//! fixed small-integer job key.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use super::DalError;
use crate::database::schema::job_statuses;
use crate::database::types::current_timestamp_string;
use crate::models::job::{JobKind, JobStatus, JobStatusRecord, JobStatusRow, NewJobStatusRow};

/// Writes the outcome of a phase run, creating the row on first use.
pub fn update_status(
    conn: &mut SqliteConnection,
    kind: JobKind,
    status: JobStatus,
) -> Result<(), DalError> {
    let now = current_timestamp_string();
    let updated = diesel::update(job_statuses::table.find(kind.key()))
        .set((
            job_statuses::status.eq(status.as_str()),
            job_statuses::updated_at.eq(now.clone()),
        ))
        .execute(conn)?;

    if updated == 0 {
        let row = NewJobStatusRow {
            id: kind.key(),
            job_kind: kind.as_str().to_string(),
            status: status.as_str().to_string(),
            updated_at: now,
        };
        diesel::insert_into(job_statuses::table)
            .values(&row)
            .execute(conn)?;
    }

    Ok(())
}

/// Current status record for a phase; `None` when no run has been recorded.
pub fn get(
    conn: &mut SqliteConnection,
    kind: JobKind,
) -> Result<Option<JobStatusRecord>, DalError> {
    let row: Option<JobStatusRow> = job_statuses::table
        .find(kind.key())
        .select(JobStatusRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(Into::into))
}
