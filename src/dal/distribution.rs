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

//! Distribution audit-row persistence (append-only).

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

use super::DalError;
use crate::database::schema::distributed_files;
use crate::database::types::{current_timestamp_string, uuid_to_blob};
use crate::models::distribution::{
    DistributedFile, DistributedFileRow, NewDistributedFile, NewDistributedFileRow,
};

/// Records one successfully distributed file.
pub fn insert(
    conn: &mut SqliteConnection,
    new: NewDistributedFile,
) -> Result<(), DalError> {
    let row = NewDistributedFileRow {
        id: uuid_to_blob(&Uuid::new_v4()),
        receiver_type: new.receiver_type.as_tag().to_string(),
        adviser_id: new.adviser_id.map(|id| uuid_to_blob(&id)),
        affiliate_id: new.affiliate_id.map(|id| uuid_to_blob(&id)),
        file_name: new.file_name,
        file_path: new.file_path,
        created_at: current_timestamp_string(),
    };
    diesel::insert_into(distributed_files::table)
        .values(&row)
        .execute(conn)?;
    Ok(())
}

/// All audit rows, in insertion order. Primarily for verification and tests.
pub fn list_all(conn: &mut SqliteConnection) -> Result<Vec<DistributedFile>, DalError> {
    let rows: Vec<DistributedFileRow> = distributed_files::table
        .order(distributed_files::created_at.asc())
        .select(DistributedFileRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(Into::into).collect())
}
