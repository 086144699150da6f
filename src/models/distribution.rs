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

//! Distribution audit records: one row per CP58 file successfully copied to
//! its distribution target. Rows are append-only.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::database::types::{blob_to_uuid, string_to_datetime};
use crate::models::receiver::ReceiverType;

/// A persisted distribution audit row.
#[derive(Debug, Clone)]
pub struct DistributedFile {
    pub id: Uuid,
    pub receiver_type: ReceiverType,
    pub adviser_id: Option<Uuid>,
    pub affiliate_id: Option<Uuid>,
    pub file_name: String,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
}

/// Field set for a new audit row. Exactly one of the recipient references is
/// expected to be set, matching the audience.
#[derive(Debug, Clone)]
pub struct NewDistributedFile {
    pub receiver_type: ReceiverType,
    pub adviser_id: Option<Uuid>,
    pub affiliate_id: Option<Uuid>,
    pub file_name: String,
    pub file_path: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = crate::database::schema::distributed_files)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DistributedFileRow {
    pub id: Vec<u8>,
    pub receiver_type: String,
    pub adviser_id: Option<Vec<u8>>,
    pub affiliate_id: Option<Vec<u8>>,
    pub file_name: String,
    pub file_path: String,
    pub created_at: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::database::schema::distributed_files)]
pub struct NewDistributedFileRow {
    pub id: Vec<u8>,
    pub receiver_type: String,
    pub adviser_id: Option<Vec<u8>>,
    pub affiliate_id: Option<Vec<u8>>,
    pub file_name: String,
    pub file_path: String,
    pub created_at: String,
}

impl From<DistributedFileRow> for DistributedFile {
    fn from(row: DistributedFileRow) -> Self {
        DistributedFile {
            id: blob_to_uuid(&row.id).expect("Invalid UUID in database"),
            receiver_type: ReceiverType::from_tag(&row.receiver_type)
                .expect("unrecognized receiver type in database"),
            adviser_id: row
                .adviser_id
                .map(|b| blob_to_uuid(&b).expect("Invalid UUID in database")),
            affiliate_id: row
                .affiliate_id
                .map(|b| blob_to_uuid(&b).expect("Invalid UUID in database")),
            file_name: row.file_name,
            file_path: row.file_path,
            created_at: string_to_datetime(&row.created_at)
                .expect("Invalid timestamp in database"),
        }
    }
}
