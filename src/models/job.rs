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

//! Job-status bookkeeping for the two pipeline phases.
//!
//! Each phase owns one mutable status row keyed by a fixed small integer
//! (generation = 1, distribution = 2), written exactly once at the end of a
//! run in both the success and failure branches.

use std::fmt;

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::database::types::string_to_datetime;

/// The two independently triggerable pipeline phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    /// Aggregation, rendering and upload.
    Generation,
    /// File distribution and archival.
    Distribution,
}

impl JobKind {
    /// Fixed row key for this job's status record.
    pub fn key(&self) -> i32 {
        match self {
            JobKind::Generation => 1,
            JobKind::Distribution => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::Generation => "GENERATION",
            JobKind::Distribution => "DISTRIBUTION",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal-or-initial state of a phase run: `NotStarted -> Complete | Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    NotStarted,
    Complete,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::NotStarted => "NOT_STARTED",
            JobStatus::Complete => "COMPLETE",
            JobStatus::Failed => "FAILED",
        }
    }

    pub fn from_str_tag(tag: &str) -> Option<Self> {
        match tag {
            "NOT_STARTED" => Some(JobStatus::NotStarted),
            "COMPLETE" => Some(JobStatus::Complete),
            "FAILED" => Some(JobStatus::Failed),
            _ => None,
        }
    }

    /// Whether `next` is a legal successor of `self`. Terminal states only
    /// accept being overwritten by a fresh run's outcome.
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        match (self, next) {
            (_, JobStatus::NotStarted) => false,
            (_, JobStatus::Complete) | (_, JobStatus::Failed) => true,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted job-status record.
#[derive(Debug, Clone)]
pub struct JobStatusRecord {
    pub kind: JobKind,
    pub status: JobStatus,
    pub updated_at: DateTime<Utc>,
}

/// Row form of [`JobStatusRecord`].
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = crate::database::schema::job_statuses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct JobStatusRow {
    pub id: i32,
    pub job_kind: String,
    pub status: String,
    pub updated_at: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::database::schema::job_statuses)]
pub struct NewJobStatusRow {
    pub id: i32,
    pub job_kind: String,
    pub status: String,
    pub updated_at: String,
}

impl From<JobStatusRow> for JobStatusRecord {
    fn from(row: JobStatusRow) -> Self {
        let kind = match row.id {
            1 => JobKind::Generation,
            2 => JobKind::Distribution,
            other => panic!("unrecognized job key in database: {}", other),
        };
        JobStatusRecord {
            kind,
            status: JobStatus::from_str_tag(&row.status)
                .expect("unrecognized job status in database"),
            updated_at: string_to_datetime(&row.updated_at)
                .expect("Invalid timestamp in database"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_keys_are_fixed() {
        assert_eq!(JobKind::Generation.key(), 1);
        assert_eq!(JobKind::Distribution.key(), 2);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [JobStatus::NotStarted, JobStatus::Complete, JobStatus::Failed] {
            assert_eq!(JobStatus::from_str_tag(status.as_str()), Some(status));
        }
        assert_eq!(JobStatus::from_str_tag("RUNNING"), None);
    }

    #[test]
    fn test_transitions() {
        assert!(JobStatus::NotStarted.can_transition_to(JobStatus::Complete));
        assert!(JobStatus::NotStarted.can_transition_to(JobStatus::Failed));
        // A retry may overwrite a terminal outcome with the new run's result.
        assert!(JobStatus::Failed.can_transition_to(JobStatus::Complete));
        assert!(!JobStatus::Complete.can_transition_to(JobStatus::NotStarted));
    }
}
