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

//! The two phase orchestrators.
//!
//! Each phase is one transactional unit of work with a persisted status row.
//! Generation re-raises its classified error to the caller; distribution
//! folds failures into its [`GenericResponse`](crate::error::GenericResponse).

pub mod distribution;
pub mod generation;

use tracing::error;

use crate::dal::Dal;
use crate::error::PipelineError;
use crate::models::job::{JobKind, JobStatus};

/// Writes the `Failed` status on a fresh connection, outside the phase's
/// rolled-back transaction. A failure to record the failure is only logged;
/// the original error is what the caller must see.
fn record_failure(dal: &Dal, kind: JobKind, cause: &PipelineError) {
    error!(job = %kind, error = %cause, "pipeline phase failed");
    let result = dal
        .conn()
        .map_err(PipelineError::from)
        .and_then(|mut conn| {
            crate::dal::job::update_status(&mut conn, kind, JobStatus::Failed)
                .map_err(PipelineError::from)
        });
    if let Err(status_err) = result {
        error!(job = %kind, error = %status_err, "could not record failed job status");
    }
}
