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

//! Distribution phase: copy each audience's rendered PDFs into its
//! distribution folder (one audit row per file, adviser notifications), then
//! archive the sources (copy into the archive folder, delete the original).

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::dal::{self, job, Dal};
use crate::error::{GenericResponse, PipelineError};
use crate::models::distribution::NewDistributedFile;
use crate::models::job::{JobKind, JobStatus};
use crate::models::receiver::ReceiverType;
use crate::notify::NotificationSender;
use crate::transport::FileTransport;
use diesel::sqlite::SqliteConnection;

/// Distributable statement file names: `<code>_<name>_<yyyymmdd>.pdf`.
static CP58_FILE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w+_[A-Za-z0-9]+_\d{4}(0[1-9]|1[0-2])(0[1-9]|[12]\d|3[01])\.pdf$")
        .expect("file pattern must compile")
});

/// True for file names this phase will pick up.
pub fn is_distributable_file(name: &str) -> bool {
    CP58_FILE_PATTERN.is_match(name)
}

/// Orchestrates the distribution phase over a file transport and a
/// notification channel.
pub struct DistributionPipeline<T, N> {
    dal: Dal,
    config: PipelineConfig,
    transport: T,
    notifier: N,
}

impl<T, N> DistributionPipeline<T, N>
where
    T: FileTransport,
    N: NotificationSender,
{
    pub fn new(dal: Dal, config: PipelineConfig, transport: T, notifier: N) -> Self {
        DistributionPipeline {
            dal,
            config,
            transport,
            notifier,
        }
    }

    /// Runs distribution then archival for every audience. Failures are
    /// folded into a failure-flagged response after the `Failed` status is
    /// recorded; this phase does not re-raise.
    pub fn run(&self) -> GenericResponse {
        info!("starting distribution");

        let result = self.dal.transaction(|conn| {
            for audience in ReceiverType::DISTRIBUTION_AUDIENCES {
                self.distribute(conn, audience)?;
            }
            for audience in ReceiverType::DISTRIBUTION_AUDIENCES {
                self.archive(audience)?;
            }
            job::update_status(conn, JobKind::Distribution, JobStatus::Complete)?;
            Ok(())
        });

        match result {
            Ok(()) => {
                info!("distribution complete");
                GenericResponse::ok()
            }
            Err(err) => {
                super::record_failure(&self.dal, JobKind::Distribution, &err);
                GenericResponse::failure(&err)
            }
        }
    }

    /// The matching statement files in one audience's rendered-PDF folder.
    /// A missing or unreadable folder classifies as `DistributionNotFound`.
    fn matching_sources(&self, audience: ReceiverType) -> Result<Vec<String>, PipelineError> {
        let source = self.config.pdf_output_dir(audience);
        self.transport
            .ensure_dir(&source)
            .map_err(|e| PipelineError::DistributionNotFound(e.to_string()))?;
        let mut names: Vec<String> = self
            .transport
            .list(&source)
            .map_err(|e| PipelineError::DistributionNotFound(e.to_string()))?
            .into_iter()
            .filter(|name| is_distributable_file(name))
            .collect();
        names.sort();
        Ok(names)
    }

    fn distribute(
        &self,
        conn: &mut SqliteConnection,
        audience: ReceiverType,
    ) -> Result<(), PipelineError> {
        if !audience.is_distribution_audience() {
            return Err(PipelineError::InvalidRecipientType(audience.to_string()));
        }

        let source_dir = self.config.pdf_output_dir(audience);
        let target_dir = self.config.distribution_dir(audience);
        let names = self.matching_sources(audience)?;

        self.transport
            .ensure_dir(&target_dir)
            .map_err(|e| PipelineError::General(e.to_string()))?;

        if names.is_empty() {
            warn!(audience = %audience, "no statement files to distribute");
            return Ok(());
        }

        for name in names {
            let target = target_dir.join(&name);
            self.transport
                .copy(&source_dir.join(&name), &target)
                .map_err(|e| PipelineError::General(e.to_string()))?;

            // The leading code segment of the file name identifies the
            // recipient within the audience.
            let code = name.split('_').next().unwrap_or_default();
            let (adviser, affiliate_id) = if audience == ReceiverType::Adviser {
                let adviser = dal::recipient::adviser_by_code(conn, code)?
                    .ok_or_else(|| PipelineError::RecipientNotFound(code.to_string()))?;
                (Some(adviser), None)
            } else {
                let affiliate =
                    dal::recipient::affiliate_by_sub_role_code(conn, audience, code)?
                        .ok_or_else(|| PipelineError::RecipientNotFound(code.to_string()))?;
                (None, Some(affiliate.id))
            };

            dal::distribution::insert(
                conn,
                NewDistributedFile {
                    receiver_type: audience,
                    adviser_id: adviser.as_ref().map(|a| a.id),
                    affiliate_id,
                    file_name: name.clone(),
                    file_path: target.display().to_string(),
                },
            )?;

            if let Some(adviser) = adviser {
                self.notifier.distribution_complete(adviser.id, &adviser)?;
            }

            info!(audience = %audience, file = %name, "distributed statement");
        }

        Ok(())
    }

    /// Moves one audience's matching sources into the archive folder. The
    /// source is deleted only after its archive copy succeeds, and a delete
    /// failure aborts the phase.
    fn archive(&self, audience: ReceiverType) -> Result<(), PipelineError> {
        if !audience.is_distribution_audience() {
            return Err(PipelineError::InvalidRecipientType(audience.to_string()));
        }

        let source_dir = self.config.pdf_output_dir(audience);
        let archive_dir = self.config.archive_dir(audience);
        let names = self.matching_sources(audience)?;

        self.transport
            .ensure_dir(&archive_dir)
            .map_err(|e| PipelineError::General(e.to_string()))?;

        if names.is_empty() {
            warn!(audience = %audience, "no statement files to archive");
            return Ok(());
        }

        for name in names {
            let source = source_dir.join(&name);
            self.transport
                .copy(&source, &archive_dir.join(&name))
                .map_err(|e| PipelineError::General(e.to_string()))?;
            self.transport
                .delete(&source)
                .map_err(|e| PipelineError::General(e.to_string()))?;
            info!(audience = %audience, file = %name, "archived statement");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_accepts_canonical_names() {
        assert!(is_distributable_file("AD001_TanMeiLing_20240307.pdf"));
        assert!(is_distributable_file("MR9_X_20231231.pdf"));
    }

    #[test]
    fn test_pattern_rejects_bad_names() {
        // Wrong extension.
        assert!(!is_distributable_file("AD001_TanMeiLing_20240307.xlsx"));
        // Missing segment.
        assert!(!is_distributable_file("AD001_20240307.pdf"));
        // Month 13 and day 32 are out of range.
        assert!(!is_distributable_file("AD001_Tan_20241307.pdf"));
        assert!(!is_distributable_file("AD001_Tan_20240332.pdf"));
        // Name segment must be alphanumeric.
        assert!(!is_distributable_file("AD001_Tan Mei_20240307.pdf"));
        // Anchored: no trailing garbage.
        assert!(!is_distributable_file("AD001_Tan_20240307.pdf.bak"));
    }
}
