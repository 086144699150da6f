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

//! Generation phase: aggregate the year's ledger, render one CP58 per
//! summary and upload the PDF and spreadsheet exports to their per-audience
//! output folders.

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::config::PipelineConfig;
use crate::dal::{job, Dal};
use crate::error::{GenericResponse, PipelineError};
use crate::models::job::{JobKind, JobStatus};
use crate::render::{Renderer, SpreadsheetOptions};
use crate::report;
use crate::transport::FileTransport;

/// Orchestrates the generation phase over a renderer and a file transport.
pub struct GenerationPipeline<R, T> {
    dal: Dal,
    config: PipelineConfig,
    renderer: R,
    transport: T,
}

impl<R, T> GenerationPipeline<R, T>
where
    R: Renderer,
    T: FileTransport,
{
    pub fn new(dal: Dal, config: PipelineConfig, renderer: R, transport: T) -> Self {
        GenerationPipeline {
            dal,
            config,
            renderer,
            transport,
        }
    }

    /// Runs generation for today's date.
    pub fn run(&self) -> Result<GenericResponse, PipelineError> {
        self.run_at(Local::now().date_naive())
    }

    /// Runs generation as of `today`. The whole body is one transaction; the
    /// `Complete` status commits with the summaries, while a failure records
    /// `Failed` on a separate connection and re-raises the classified error.
    pub fn run_at(&self, today: NaiveDate) -> Result<GenericResponse, PipelineError> {
        info!(%today, "starting generation");

        let template = self.config.template_path();
        if !template.is_file() {
            let err = PipelineError::Template(template.display().to_string());
            super::record_failure(&self.dal, JobKind::Generation, &err);
            return Err(err);
        }

        let result = self.dal.transaction(|conn| {
            let written =
                crate::aggregation::run(conn, today, self.config.home_country())?;
            let units = report::build_report_parameters(conn, today)?;
            info!(summaries = written, documents = units.len(), "rendering documents");

            for unit in &units {
                let (excel_dir, pdf_dir) = report::output_folders(&self.config, unit.receiver_type);
                let stem = unit.file_stem(today);

                let document = self.renderer.fill(&template, &unit.parameters)?;
                let pdf = self.renderer.export_pdf(&document)?;
                let sheet = self
                    .renderer
                    .export_spreadsheet(&document, &SpreadsheetOptions::default())?;

                self.transport
                    .upload(&pdf, &pdf_dir.join(format!("{stem}.pdf")))
                    .map_err(|e| PipelineError::RenderExport(e.to_string()))?;
                self.transport
                    .upload(&sheet, &excel_dir.join(format!("{stem}.xlsx")))
                    .map_err(|e| PipelineError::RenderExport(e.to_string()))?;
            }

            job::update_status(conn, JobKind::Generation, JobStatus::Complete)?;
            Ok(units.len())
        });

        match result {
            Ok(count) => {
                info!(documents = count, "generation complete");
                Ok(GenericResponse::ok())
            }
            Err(err) => {
                super::record_failure(&self.dal, JobKind::Generation, &err);
                Err(err)
            }
        }
    }
}
