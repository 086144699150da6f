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

//! Report parameter building: turns persisted yearly summaries into the flat
//! per-document parameter maps the renderer consumes, one unit per summary
//! across all six receiver types.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing::debug;

use crate::aggregation::identity::split_tax_number;
use crate::config::PipelineConfig;
use crate::dal;
use crate::error::PipelineError;
use crate::models::receiver::ReceiverType;
use crate::models::summary::{Cp58Summary, Residency};

/// One renderable document: the audience it belongs to plus its parameter
/// map.
#[derive(Debug, Clone)]
pub struct ReportUnit {
    pub receiver_type: ReceiverType,
    pub code: String,
    pub recipient_name: String,
    pub parameters: BTreeMap<String, Value>,
}

impl ReportUnit {
    /// Deterministic output file stem:
    /// `{code}_{name with whitespace stripped}_{yyyyMMdd}`.
    pub fn file_stem(&self, today: NaiveDate) -> String {
        let name: String = self
            .recipient_name
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        format!(
            "{}_{}_{:04}{:02}{:02}",
            self.code,
            name,
            today.year(),
            today.month(),
            today.day()
        )
    }
}

fn amount(total: Option<Decimal>) -> Value {
    json!(total.unwrap_or(Decimal::ZERO).to_string())
}

fn unit_from_summary(summary: Cp58Summary) -> ReportUnit {
    // The split always runs on the stored income-tax number; recipients
    // without one (companies, affiliates) yield empty tax fields.
    let tax_source = summary.income_tax_no.clone().unwrap_or_default();
    let (tax_prefix, tax_number) = split_tax_number(&tax_source);

    let identification = summary.identification_no.clone().unwrap_or_default();

    let resident_code = summary
        .resident
        .unwrap_or(Residency::NonResident)
        .code();

    let mut parameters = BTreeMap::new();
    parameters.insert("identificationId".to_string(), json!(identification));
    parameters.insert("commission".to_string(), amount(None));
    parameters.insert("vehicle".to_string(), amount(summary.total_vehicle));
    parameters.insert("house".to_string(), amount(summary.total_house));
    parameters.insert("travel".to_string(), amount(summary.total_travel));
    parameters.insert("others1".to_string(), amount(summary.total_referral));
    parameters.insert("training".to_string(), amount(summary.total_training));
    parameters.insert("others2".to_string(), amount(summary.total_other));
    parameters.insert("taxNo1".to_string(), json!(tax_prefix));
    parameters.insert("taxNo2".to_string(), json!(tax_number));
    parameters.insert("residentInMalaysia".to_string(), json!(resident_code));
    parameters.insert(
        "recipientName".to_string(),
        json!(summary.recipient_name.clone()),
    );
    parameters.insert(
        "recipientAddress".to_string(),
        json!(summary.recipient_address.clone().unwrap_or_default()),
    );
    parameters.insert("year".to_string(), json!(summary.years + 1));
    parameters.insert("code".to_string(), json!(summary.recipient_code.clone()));
    parameters.insert(
        "type".to_string(),
        json!(summary.recipient_type.as_tag()),
    );

    ReportUnit {
        receiver_type: summary.recipient_type,
        code: summary.recipient_code,
        recipient_name: summary.recipient_name,
        parameters,
    }
}

/// Builds one [`ReportUnit`] per stored summary, walking all six receiver
/// types in emission order for the year reported on by `today`'s run.
pub fn build_report_parameters(
    conn: &mut SqliteConnection,
    today: NaiveDate,
) -> Result<Vec<ReportUnit>, PipelineError> {
    let summary_year = today.year() - 1;
    let mut units = Vec::new();

    for receiver_type in ReceiverType::ALL {
        let summaries = dal::summary::list_by_type_and_year(conn, receiver_type, summary_year)?;
        debug!(
            receiver_type = %receiver_type,
            summary_year,
            count = summaries.len(),
            "building report parameters"
        );
        units.extend(summaries.into_iter().map(unit_from_summary));
    }

    Ok(units)
}

/// The (spreadsheet folder, PDF folder) pair for an audience. Total over the
/// receiver-type enum, so every rendered document has a destination.
pub fn output_folders(
    config: &PipelineConfig,
    receiver_type: ReceiverType,
) -> (PathBuf, PathBuf) {
    (
        config.excel_output_dir(receiver_type),
        config.pdf_output_dir(receiver_type),
    )
}
