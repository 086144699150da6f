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

//! Pipeline-level error taxonomy and the client-facing response value.
//!
//! Each [`PipelineError`] variant carries a stable error code. Generation
//! failures are re-raised to the caller after the job status is recorded;
//! distribution failures are folded into a failure-flagged
//! [`GenericResponse`] instead.

use serde::Serialize;
use thiserror::Error;

use crate::aggregation::identity::AddressError;
use crate::dal::DalError;
use crate::notify::NotifyError;
use crate::render::RenderError;

/// Classified failure of a pipeline phase.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The render template could not be resolved or read.
    #[error("cp58 template unavailable: {0}")]
    Template(String),

    /// The renderer failed to fill or export the document.
    #[error("report render/export failed: {0}")]
    RenderExport(String),

    /// A ledger recipient could not be resolved to a stored record.
    #[error("recipient could not be resolved: {0}")]
    RecipientNotFound(String),

    /// A receiver-type tag outside the set this pipeline understands.
    #[error("invalid recipient type: {0}")]
    InvalidRecipientType(String),

    /// A distribution source folder was missing or unreadable.
    #[error("distribution source unavailable: {0}")]
    DistributionNotFound(String),

    /// Database failure.
    #[error(transparent)]
    Dal(#[from] DalError),

    /// Notification delivery failure.
    #[error(transparent)]
    Notify(#[from] NotifyError),

    /// Catch-all for anything else that aborts a phase.
    #[error("cp58 pipeline failure: {0}")]
    General(String),
}

impl PipelineError {
    /// Stable error code surfaced to callers.
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::Template(_) => "CP58_PATH_TEMPLATE_ERROR",
            PipelineError::RenderExport(_) => "CP58_REPORT_EXPORT_ERROR",
            PipelineError::RecipientNotFound(_) => "CP58_RECIPIENT_NOT_FOUND",
            PipelineError::InvalidRecipientType(_) => "CP58_INVALID_RECIPIENT_TYPE",
            PipelineError::DistributionNotFound(_) => "DISTRIBUTE_CP58_NOT_FOUND",
            PipelineError::Dal(_) | PipelineError::Notify(_) | PipelineError::General(_) => {
                "CP58_GENERAL_ERROR"
            }
        }
    }
}

impl From<diesel::result::Error> for PipelineError {
    fn from(err: diesel::result::Error) -> Self {
        PipelineError::Dal(DalError::from(err))
    }
}

impl From<RenderError> for PipelineError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Template { .. } => PipelineError::Template(err.to_string()),
            other => PipelineError::RenderExport(other.to_string()),
        }
    }
}

impl From<AddressError> for PipelineError {
    fn from(err: AddressError) -> Self {
        PipelineError::General(err.to_string())
    }
}

/// Success/failure envelope returned by phase entry points.
#[derive(Debug, Clone, Serialize)]
pub struct GenericResponse {
    pub success: bool,
    pub code: Option<String>,
    pub message: Option<String>,
}

impl GenericResponse {
    /// A successful response with no code or message.
    pub fn ok() -> Self {
        GenericResponse {
            success: true,
            code: None,
            message: None,
        }
    }

    /// A failure response carrying the error's stable code and message.
    pub fn failure(error: &PipelineError) -> Self {
        GenericResponse {
            success: false,
            code: Some(error.code().to_string()),
            message: Some(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            PipelineError::Template("missing".into()).code(),
            "CP58_PATH_TEMPLATE_ERROR"
        );
        assert_eq!(
            PipelineError::DistributionNotFound("gone".into()).code(),
            "DISTRIBUTE_CP58_NOT_FOUND"
        );
        assert_eq!(
            PipelineError::General("boom".into()).code(),
            "CP58_GENERAL_ERROR"
        );
    }

    #[test]
    fn test_failure_response_carries_code_and_message() {
        let err = PipelineError::RecipientNotFound("A-17".into());
        let resp = GenericResponse::failure(&err);
        assert!(!resp.success);
        assert_eq!(resp.code.as_deref(), Some("CP58_RECIPIENT_NOT_FOUND"));
        assert!(resp.message.unwrap().contains("A-17"));
    }

    #[test]
    fn test_ok_response() {
        let resp = GenericResponse::ok();
        assert!(resp.success);
        assert!(resp.code.is_none());
    }
}
