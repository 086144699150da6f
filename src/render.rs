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

//! Rendering seam: filling a document template with a flat parameter map and
//! exporting it as PDF or spreadsheet bytes.
//!
//! The engine behind the trait is external to this crate; the pipeline only
//! needs fill + two exports, so that is the whole surface.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Failure inside the rendering engine.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template file could not be resolved or loaded.
    #[error("template unavailable at {path}: {source}")]
    Template {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Filling the template with parameters failed.
    #[error("template fill failed: {0}")]
    Fill(String),

    /// Exporting the filled document failed.
    #[error("document export failed: {0}")]
    Export(String),
}

/// Spreadsheet export tuning. Defaults match the statement layout: cell types
/// detected, pagination collapsed into one sheet region.
#[derive(Debug, Clone)]
pub struct SpreadsheetOptions {
    pub detect_cell_types: bool,
    pub one_page_per_sheet: bool,
    pub remove_empty_space_between_rows: bool,
    pub white_page_background: bool,
}

impl Default for SpreadsheetOptions {
    fn default() -> Self {
        SpreadsheetOptions {
            detect_cell_types: true,
            one_page_per_sheet: false,
            remove_empty_space_between_rows: true,
            white_page_background: false,
        }
    }
}

/// A document rendering engine.
pub trait Renderer {
    /// Engine-specific filled-document handle.
    type Document;

    /// Fills the template at `template` with the flat parameter map.
    fn fill(
        &self,
        template: &Path,
        parameters: &BTreeMap<String, Value>,
    ) -> Result<Self::Document, RenderError>;

    fn export_pdf(&self, document: &Self::Document) -> Result<Vec<u8>, RenderError>;

    fn export_spreadsheet(
        &self,
        document: &Self::Document,
        options: &SpreadsheetOptions,
    ) -> Result<Vec<u8>, RenderError>;
}
