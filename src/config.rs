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

//! Pipeline configuration: the folder layout under the document-store root,
//! the template name and the residency home country.
//!
//! All folders hang off one base path:
//!
//! ```text
//! <base>/CP58/TEMPLATE       template file
//! <base>/CP58/OUT/PDF/<T>    rendered PDFs, one subfolder per receiver tag
//! <base>/CP58/OUT/EXCEL/<T>  rendered spreadsheets, same layout
//! <base>/CP58/DISTRIBUTED/<T>
//! <base>/CP58/ARCHIVED/<T>
//! ```

use std::path::{Path, PathBuf};

use crate::models::receiver::ReceiverType;

pub const DEFAULT_TEMPLATE_NAME: &str = "CP58.jrxml";
pub const DEFAULT_HOME_COUNTRY: &str = "MALAYSIA";
pub const DEFAULT_POOL_SIZE: u32 = 5;

/// Resolved pipeline configuration. Construct via [`PipelineConfig::builder`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    base_path: PathBuf,
    template_name: String,
    home_country: String,
    pool_size: u32,
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Full path to the render template.
    pub fn template_path(&self) -> PathBuf {
        self.base_path
            .join("CP58")
            .join("TEMPLATE")
            .join(&self.template_name)
    }

    pub fn pdf_output_root(&self) -> PathBuf {
        self.base_path.join("CP58").join("OUT").join("PDF")
    }

    pub fn excel_output_root(&self) -> PathBuf {
        self.base_path.join("CP58").join("OUT").join("EXCEL")
    }

    pub fn distribution_root(&self) -> PathBuf {
        self.base_path.join("CP58").join("DISTRIBUTED")
    }

    pub fn archive_root(&self) -> PathBuf {
        self.base_path.join("CP58").join("ARCHIVED")
    }

    /// Per-audience PDF output folder.
    pub fn pdf_output_dir(&self, receiver_type: ReceiverType) -> PathBuf {
        self.pdf_output_root().join(receiver_type.as_tag())
    }

    /// Per-audience spreadsheet output folder.
    pub fn excel_output_dir(&self, receiver_type: ReceiverType) -> PathBuf {
        self.excel_output_root().join(receiver_type.as_tag())
    }

    pub fn distribution_dir(&self, receiver_type: ReceiverType) -> PathBuf {
        self.distribution_root().join(receiver_type.as_tag())
    }

    pub fn archive_dir(&self, receiver_type: ReceiverType) -> PathBuf {
        self.archive_root().join(receiver_type.as_tag())
    }

    pub fn home_country(&self) -> &str {
        &self.home_country
    }

    pub fn pool_size(&self) -> u32 {
        self.pool_size
    }
}

/// Builder for [`PipelineConfig`].
#[derive(Debug, Clone)]
pub struct PipelineConfigBuilder {
    base_path: Option<PathBuf>,
    template_name: String,
    home_country: String,
    pool_size: u32,
}

impl Default for PipelineConfigBuilder {
    fn default() -> Self {
        PipelineConfigBuilder {
            base_path: None,
            template_name: DEFAULT_TEMPLATE_NAME.to_string(),
            home_country: DEFAULT_HOME_COUNTRY.to_string(),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl PipelineConfigBuilder {
    /// Root of the document store. Required.
    pub fn base_path(mut self, path: impl AsRef<Path>) -> Self {
        self.base_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn template_name(mut self, name: impl Into<String>) -> Self {
        self.template_name = name.into();
        self
    }

    pub fn home_country(mut self, country: impl Into<String>) -> Self {
        self.home_country = country.into();
        self
    }

    pub fn pool_size(mut self, size: u32) -> Self {
        self.pool_size = size;
        self
    }

    pub fn build(self) -> Result<PipelineConfig, ConfigError> {
        let base_path = self.base_path.ok_or(ConfigError::MissingBasePath)?;
        Ok(PipelineConfig {
            base_path,
            template_name: self.template_name,
            home_country: self.home_country,
            pool_size: self.pool_size,
        })
    }
}

/// Configuration validation failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("base path is required")]
    MissingBasePath,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PipelineConfig {
        PipelineConfig::builder()
            .base_path("/srv/docs")
            .build()
            .unwrap()
    }

    #[test]
    fn test_folder_layout() {
        let cfg = config();
        assert_eq!(
            cfg.template_path(),
            PathBuf::from("/srv/docs/CP58/TEMPLATE/CP58.jrxml")
        );
        assert_eq!(
            cfg.pdf_output_dir(ReceiverType::Adviser),
            PathBuf::from("/srv/docs/CP58/OUT/PDF/ADVISER")
        );
        assert_eq!(
            cfg.excel_output_dir(ReceiverType::AgencyManager),
            PathBuf::from("/srv/docs/CP58/OUT/EXCEL/AGENCY_MANAGER")
        );
        assert_eq!(
            cfg.distribution_dir(ReceiverType::ReferralPartner),
            PathBuf::from("/srv/docs/CP58/DISTRIBUTED/REFERRAL_PARTNER")
        );
        assert_eq!(
            cfg.archive_dir(ReceiverType::Adviser),
            PathBuf::from("/srv/docs/CP58/ARCHIVED/ADVISER")
        );
    }

    #[test]
    fn test_defaults_and_overrides() {
        let cfg = config();
        assert_eq!(cfg.home_country(), "MALAYSIA");
        assert_eq!(cfg.pool_size(), 5);

        let cfg = PipelineConfig::builder()
            .base_path("/srv/docs")
            .template_name("CP58_v2.jrxml")
            .home_country("SINGAPORE")
            .pool_size(2)
            .build()
            .unwrap();
        assert!(cfg.template_path().ends_with("CP58_v2.jrxml"));
        assert_eq!(cfg.home_country(), "SINGAPORE");
    }

    #[test]
    fn test_base_path_is_required() {
        assert!(matches!(
            PipelineConfig::builder().build(),
            Err(ConfigError::MissingBasePath)
        ));
    }
}
