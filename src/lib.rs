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

//! # cp58-pipeline
//!
//! A two-phase pipeline producing and distributing annual CP58 commission
//! statements.
//!
//! **Generation** aggregates a year's commission ledger into one yearly
//! summary per recipient (an idempotent upsert keyed on recipient, receiver
//! type and year), renders each summary into PDF and spreadsheet exports
//! through a pluggable [`render::Renderer`], and uploads both to
//! per-audience output folders through a pluggable
//! [`transport::FileTransport`].
//!
//! **Distribution** scans each audience's rendered-output folder for
//! statement files, copies them into distribution folders (recording one
//! audit row per file and notifying advisers through a
//! [`notify::NotificationSender`]), then archives the sources.
//!
//! Each phase is an independently retryable transactional unit of work with
//! a persisted job-status row.
//!
//! ```no_run
//! use cp58_pipeline::config::PipelineConfig;
//! use cp58_pipeline::dal::Dal;
//! use cp58_pipeline::database::Database;
//! use cp58_pipeline::notify::NoopNotifier;
//! use cp58_pipeline::pipeline::distribution::DistributionPipeline;
//! use cp58_pipeline::transport::LocalTransport;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::builder().base_path("/srv/docs").build()?;
//! let database = Database::new("cp58.db", config.pool_size())?;
//! database.run_migrations()?;
//!
//! let pipeline = DistributionPipeline::new(
//!     Dal::new(&database),
//!     config,
//!     LocalTransport,
//!     NoopNotifier,
//! );
//! let response = pipeline.run();
//! assert!(response.success);
//! # Ok(())
//! # }
//! ```

pub mod aggregation;
pub mod config;
pub mod dal;
pub mod database;
pub mod error;
pub mod models;
pub mod notify;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod transport;

pub use config::PipelineConfig;
pub use dal::Dal;
pub use database::Database;
pub use error::{GenericResponse, PipelineError};
pub use models::{JobKind, JobStatus, ReceiverType};
pub use pipeline::distribution::DistributionPipeline;
pub use pipeline::generation::GenerationPipeline;
