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

//! Generation phase integration tests.

mod common;

use std::fs;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serial_test::serial;
use tempfile::TempDir;

use cp58_pipeline::models::job::{JobKind, JobStatus};
use cp58_pipeline::transport::LocalTransport;
use cp58_pipeline::{dal, Dal, GenerationPipeline, PipelineConfig, ReceiverType};

use common::{MockRenderer, TEST_ADDRESS};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
}

fn config_with_template(root: &TempDir) -> PipelineConfig {
    let config = PipelineConfig::builder()
        .base_path(root.path())
        .build()
        .unwrap();
    let template = config.template_path();
    fs::create_dir_all(template.parent().unwrap()).unwrap();
    fs::write(&template, b"<template/>").unwrap();
    config
}

#[test]
#[serial]
fn test_generation_renders_and_uploads_per_audience() {
    let root = TempDir::new().unwrap();
    let config = config_with_template(&root);
    let database = common::test_database("gen_full");
    let dal = Dal::new(&database);

    dal.transaction(|conn| {
        let adviser = common::seed_adviser(conn, "AD001", "Tan Mei Ling", TEST_ADDRESS);
        common::seed_mapping(conn, adviser, ReceiverType::Adviser);
        common::seed_adviser_entry(conn, adviser, 2024, Some(dec!(150)), None);
        Ok(())
    })
    .unwrap();

    let pipeline =
        GenerationPipeline::new(dal.clone(), config.clone(), MockRenderer, LocalTransport);
    let response = pipeline.run_at(today()).unwrap();
    assert!(response.success);

    let pdf = config
        .pdf_output_dir(ReceiverType::Adviser)
        .join("AD001_TanMeiLing_20240307.pdf");
    let sheet = config
        .excel_output_dir(ReceiverType::Adviser)
        .join("AD001_TanMeiLing_20240307.xlsx");
    assert!(fs::read(&pdf).unwrap().starts_with(b"%PDF"));
    assert!(fs::read(&sheet).unwrap().starts_with(b"XLSX"));

    dal.transaction(|conn| {
        let record = dal::job::get(conn, JobKind::Generation)?.expect("status should be recorded");
        assert_eq!(record.status, JobStatus::Complete);
        Ok(())
    })
    .unwrap();
}

#[test]
#[serial]
fn test_missing_template_fails_before_touching_the_ledger() {
    let root = TempDir::new().unwrap();
    // No template written.
    let config = PipelineConfig::builder()
        .base_path(root.path())
        .build()
        .unwrap();
    let database = common::test_database("gen_no_template");
    let dal = Dal::new(&database);

    let pipeline =
        GenerationPipeline::new(dal.clone(), config, MockRenderer, LocalTransport);
    let err = pipeline.run_at(today()).unwrap_err();
    assert_eq!(err.code(), "CP58_PATH_TEMPLATE_ERROR");

    dal.transaction(|conn| {
        let record = dal::job::get(conn, JobKind::Generation)?.expect("status should be recorded");
        assert_eq!(record.status, JobStatus::Failed);
        Ok(())
    })
    .unwrap();
}

#[test]
#[serial]
fn test_failed_run_rolls_back_summaries() {
    let root = TempDir::new().unwrap();
    let config = config_with_template(&root);
    let database = common::test_database("gen_rollback");
    let dal = Dal::new(&database);

    dal.transaction(|conn| {
        // Entry pointing at a missing adviser makes aggregation fail after
        // the transaction has started.
        common::seed_adviser_entry(conn, uuid::Uuid::new_v4(), 2024, Some(dec!(10)), None);
        let adviser = common::seed_adviser(conn, "AD002", "Lim Wei", TEST_ADDRESS);
        common::seed_mapping(conn, adviser, ReceiverType::Adviser);
        common::seed_adviser_entry(conn, adviser, 2024, Some(dec!(20)), None);
        Ok(())
    })
    .unwrap();

    let pipeline =
        GenerationPipeline::new(dal.clone(), config, MockRenderer, LocalTransport);
    let err = pipeline.run_at(today()).unwrap_err();
    assert_eq!(err.code(), "CP58_RECIPIENT_NOT_FOUND");

    dal.transaction(|conn| {
        // No partial summaries survive, but the failed status does.
        let summaries = dal::summary::list_by_type_and_year(conn, ReceiverType::Adviser, 2023)?;
        assert!(summaries.is_empty());
        let record = dal::job::get(conn, JobKind::Generation)?.expect("status should be recorded");
        assert_eq!(record.status, JobStatus::Failed);
        Ok(())
    })
    .unwrap();
}
