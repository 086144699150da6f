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

//! Shared test fixtures: per-test in-memory databases, row seeding helpers
//! and mock implementations of the external seams.

// Not every test binary exercises every fixture.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use cp58_pipeline::database::schema::{
    advisers, affiliates, companies, ledger_entries, receiver_mappings,
};
use cp58_pipeline::database::Database;
use cp58_pipeline::models::recipient::Adviser;
use cp58_pipeline::notify::{NotificationSender, NotifyError};
use cp58_pipeline::render::{RenderError, Renderer, SpreadsheetOptions};
use cp58_pipeline::ReceiverType;

/// Installs the test tracing subscriber once, honoring `RUST_LOG`.
fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A shared-cache in-memory database unique to the given test name, with
/// migrations applied.
pub fn test_database(name: &str) -> Database {
    init_tracing();
    let url = format!("file:{}?mode=memory&cache=shared", name);
    let database = Database::new(&url, 5).expect("test database should open");
    database
        .run_migrations()
        .expect("migrations should apply cleanly");
    database
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn blob(id: Uuid) -> Vec<u8> {
    id.as_bytes().to_vec()
}

pub fn seed_adviser(conn: &mut SqliteConnection, code: &str, name: &str, address: &str) -> Uuid {
    let id = Uuid::new_v4();
    diesel::insert_into(advisers::table)
        .values((
            advisers::id.eq(blob(id)),
            advisers::code.eq(code),
            advisers::preferred_name.eq(name),
            advisers::identification_no.eq(Some("880101015678")),
            advisers::income_tax_no.eq(Some("SG12345678")),
            advisers::residential_address.eq(address),
            advisers::created_at.eq(now()),
            advisers::updated_at.eq(now()),
        ))
        .execute(conn)
        .expect("adviser seed should insert");
    id
}

pub fn seed_affiliate_with_manager(
    conn: &mut SqliteConnection,
    name: &str,
    manager_code: &str,
    address: &str,
) -> (Uuid, Uuid) {
    let id = Uuid::new_v4();
    let manager_id = Uuid::new_v4();
    diesel::insert_into(affiliates::table)
        .values((
            affiliates::id.eq(blob(id)),
            affiliates::name.eq(name),
            affiliates::identification_no.eq(Some("900202025678")),
            affiliates::corresponding_address.eq(address),
            affiliates::agency_manager_id.eq(Some(blob(manager_id))),
            affiliates::agency_manager_code.eq(Some(manager_code)),
            affiliates::created_at.eq(now()),
            affiliates::updated_at.eq(now()),
        ))
        .execute(conn)
        .expect("affiliate seed should insert");
    (id, manager_id)
}

pub fn seed_company(conn: &mut SqliteConnection, code: &str, name: &str, address: &str) -> Uuid {
    let id = Uuid::new_v4();
    diesel::insert_into(companies::table)
        .values((
            companies::id.eq(blob(id)),
            companies::code.eq(code),
            companies::name.eq(name),
            companies::business_registration_no.eq(Some("C1998877")),
            companies::owner_income_tax_no.eq(Some("OG7654321")),
            companies::branch_address.eq(address),
            companies::created_at.eq(now()),
            companies::updated_at.eq(now()),
        ))
        .execute(conn)
        .expect("company seed should insert");
    id
}

pub fn seed_mapping(conn: &mut SqliteConnection, recipient_id: Uuid, receiver_type: ReceiverType) {
    diesel::insert_into(receiver_mappings::table)
        .values((
            receiver_mappings::id.eq(blob(Uuid::new_v4())),
            receiver_mappings::recipient_id.eq(blob(recipient_id)),
            receiver_mappings::receiver_type.eq(receiver_type.as_tag()),
            receiver_mappings::created_at.eq(now()),
        ))
        .execute(conn)
        .expect("mapping seed should insert");
}

/// Inserts one ledger entry for an adviser with the given referral fee and
/// vehicle incentive.
pub fn seed_adviser_entry(
    conn: &mut SqliteConnection,
    adviser_id: Uuid,
    year: i32,
    referral: Option<Decimal>,
    vehicle: Option<Decimal>,
) {
    diesel::insert_into(ledger_entries::table)
        .values((
            ledger_entries::id.eq(blob(Uuid::new_v4())),
            ledger_entries::adviser_id.eq(Some(blob(adviser_id))),
            ledger_entries::entry_year.eq(year),
            ledger_entries::referral_fee.eq(referral.map(|d| d.to_string())),
            ledger_entries::vehicle_incentive.eq(vehicle.map(|d| d.to_string())),
            ledger_entries::created_at.eq(now()),
            ledger_entries::updated_at.eq(now()),
        ))
        .execute(conn)
        .expect("ledger seed should insert");
}

/// Inserts one ledger entry for an affiliate with the given referral fee.
pub fn seed_affiliate_entry(
    conn: &mut SqliteConnection,
    affiliate_id: Uuid,
    year: i32,
    referral: Decimal,
) {
    diesel::insert_into(ledger_entries::table)
        .values((
            ledger_entries::id.eq(blob(Uuid::new_v4())),
            ledger_entries::affiliate_id.eq(Some(blob(affiliate_id))),
            ledger_entries::entry_year.eq(year),
            ledger_entries::referral_fee.eq(Some(referral.to_string())),
            ledger_entries::created_at.eq(now()),
            ledger_entries::updated_at.eq(now()),
        ))
        .execute(conn)
        .expect("ledger seed should insert");
}

/// Inserts one ledger entry for a company with the given training incentive.
pub fn seed_company_entry(
    conn: &mut SqliteConnection,
    company_id: Uuid,
    year: i32,
    training: Decimal,
) {
    diesel::insert_into(ledger_entries::table)
        .values((
            ledger_entries::id.eq(blob(Uuid::new_v4())),
            ledger_entries::company_id.eq(Some(blob(company_id))),
            ledger_entries::entry_year.eq(year),
            ledger_entries::training_incentive.eq(Some(training.to_string())),
            ledger_entries::created_at.eq(now()),
            ledger_entries::updated_at.eq(now()),
        ))
        .execute(conn)
        .expect("ledger seed should insert");
}

/// Inserts one ledger entry carrying no recipient link at all.
pub fn seed_unlinked_entry(conn: &mut SqliteConnection, year: i32) {
    diesel::insert_into(ledger_entries::table)
        .values((
            ledger_entries::id.eq(blob(Uuid::new_v4())),
            ledger_entries::entry_year.eq(year),
            ledger_entries::other_incentive.eq(Some("5".to_string())),
            ledger_entries::created_at.eq(now()),
            ledger_entries::updated_at.eq(now()),
        ))
        .execute(conn)
        .expect("ledger seed should insert");
}

pub const TEST_ADDRESS: &str =
    r#"{"addressLine1": "1 Main St", "city": "KL", "country": "MALAYSIA"}"#;

/// A renderer that records nothing and emits fixed bytes per format.
#[derive(Debug, Clone, Default)]
pub struct MockRenderer;

impl Renderer for MockRenderer {
    type Document = Vec<u8>;

    fn fill(
        &self,
        _template: &Path,
        parameters: &BTreeMap<String, Value>,
    ) -> Result<Self::Document, RenderError> {
        serde_json::to_vec(parameters).map_err(|e| RenderError::Fill(e.to_string()))
    }

    fn export_pdf(&self, document: &Self::Document) -> Result<Vec<u8>, RenderError> {
        let mut bytes = b"%PDF ".to_vec();
        bytes.extend_from_slice(document);
        Ok(bytes)
    }

    fn export_spreadsheet(
        &self,
        document: &Self::Document,
        _options: &SpreadsheetOptions,
    ) -> Result<Vec<u8>, RenderError> {
        let mut bytes = b"XLSX ".to_vec();
        bytes.extend_from_slice(document);
        Ok(bytes)
    }
}

/// A notification sender that records every delivery.
#[derive(Debug, Clone, Default)]
pub struct CountingNotifier {
    pub delivered: Arc<Mutex<Vec<Uuid>>>,
}

impl NotificationSender for CountingNotifier {
    fn distribution_complete(
        &self,
        recipient_id: Uuid,
        _adviser: &Adviser,
    ) -> Result<(), NotifyError> {
        self.delivered
            .lock()
            .expect("notifier lock should not be poisoned")
            .push(recipient_id);
        Ok(())
    }
}
