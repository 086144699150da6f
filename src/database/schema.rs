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

//! Diesel table definitions for the CP58 pipeline schema.
//!
//! SQLite storage conventions: UUIDs as BLOB, timestamps as RFC3339 TEXT,
//! monetary amounts as TEXT. Conversions to domain types happen at the DAL
//! boundary (see [`crate::database::types`]).

diesel::table! {
    ledger_entries (id) {
        id -> Binary,
        adviser_id -> Nullable<Binary>,
        affiliate_id -> Nullable<Binary>,
        company_id -> Nullable<Binary>,
        entry_year -> Integer,
        referral_fee -> Nullable<Text>,
        vehicle_incentive -> Nullable<Text>,
        house_incentive -> Nullable<Text>,
        travel_incentive -> Nullable<Text>,
        training_incentive -> Nullable<Text>,
        other_incentive -> Nullable<Text>,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    advisers (id) {
        id -> Binary,
        code -> Text,
        preferred_name -> Text,
        identification_no -> Nullable<Text>,
        income_tax_no -> Nullable<Text>,
        residential_address -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    affiliates (id) {
        id -> Binary,
        name -> Text,
        identification_no -> Nullable<Text>,
        corresponding_address -> Text,
        referral_partner_id -> Nullable<Binary>,
        referral_partner_code -> Nullable<Text>,
        business_registration_no -> Nullable<Text>,
        volunteer_partner_id -> Nullable<Binary>,
        volunteer_partner_code -> Nullable<Text>,
        agency_manager_id -> Nullable<Binary>,
        agency_manager_code -> Nullable<Text>,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    companies (id) {
        id -> Binary,
        code -> Text,
        name -> Text,
        business_registration_no -> Nullable<Text>,
        owner_income_tax_no -> Nullable<Text>,
        branch_address -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    receiver_mappings (id) {
        id -> Binary,
        recipient_id -> Binary,
        receiver_type -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    cp58_summaries (id) {
        id -> Binary,
        recipient_id -> Binary,
        recipient_code -> Text,
        recipient_name -> Text,
        recipient_type -> Text,
        identification_no -> Nullable<Text>,
        income_tax_no -> Nullable<Text>,
        business_registration_no -> Nullable<Text>,
        resident_code -> Nullable<Integer>,
        recipient_address -> Nullable<Text>,
        total_referral -> Nullable<Text>,
        total_vehicle -> Nullable<Text>,
        total_house -> Nullable<Text>,
        total_travel -> Nullable<Text>,
        total_training -> Nullable<Text>,
        total_other -> Nullable<Text>,
        years -> Integer,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    distributed_files (id) {
        id -> Binary,
        receiver_type -> Text,
        adviser_id -> Nullable<Binary>,
        affiliate_id -> Nullable<Binary>,
        file_name -> Text,
        file_path -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    job_statuses (id) {
        id -> Integer,
        job_kind -> Text,
        status -> Text,
        updated_at -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    ledger_entries,
    advisers,
    affiliates,
    companies,
    receiver_mappings,
    cp58_summaries,
    distributed_files,
    job_statuses,
);
