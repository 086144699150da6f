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

//! Recipient models: advisers, affiliates (with their sub-role handles) and
//! partner companies. All are read-only reference data for this pipeline.

use diesel::prelude::*;
use uuid::Uuid;

use crate::database::types::blob_to_uuid;
use crate::models::receiver::ReceiverType;

/// An individual financial adviser.
#[derive(Debug, Clone)]
pub struct Adviser {
    pub id: Uuid,
    pub code: String,
    pub preferred_name: String,
    pub identification_no: Option<String>,
    pub income_tax_no: Option<String>,
    /// Loosely structured JSON address payload.
    pub residential_address: String,
}

/// A sub-role handle on an affiliate: the identity that actually receives
/// commission under one of the three affiliate receiver types.
#[derive(Debug, Clone)]
pub struct SubRoleRef {
    pub id: Uuid,
    pub code: String,
}

/// A referral/volunteer/manager affiliate. At most one handle per sub-role;
/// the receiver-type mapping decides which one a summary is keyed on.
#[derive(Debug, Clone)]
pub struct Affiliate {
    pub id: Uuid,
    pub name: String,
    pub identification_no: Option<String>,
    /// Loosely structured JSON address payload.
    pub corresponding_address: String,
    pub referral_partner: Option<SubRoleRef>,
    /// Business registration carried by the referral-partner sub-role.
    pub business_registration_no: Option<String>,
    pub volunteer_partner: Option<SubRoleRef>,
    pub agency_manager: Option<SubRoleRef>,
}

impl Affiliate {
    /// The sub-role handle for a given affiliate receiver type, if present.
    pub fn sub_role(&self, receiver_type: ReceiverType) -> Option<&SubRoleRef> {
        match receiver_type {
            ReceiverType::ReferralPartner => self.referral_partner.as_ref(),
            ReceiverType::VolunteerPartner => self.volunteer_partner.as_ref(),
            ReceiverType::AgencyManager => self.agency_manager.as_ref(),
            _ => None,
        }
    }

}

/// A partner company.
#[derive(Debug, Clone)]
pub struct Company {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub business_registration_no: Option<String>,
    pub owner_income_tax_no: Option<String>,
    /// Loosely structured JSON address payload.
    pub branch_address: String,
}

// Row forms.

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = crate::database::schema::advisers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AdviserRow {
    pub id: Vec<u8>,
    pub code: String,
    pub preferred_name: String,
    pub identification_no: Option<String>,
    pub income_tax_no: Option<String>,
    pub residential_address: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = crate::database::schema::affiliates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AffiliateRow {
    pub id: Vec<u8>,
    pub name: String,
    pub identification_no: Option<String>,
    pub corresponding_address: String,
    pub referral_partner_id: Option<Vec<u8>>,
    pub referral_partner_code: Option<String>,
    pub business_registration_no: Option<String>,
    pub volunteer_partner_id: Option<Vec<u8>>,
    pub volunteer_partner_code: Option<String>,
    pub agency_manager_id: Option<Vec<u8>>,
    pub agency_manager_code: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = crate::database::schema::companies)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CompanyRow {
    pub id: Vec<u8>,
    pub code: String,
    pub name: String,
    pub business_registration_no: Option<String>,
    pub owner_income_tax_no: Option<String>,
    pub branch_address: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<AdviserRow> for Adviser {
    fn from(row: AdviserRow) -> Self {
        Adviser {
            id: blob_to_uuid(&row.id).expect("Invalid UUID in database"),
            code: row.code,
            preferred_name: row.preferred_name,
            identification_no: row.identification_no,
            income_tax_no: row.income_tax_no,
            residential_address: row.residential_address,
        }
    }
}

fn sub_role(id: Option<Vec<u8>>, code: Option<String>) -> Option<SubRoleRef> {
    match (id, code) {
        (Some(id), Some(code)) => Some(SubRoleRef {
            id: blob_to_uuid(&id).expect("Invalid UUID in database"),
            code,
        }),
        _ => None,
    }
}

impl From<AffiliateRow> for Affiliate {
    fn from(row: AffiliateRow) -> Self {
        Affiliate {
            id: blob_to_uuid(&row.id).expect("Invalid UUID in database"),
            name: row.name,
            identification_no: row.identification_no,
            corresponding_address: row.corresponding_address,
            referral_partner: sub_role(row.referral_partner_id, row.referral_partner_code),
            business_registration_no: row.business_registration_no,
            volunteer_partner: sub_role(row.volunteer_partner_id, row.volunteer_partner_code),
            agency_manager: sub_role(row.agency_manager_id, row.agency_manager_code),
        }
    }
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Company {
            id: blob_to_uuid(&row.id).expect("Invalid UUID in database"),
            code: row.code,
            name: row.name,
            business_registration_no: row.business_registration_no,
            owner_income_tax_no: row.owner_income_tax_no,
            branch_address: row.branch_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn affiliate() -> Affiliate {
        Affiliate {
            id: Uuid::new_v4(),
            name: "Partner".into(),
            identification_no: Some("880101015678".into()),
            corresponding_address: "{}".into(),
            referral_partner: None,
            business_registration_no: None,
            volunteer_partner: None,
            agency_manager: None,
        }
    }

    #[test]
    fn test_sub_role_selection() {
        let mut a = affiliate();
        let handle = SubRoleRef {
            id: Uuid::new_v4(),
            code: "MR01".into(),
        };
        a.agency_manager = Some(handle.clone());

        assert_eq!(
            a.sub_role(ReceiverType::AgencyManager).map(|r| &r.code),
            Some(&handle.code)
        );
        assert!(a.sub_role(ReceiverType::ReferralPartner).is_none());
        assert!(a.sub_role(ReceiverType::Adviser).is_none());
    }
}
