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

//! Receiver types: the canonical audience/category tag for a commission
//! recipient.
//!
//! The tag drives both the aggregation key of a yearly summary and the
//! output-folder routing of rendered documents. It is stored in the database
//! and used as the per-audience folder name, so the string form must stay
//! stable.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Canonical audience/category tag for a commission recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReceiverType {
    /// Individual financial adviser.
    Adviser,
    /// Partner-company director role.
    CompanyDirector,
    /// Partner-company manager role.
    CompanyManager,
    /// Affiliate referral-partner sub-role (carries a business registration).
    ReferralPartner,
    /// Affiliate volunteer-partner sub-role.
    VolunteerPartner,
    /// Affiliate manager sub-role.
    AgencyManager,
}

impl ReceiverType {
    /// All six receiver types, in report-emission order.
    pub const ALL: [ReceiverType; 6] = [
        ReceiverType::Adviser,
        ReceiverType::CompanyDirector,
        ReceiverType::CompanyManager,
        ReceiverType::ReferralPartner,
        ReceiverType::VolunteerPartner,
        ReceiverType::AgencyManager,
    ];

    /// The three audiences whose rendered PDFs are distributed and archived.
    pub const DISTRIBUTION_AUDIENCES: [ReceiverType; 3] = [
        ReceiverType::Adviser,
        ReceiverType::AgencyManager,
        ReceiverType::ReferralPartner,
    ];

    /// Stable string tag, used for DB storage and folder names.
    pub fn as_tag(&self) -> &'static str {
        match self {
            ReceiverType::Adviser => "ADVISER",
            ReceiverType::CompanyDirector => "COMPANY_DIRECTOR",
            ReceiverType::CompanyManager => "COMPANY_MANAGER",
            ReceiverType::ReferralPartner => "REFERRAL_PARTNER",
            ReceiverType::VolunteerPartner => "VOLUNTEER_PARTNER",
            ReceiverType::AgencyManager => "AGENCY_MANAGER",
        }
    }

    /// Parses a stored tag. Unknown tags fail with `InvalidRecipientType`.
    pub fn from_tag(tag: &str) -> Result<Self, PipelineError> {
        match tag {
            "ADVISER" => Ok(ReceiverType::Adviser),
            "COMPANY_DIRECTOR" => Ok(ReceiverType::CompanyDirector),
            "COMPANY_MANAGER" => Ok(ReceiverType::CompanyManager),
            "REFERRAL_PARTNER" => Ok(ReceiverType::ReferralPartner),
            "VOLUNTEER_PARTNER" => Ok(ReceiverType::VolunteerPartner),
            "AGENCY_MANAGER" => Ok(ReceiverType::AgencyManager),
            other => Err(PipelineError::InvalidRecipientType(other.to_string())),
        }
    }

    /// True for the two partner-company roles.
    pub fn is_company_role(&self) -> bool {
        matches!(
            self,
            ReceiverType::CompanyDirector | ReceiverType::CompanyManager
        )
    }

    /// True for the three affiliate sub-roles.
    pub fn is_affiliate_role(&self) -> bool {
        matches!(
            self,
            ReceiverType::ReferralPartner
                | ReceiverType::VolunteerPartner
                | ReceiverType::AgencyManager
        )
    }

    /// True for audiences handled by the distribution/archival phase.
    pub fn is_distribution_audience(&self) -> bool {
        Self::DISTRIBUTION_AUDIENCES.contains(self)
    }
}

impl fmt::Display for ReceiverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for rt in ReceiverType::ALL {
            assert_eq!(ReceiverType::from_tag(rt.as_tag()).unwrap(), rt);
        }
    }

    #[test]
    fn test_unknown_tag_is_invalid_recipient_type() {
        let err = ReceiverType::from_tag("INTERN").unwrap_err();
        assert_eq!(err.code(), "CP58_INVALID_RECIPIENT_TYPE");
    }

    #[test]
    fn test_role_partitions() {
        assert!(ReceiverType::CompanyDirector.is_company_role());
        assert!(ReceiverType::ReferralPartner.is_affiliate_role());
        assert!(!ReceiverType::Adviser.is_company_role());
        assert!(!ReceiverType::Adviser.is_affiliate_role());
    }

    #[test]
    fn test_distribution_audiences() {
        assert!(ReceiverType::Adviser.is_distribution_audience());
        assert!(ReceiverType::AgencyManager.is_distribution_audience());
        assert!(ReceiverType::ReferralPartner.is_distribution_audience());
        assert!(!ReceiverType::CompanyDirector.is_distribution_audience());
        assert!(!ReceiverType::VolunteerPartner.is_distribution_audience());
    }
}
