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

//! Notification seam. The distribution phase pushes one statement-ready
//! notification per distributed adviser file; the delivery channel lives
//! behind this trait.

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::recipient::Adviser;

/// Notification delivery failure.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification delivery failed for {recipient_id}: {reason}")]
    Delivery { recipient_id: Uuid, reason: String },
}

/// A channel for telling an adviser their statement has been distributed.
pub trait NotificationSender {
    fn distribution_complete(
        &self,
        recipient_id: Uuid,
        adviser: &Adviser,
    ) -> Result<(), NotifyError>;
}

/// A sender that only logs. Useful as a default and in environments without
/// a delivery channel configured.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl NotificationSender for NoopNotifier {
    fn distribution_complete(
        &self,
        recipient_id: Uuid,
        adviser: &Adviser,
    ) -> Result<(), NotifyError> {
        info!(
            %recipient_id,
            adviser_code = %adviser.code,
            "statement distributed, notification suppressed (noop sender)"
        );
        Ok(())
    }
}
