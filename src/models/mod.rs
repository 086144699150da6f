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

//! Domain models and their SQLite row forms.

pub mod distribution;
pub mod job;
pub mod ledger;
pub mod receiver;
pub mod recipient;
pub mod summary;

pub use distribution::{DistributedFile, NewDistributedFile};
pub use job::{JobKind, JobStatus, JobStatusRecord};
pub use ledger::{LedgerEntry, RecipientKind};
pub use receiver::ReceiverType;
pub use recipient::{Adviser, Affiliate, Company, SubRoleRef};
pub use summary::{Cp58Summary, NewCp58Summary, Residency};
