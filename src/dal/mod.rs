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

//! Data access layer.
//!
//! The [`Dal`] root owns the connection pool and provides the transaction
//! helper each phase wraps its body in. Per-entity operations live in the
//! submodules and take an explicit connection so they compose inside one
//! transaction.

use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use thiserror::Error;

use crate::database::Database;

pub mod distribution;
pub mod job;
pub mod ledger;
pub mod recipient;
pub mod summary;

/// Database-level failure.
#[derive(Debug, Error)]
pub enum DalError {
    #[error("connection pool error: {0}")]
    ConnectionPool(String),

    #[error("migration error: {0}")]
    Migration(String),

    #[error("query error: {0}")]
    Query(#[from] diesel::result::Error),
}

/// The root data access handle.
#[derive(Clone)]
pub struct Dal {
    pool: Pool<ConnectionManager<SqliteConnection>>,
}

impl Dal {
    /// Creates a DAL over the given database.
    pub fn new(database: &Database) -> Self {
        Dal {
            pool: database.pool(),
        }
    }

    /// Checks out a connection outside any transaction. Used by the
    /// failure-path job-status update, which must not join a rolled-back
    /// transaction.
    pub fn conn(
        &self,
    ) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>, DalError> {
        self.pool
            .get()
            .map_err(|e| DalError::ConnectionPool(e.to_string()))
    }

    /// Executes a closure within a database transaction. Any error rolls the
    /// whole transaction back.
    pub fn transaction<T, F>(&self, f: F) -> Result<T, crate::error::PipelineError>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, crate::error::PipelineError>,
    {
        use diesel::connection::Connection;

        let mut conn = self
            .pool
            .get()
            .map_err(|e| crate::error::PipelineError::Dal(DalError::ConnectionPool(e.to_string())))?;
        conn.transaction(|c| f(&mut **c))
    }
}

impl std::fmt::Debug for Dal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dal")
            .field("pool_state", &self.pool.state())
            .finish()
    }
}
