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

//! SQLite connection management for the CP58 pipeline.
//!
//! Provides a pooled [`Database`] handle backed by `r2d2` and embedded
//! schema migrations. URLs may be file paths, `:memory:`, or `file:` URIs
//! (e.g. `file:cp58?mode=memory&cache=shared` for shared in-memory databases
//! in tests).

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

use crate::dal::DalError;

/// Embedded schema migrations, applied by [`Database::run_migrations`].
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// A pooled SQLite database handle.
#[derive(Clone)]
pub struct Database {
    pool: Pool<ConnectionManager<SqliteConnection>>,
}

impl Database {
    /// Opens a connection pool against the given database URL.
    pub fn new(database_url: &str, pool_size: u32) -> Result<Self, DalError> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(|e| DalError::ConnectionPool(e.to_string()))?;

        info!(url = database_url, pool_size, "database pool initialized");
        Ok(Database { pool })
    }

    /// Returns a clone of the underlying connection pool.
    pub fn pool(&self) -> Pool<ConnectionManager<SqliteConnection>> {
        self.pool.clone()
    }

    /// Applies any pending embedded migrations.
    pub fn run_migrations(&self) -> Result<(), DalError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DalError::ConnectionPool(e.to_string()))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| DalError::Migration(e.to_string()))?;
        Ok(())
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("pool_state", &self.pool.state())
            .finish()
    }
}
