// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection management with PRAGMA setup and migrations.
//!
//! Every statement runs on tokio-rusqlite's single background thread, so
//! the `Database` is the only writer.

use std::path::Path;
use std::time::Duration;

use fitwise_core::FitwiseError;
use tracing::debug;

use crate::migrations;

/// Convert a tokio-rusqlite error into `FitwiseError::Storage`.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> FitwiseError {
    FitwiseError::storage(e)
}

/// Handle to the record store database.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path` and migrates it.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, FitwiseError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(FitwiseError::storage)?;
        }
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(FitwiseError::storage)?;
        let db = Self { conn };
        db.prepare().await?;
        debug!(path = %path.display(), "record store opened");
        Ok(db)
    }

    /// Opens a private in-memory database.
    pub async fn open_in_memory() -> Result<Self, FitwiseError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(FitwiseError::storage)?;
        let db = Self { conn };
        db.prepare().await?;
        Ok(db)
    }

    /// The underlying connection. Query modules call through it.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    async fn prepare(&self) -> Result<(), FitwiseError> {
        self.conn
            .call(|conn| -> Result<(), FitwiseError> {
                // journal_mode answers with a row, so it cannot go through execute_batch.
                conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))
                    .map_err(FitwiseError::storage)?;
                conn.execute_batch("PRAGMA foreign_keys = ON;")
                    .map_err(FitwiseError::storage)?;
                conn.busy_timeout(Duration::from_secs(5))
                    .map_err(FitwiseError::storage)?;
                migrations::run_migrations(conn).map_err(|e| FitwiseError::Storage {
                    source: format!("migration failed: {e}").into(),
                })
            })
            .await
            .map_err(|e| FitwiseError::Storage {
                source: e.to_string().into(),
            })
    }
}

/// Today's date in the `YYYY-MM-DD` form every log row uses.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
