//! Service layer holding the database handle and request-independent settings.
//!
//! All repo methods are implemented as `impl DashboardService` blocks in
//! [`crate::repos`]. One service is shared (behind an `Arc`) by every HTTP
//! handler, and every statement runs on the same connection. Autocommit
//! writes hold the shared side of `write_gate`; a transaction holds the
//! exclusive side for its whole lifetime, so no other request's write can
//! land inside it and be rolled back with it.

use chrono::{NaiveDate, Utc};
use libsql::params::IntoParams;
use tokio::sync::{RwLock, RwLockWriteGuard};

use crate::DashDb;
use crate::error::DatabaseError;

/// Projects per dashboard page when not configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

pub struct DashboardService {
    db: DashDb,
    page_size: u32,
    fixed_today: Option<NaiveDate>,
    write_gate: RwLock<()>,
}

impl DashboardService {
    /// Open a local database and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, page_size: u32) -> Result<Self, DatabaseError> {
        let db = DashDb::open_local(db_path).await?;
        Ok(Self::from_db(db).with_page_size(page_size))
    }

    /// Create from an existing `DashDb`.
    #[must_use]
    pub fn from_db(db: DashDb) -> Self {
        Self {
            db,
            page_size: DEFAULT_PAGE_SIZE,
            fixed_today: None,
            write_gate: RwLock::new(()),
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Pin "today" for deterministic completion and overdue calculations.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &DashDb {
        &self.db
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// The current date (UTC) used by every date-relative rule.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Run one autocommit write statement. Waits while a transaction is open.
    pub(crate) async fn execute(
        &self,
        sql: &str,
        params: impl IntoParams,
    ) -> Result<u64, DatabaseError> {
        let _shared = self.write_gate.read().await;
        Ok(self.db.conn().execute(sql, params).await?)
    }

    /// Exclusive access for a transaction on the shared connection.
    ///
    /// Must not be held across a call to [`Self::execute`].
    pub(crate) async fn lock_transaction(&self) -> RwLockWriteGuard<'_, ()> {
        self.write_gate.write().await
    }

    /// Commit on success, roll back on failure. A failed rollback is logged
    /// and the original error returned.
    pub(crate) async fn finish_transaction<T>(
        tx: libsql::Transaction,
        result: Result<T, DatabaseError>,
    ) -> Result<T, DatabaseError> {
        match result {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(error = %rollback, "transaction rollback failed");
                }
                Err(e)
            }
        }
    }

    /// Fail with `NotFound` unless a row with `id` exists in `table`.
    pub(crate) async fn ensure_exists(
        &self,
        table: &str,
        entity: &str,
        id: &str,
    ) -> Result<(), DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(&format!("SELECT 1 FROM {table} WHERE id = ?1"), [id])
            .await?;
        match rows.next().await? {
            Some(_) => Ok(()),
            None => Err(DatabaseError::not_found(entity, id)),
        }
    }
}
