//! StorageEngine: owns the ConnectionPool, runs migrations at startup, and
//! implements the report store, strike ledger, content gateway, and account
//! store traits over SQLite.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::debug;

use verdict_core::config::StorageConfig;
use verdict_core::errors::{VerdictError, VerdictResult};
use verdict_core::models::{
    AccountRecord, AuditEntry, BlockTransition, ContentItem, ContentReport, ContentType,
    ReportStatus, ReportTransition, Strike,
};
use verdict_core::traits::{IAccountStore, IContentGateway, IReportStore, IStrikeLedger};

use crate::audit::AuditLogger;
use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{account_ops, audit_ops, content_ops, report_ops, strike_ops};

/// The main storage engine.
pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path, config: &StorageConfig) -> VerdictResult<Self> {
        let pool = ConnectionPool::open(path, config.read_pool_size, config.busy_timeout_ms)?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    /// All reads are routed through the writer.
    pub fn open_in_memory() -> VerdictResult<Self> {
        let engine = Self {
            pool: ConnectionPool::open_in_memory()?,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> VerdictResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            migrations::run_migrations(conn)?;
            Ok(())
        })
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> VerdictResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> VerdictResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn_sync(f),
        }
    }

    /// Mirror an account from the external account store.
    /// Block state is only ever set through [`IAccountStore::block_account`].
    pub fn upsert_account(&self, account: &AccountRecord) -> VerdictResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| account_ops::upsert_account(conn, account))
    }

    /// Mirror a content item from the external content store.
    pub fn upsert_content(&self, item: &ContentItem) -> VerdictResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| content_ops::upsert_content(conn, item))
    }

    pub fn get_content(
        &self,
        content_type: ContentType,
        content_id: &str,
    ) -> VerdictResult<Option<ContentItem>> {
        self.with_reader(|conn| content_ops::get_content(conn, content_type, content_id))
    }

    /// Audit entries recorded against an entity id, oldest first.
    pub fn audit_trail(&self, entity_id: &str) -> VerdictResult<Vec<AuditEntry>> {
        self.with_reader(|conn| audit_ops::query_by_entity(conn, entity_id))
    }
}

impl IReportStore for StorageEngine {
    fn insert_report(&self, report: &ContentReport) -> VerdictResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            report_ops::insert_report(conn, report)?;
            AuditLogger::log_report_created(conn, report)?;
            Ok(())
        })
    }

    fn get_report(&self, id: &str) -> VerdictResult<Option<ContentReport>> {
        self.with_reader(|conn| report_ops::get_report(conn, id))
    }

    fn transition_report(
        &self,
        id: &str,
        status: ReportStatus,
        moderated_by: &str,
        moderated_at: DateTime<Utc>,
        notes: Option<&str>,
    ) -> VerdictResult<ReportTransition> {
        if !status.is_terminal() {
            return Err(VerdictError::validation(
                "status",
                "reports can only transition to a terminal status",
            ));
        }
        // Update and follow-up read share the writer lock, so "already closed"
        // versus "missing" is decided against the same state the update saw.
        self.pool.writer.with_conn_sync(|conn| {
            let changed =
                report_ops::close_if_pending(conn, id, status, moderated_by, &moderated_at, notes)?;
            let current = report_ops::get_report(conn, id)?;
            match (changed, current) {
                (1, Some(report)) => {
                    AuditLogger::log_report_decided(conn, &report)?;
                    Ok(ReportTransition::Applied(report))
                }
                (_, Some(report)) => {
                    debug!(report_id = id, status = %report.status, "report already closed");
                    Ok(ReportTransition::AlreadyClosed(report))
                }
                (_, None) => Ok(ReportTransition::Missing),
            }
        })
    }

    fn list_reports(&self, status: ReportStatus, limit: usize) -> VerdictResult<Vec<ContentReport>> {
        self.with_reader(|conn| report_ops::list_by_status(conn, status, limit))
    }
}

impl IStrikeLedger for StorageEngine {
    fn append_strike(&self, strike: &Strike) -> VerdictResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            strike_ops::insert_strike(conn, strike)?;
            AuditLogger::log_strike(conn, strike)?;
            Ok(())
        })
    }

    fn count_strikes_since(&self, account_id: &str, since: DateTime<Utc>) -> VerdictResult<u32> {
        self.with_reader(|conn| strike_ops::count_since(conn, account_id, &since))
    }

    fn strikes_for_account(&self, account_id: &str) -> VerdictResult<Vec<Strike>> {
        self.with_reader(|conn| strike_ops::by_account(conn, account_id))
    }

    fn strikes_for_report(&self, report_id: &str) -> VerdictResult<Vec<Strike>> {
        self.with_reader(|conn| strike_ops::by_report(conn, report_id))
    }
}

impl IContentGateway for StorageEngine {
    fn content_exists(&self, content_type: ContentType, content_id: &str) -> VerdictResult<bool> {
        Ok(self.get_content(content_type, content_id)?.is_some())
    }

    fn set_content_active(
        &self,
        content_type: ContentType,
        content_id: &str,
        active: bool,
        actor: &str,
    ) -> VerdictResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            let changed = content_ops::set_active(conn, content_type, content_id, active)?;
            if changed == 0 {
                return Err(VerdictError::ContentNotFound {
                    content_type,
                    id: content_id.to_string(),
                });
            }
            AuditLogger::log_content_activation(conn, content_type, content_id, active, actor)?;
            Ok(())
        })
    }
}

impl IAccountStore for StorageEngine {
    fn owner_of(
        &self,
        content_type: ContentType,
        content_id: &str,
    ) -> VerdictResult<Option<String>> {
        Ok(self
            .get_content(content_type, content_id)?
            .map(|item| item.owner_id))
    }

    fn get_account(&self, account_id: &str) -> VerdictResult<Option<AccountRecord>> {
        self.with_reader(|conn| account_ops::get_account(conn, account_id))
    }

    fn is_blocked(&self, account_id: &str) -> VerdictResult<bool> {
        self.get_account(account_id)?
            .map(|account| account.is_blocked)
            .ok_or_else(|| VerdictError::AccountNotFound {
                id: account_id.to_string(),
            })
    }

    fn block_account(
        &self,
        account_id: &str,
        reason: &str,
        blocked_by: &str,
        blocked_at: DateTime<Utc>,
    ) -> VerdictResult<BlockTransition> {
        self.pool.writer.with_conn_sync(|conn| {
            let changed =
                account_ops::block_if_unblocked(conn, account_id, reason, blocked_by, &blocked_at)?;
            let account = account_ops::get_account(conn, account_id)?.ok_or_else(|| {
                VerdictError::AccountNotFound {
                    id: account_id.to_string(),
                }
            })?;
            if changed == 0 {
                return Ok(BlockTransition::AlreadyBlocked);
            }
            AuditLogger::log_account_blocked(conn, &account)?;
            Ok(BlockTransition::Blocked(account))
        })
    }
}
