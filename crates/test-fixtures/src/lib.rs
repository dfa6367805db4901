//! Shared fixtures for the verdict integration tests.
//!
//! Seeds the SQLite mirrors with a small catalogue and provides collaborator
//! doubles that record or fail on demand.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use verdict_core::errors::{VerdictError, VerdictResult};
use verdict_core::models::{
    new_id, AccountRecord, BlockNotice, BlockTransition, ContentItem, ContentType, NewReport,
    Strike,
};
use verdict_core::traits::{IAccountStore, IContentGateway, INotifier, IStrikeLedger};
use verdict_storage::StorageEngine;

pub const MODERATOR: &str = "mod-1";
pub const REPORTER: &str = "listener-1";
/// Owns `mel-1`..`mel-5` and `pack-1`; has an email on file.
pub const PRODUCER: &str = "producer-1";
/// Owns `mel-9`; no email on file.
pub const SILENT_PRODUCER: &str = "producer-2";
pub const PRODUCER_EMAIL: &str = "p1@example.com";

/// In-memory engine seeded with the standard catalogue.
pub fn seeded_storage() -> Arc<StorageEngine> {
    let engine = StorageEngine::open_in_memory()
        .unwrap_or_else(|e| panic!("failed to open in-memory storage: {e}"));
    seed_catalogue(&engine);
    Arc::new(engine)
}

/// Seed accounts and content into an existing engine.
pub fn seed_catalogue(engine: &StorageEngine) {
    seed_account(engine, PRODUCER, Some(PRODUCER_EMAIL));
    seed_account(engine, SILENT_PRODUCER, None);
    seed_account(engine, REPORTER, Some("listener@example.com"));
    for n in 1..=5 {
        seed_content(engine, ContentType::Melody, &format!("mel-{n}"), PRODUCER);
    }
    seed_content(engine, ContentType::Pack, "pack-1", PRODUCER);
    seed_content(engine, ContentType::Melody, "mel-9", SILENT_PRODUCER);
}

pub fn seed_account(engine: &StorageEngine, id: &str, email: Option<&str>) {
    engine
        .upsert_account(&AccountRecord::new(id, email))
        .unwrap_or_else(|e| panic!("failed to seed account {id}: {e}"));
}

pub fn seed_content(engine: &StorageEngine, content_type: ContentType, id: &str, owner: &str) {
    engine
        .upsert_content(&ContentItem::new(content_type, id, owner))
        .unwrap_or_else(|e| panic!("failed to seed {content_type} {id}: {e}"));
}

/// A well-formed report against `content_id`.
pub fn new_report(content_type: ContentType, content_id: &str) -> NewReport {
    NewReport {
        content_type,
        content_id: content_id.to_string(),
        reporter_id: REPORTER.to_string(),
        reason: "copyright".to_string(),
        description: Some("sample lifted from a released track".to_string()),
    }
}

/// Append a strike created `days_ago` days before `now`, tied to a fresh report id.
pub fn backdated_strike(
    ledger: &dyn IStrikeLedger,
    account_id: &str,
    now: DateTime<Utc>,
    days_ago: i64,
) -> Strike {
    let strike = Strike::at(
        account_id,
        "imported".to_string(),
        &new_id(),
        MODERATOR,
        now - Duration::days(days_ago),
    );
    ledger
        .append_strike(&strike)
        .unwrap_or_else(|e| panic!("failed to append backdated strike: {e}"));
    strike
}

/// Records every notice it is handed.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<BlockNotice>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<BlockNotice> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl INotifier for RecordingNotifier {
    fn notify_blocked(&self, notice: &BlockNotice) -> VerdictResult<()> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notice.clone());
        Ok(())
    }
}

/// Always fails, counting attempts.
#[derive(Default)]
pub struct FailingNotifier {
    attempts: Mutex<u32>,
}

impl FailingNotifier {
    pub fn attempts(&self) -> u32 {
        *self.attempts.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl INotifier for FailingNotifier {
    fn notify_blocked(&self, _notice: &BlockNotice) -> VerdictResult<()> {
        *self.attempts.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Err(VerdictError::NotificationError {
            reason: "smtp relay unavailable".to_string(),
        })
    }
}

/// Content gateway whose deactivation fails while `failing` is set.
pub struct FlakyContentGateway {
    inner: Arc<StorageEngine>,
    failing: AtomicBool,
}

impl FlakyContentGateway {
    pub fn new(inner: Arc<StorageEngine>) -> Self {
        Self {
            inner,
            failing: AtomicBool::new(true),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl IContentGateway for FlakyContentGateway {
    fn content_exists(&self, content_type: ContentType, content_id: &str) -> VerdictResult<bool> {
        self.inner.content_exists(content_type, content_id)
    }

    fn set_content_active(
        &self,
        content_type: ContentType,
        content_id: &str,
        active: bool,
        actor: &str,
    ) -> VerdictResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(VerdictError::dependency("content", "content service timed out"));
        }
        self.inner
            .set_content_active(content_type, content_id, active, actor)
    }
}

/// Account store whose block write fails while `failing` is set.
pub struct FlakyAccountStore {
    inner: Arc<StorageEngine>,
    failing: AtomicBool,
}

impl FlakyAccountStore {
    pub fn new(inner: Arc<StorageEngine>) -> Self {
        Self {
            inner,
            failing: AtomicBool::new(true),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl IAccountStore for FlakyAccountStore {
    fn owner_of(
        &self,
        content_type: ContentType,
        content_id: &str,
    ) -> VerdictResult<Option<String>> {
        self.inner.owner_of(content_type, content_id)
    }

    fn get_account(&self, account_id: &str) -> VerdictResult<Option<AccountRecord>> {
        self.inner.get_account(account_id)
    }

    fn is_blocked(&self, account_id: &str) -> VerdictResult<bool> {
        self.inner.is_blocked(account_id)
    }

    fn block_account(
        &self,
        account_id: &str,
        reason: &str,
        blocked_by: &str,
        blocked_at: DateTime<Utc>,
    ) -> VerdictResult<BlockTransition> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(VerdictError::dependency("accounts", "account service unavailable"));
        }
        self.inner
            .block_account(account_id, reason, blocked_by, blocked_at)
    }
}
