//! ModerationService: owns every component and wires the collaborators.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use verdict_core::config::VerdictConfig;
use verdict_core::constants::MAX_REPORT_LIST_LIMIT;
use verdict_core::errors::VerdictResult;
use verdict_core::models::{
    BlockOutcome, ContentReport, DecisionRequest, DecisionResult, ModeratorContext, NewReport,
    ReportStatus, Strike,
};
use verdict_core::traits::{
    IAccountStore, IContentGateway, INotifier, IReportStore, IStrikeLedger,
};
use verdict_storage::StorageEngine;

use crate::decision::DecisionEngine;
use crate::enforcement::AccountEnforcer;
use crate::escalation::EscalationPolicy;
use crate::intake::ReportIntake;
use crate::ledger::StrikeLedger;
use crate::notify::{notifier_from_config, NotificationDispatcher};

/// The external collaborators the engine talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub reports: Arc<dyn IReportStore>,
    pub ledger: Arc<dyn IStrikeLedger>,
    pub content: Arc<dyn IContentGateway>,
    pub accounts: Arc<dyn IAccountStore>,
    pub notifier: Arc<dyn INotifier>,
}

impl Collaborators {
    /// Use one SQLite engine for every store slot.
    pub fn from_storage(storage: Arc<StorageEngine>, notifier: Arc<dyn INotifier>) -> Self {
        Self {
            reports: storage.clone(),
            ledger: storage.clone(),
            content: storage.clone(),
            accounts: storage,
            notifier,
        }
    }
}

pub struct ModerationService {
    intake: ReportIntake,
    decisions: DecisionEngine,
    reports: Arc<dyn IReportStore>,
    dispatcher: Arc<NotificationDispatcher>,
    config: VerdictConfig,
}

impl ModerationService {
    /// Open a file-backed service with the notifier chosen by `config`.
    pub fn open(path: &Path, config: VerdictConfig) -> VerdictResult<Self> {
        let storage = Arc::new(StorageEngine::open(path, &config.storage)?);
        let notifier = notifier_from_config(&config.notification)?;
        Self::with_collaborators(Collaborators::from_storage(storage, notifier), config)
    }

    /// Open the database named by `config.storage.db_path`.
    pub fn open_configured(config: VerdictConfig) -> VerdictResult<Self> {
        let path = PathBuf::from(&config.storage.db_path);
        Self::open(&path, config)
    }

    /// Open an in-memory service (for testing).
    pub fn open_in_memory(config: VerdictConfig) -> VerdictResult<Self> {
        let storage = Arc::new(StorageEngine::open_in_memory()?);
        let notifier = notifier_from_config(&config.notification)?;
        Self::with_collaborators(Collaborators::from_storage(storage, notifier), config)
    }

    pub fn with_collaborators(
        collaborators: Collaborators,
        config: VerdictConfig,
    ) -> VerdictResult<Self> {
        let policy = EscalationPolicy::new(&config.escalation)?;
        let dispatcher = Arc::new(NotificationDispatcher::new(collaborators.notifier));

        let intake = ReportIntake::new(
            collaborators.reports.clone(),
            collaborators.content.clone(),
            config.intake.clone(),
        );
        let ledger = StrikeLedger::new(collaborators.ledger, policy.clone());
        let enforcer = AccountEnforcer::new(
            collaborators.accounts.clone(),
            policy,
            Arc::clone(&dispatcher),
        );
        let decisions = DecisionEngine::new(
            collaborators.reports.clone(),
            collaborators.content,
            collaborators.accounts,
            ledger,
            enforcer,
        );

        Ok(Self {
            intake,
            decisions,
            reports: collaborators.reports,
            dispatcher,
            config,
        })
    }

    pub fn create_report(&self, new: NewReport) -> VerdictResult<ContentReport> {
        self.intake.create_report(new)
    }

    pub fn decide(&self, request: &DecisionRequest) -> VerdictResult<DecisionResult> {
        self.decisions.decide(request)
    }

    pub fn get_report(&self, id: &str) -> VerdictResult<Option<ContentReport>> {
        self.reports.get_report(id)
    }

    /// Reports in `status`, oldest first. `limit` is capped.
    pub fn list_reports(
        &self,
        status: ReportStatus,
        limit: usize,
    ) -> VerdictResult<Vec<ContentReport>> {
        self.reports
            .list_reports(status, limit.min(MAX_REPORT_LIST_LIMIT))
    }

    pub fn strikes_for_account(&self, account_id: &str) -> VerdictResult<Vec<Strike>> {
        self.decisions.ledger().history(account_id)
    }

    pub fn windowed_count(&self, account_id: &str) -> VerdictResult<u32> {
        self.decisions.ledger().windowed_count(account_id)
    }

    pub fn reapply_deactivation(
        &self,
        report_id: &str,
        moderator: &ModeratorContext,
    ) -> VerdictResult<()> {
        self.decisions.reapply_deactivation(report_id, moderator)
    }

    pub fn reapply_strike(
        &self,
        report_id: &str,
        moderator: &ModeratorContext,
    ) -> VerdictResult<DecisionResult> {
        self.decisions.reapply_strike(report_id, moderator)
    }

    pub fn reapply_escalation(
        &self,
        account_id: &str,
        moderator: &ModeratorContext,
    ) -> VerdictResult<BlockOutcome> {
        self.decisions.reapply_escalation(account_id, moderator)
    }

    /// Block until every dispatched notice has finished.
    pub fn flush_notifications(&self) -> usize {
        self.dispatcher.flush()
    }

    pub fn config(&self) -> &VerdictConfig {
        &self.config
    }
}
