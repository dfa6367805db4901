//! DecisionEngine: closes a report and applies its consequences.
//!
//! The conditional status write is the linearization point: whoever flips a
//! report out of `pending` owns the whole decision, everyone else gets
//! `InvalidState`. Effects after that write are best-effort. They never roll
//! the status back; a failure becomes a [`PartialFailure`] on the result so an
//! operator can re-run that step with the `reapply_*` operations.

use std::sync::Arc;

use tracing::{debug, info, warn};

use verdict_core::errors::{VerdictError, VerdictResult};
use verdict_core::models::{
    timestamp_now, BlockOutcome, ContentReport, DecisionRequest, DecisionResult,
    ModerationAction, ModeratorContext, PartialFailure, ReportStatus, ReportTransition,
};
use verdict_core::traits::{IAccountStore, IContentGateway, IReportStore};

use crate::enforcement::AccountEnforcer;
use crate::ledger::StrikeLedger;

pub struct DecisionEngine {
    reports: Arc<dyn IReportStore>,
    content: Arc<dyn IContentGateway>,
    accounts: Arc<dyn IAccountStore>,
    ledger: StrikeLedger,
    enforcer: AccountEnforcer,
}

impl DecisionEngine {
    pub fn new(
        reports: Arc<dyn IReportStore>,
        content: Arc<dyn IContentGateway>,
        accounts: Arc<dyn IAccountStore>,
        ledger: StrikeLedger,
        enforcer: AccountEnforcer,
    ) -> Self {
        Self {
            reports,
            content,
            accounts,
            ledger,
            enforcer,
        }
    }

    /// Decide a pending report.
    ///
    /// Errors before the status write (`Unauthorized`, `Validation`,
    /// `ReportNotFound`, `InvalidState`, storage failures) leave everything
    /// unchanged. Once the write commits, this returns `Ok` and reports any
    /// later failure in [`DecisionResult::failures`].
    pub fn decide(&self, request: &DecisionRequest) -> VerdictResult<DecisionResult> {
        let _span = crate::decision_span!(request.report_id, request.action).entered();

        let moderator_id = authorize(&request.moderator)?;
        let report_id = request.report_id.trim();
        if report_id.is_empty() {
            return Err(VerdictError::validation("reportId", "is required"));
        }
        let notes = request
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        let report = match self.reports.transition_report(
            report_id,
            request.action.target_status(),
            moderator_id,
            timestamp_now(),
            notes,
        )? {
            ReportTransition::Applied(report) => report,
            ReportTransition::AlreadyClosed(report) => {
                return Err(VerdictError::InvalidState {
                    report_id: report.id,
                    status: report.status,
                })
            }
            ReportTransition::Missing => {
                return Err(VerdictError::ReportNotFound {
                    id: report_id.to_string(),
                })
            }
        };
        info!(status = %report.status, moderator_id, "report closed");

        let mut result = DecisionResult::closed(report.clone());
        if request.action == ModerationAction::Approve {
            if request.apply_strike {
                debug!("strike requested on an approved report; ignored");
            }
            return Ok(result);
        }

        self.deactivate(&report, moderator_id, &mut result);
        if request.apply_strike {
            self.apply_strike(&report, moderator_id, &mut result);
        }

        if result.is_partial() {
            warn!(failures = result.failures.len(), "decision committed with partial failures");
        }
        Ok(result)
    }

    /// Re-run content deactivation for a rejected report.
    pub fn reapply_deactivation(
        &self,
        report_id: &str,
        moderator: &ModeratorContext,
    ) -> VerdictResult<()> {
        let moderator_id = authorize(moderator)?;
        let report = self.rejected_report(report_id)?;
        self.content
            .set_content_active(report.content_type, &report.content_id, false, moderator_id)?;
        info!(report_id, moderator_id, "content deactivation re-applied");
        Ok(())
    }

    /// Re-run the strike pipeline for a rejected report that has no strike yet.
    pub fn reapply_strike(
        &self,
        report_id: &str,
        moderator: &ModeratorContext,
    ) -> VerdictResult<DecisionResult> {
        let moderator_id = authorize(moderator)?;
        let report = self.rejected_report(report_id)?;
        if !self.ledger.strikes_for_report(&report.id)?.is_empty() {
            return Err(VerdictError::StrikeAlreadyRecorded {
                report_id: report.id,
            });
        }

        let mut result = DecisionResult::closed(report.clone());
        self.apply_strike(&report, moderator_id, &mut result);
        Ok(result)
    }

    /// Recount an account's window and block it if warranted. Covers a block
    /// step that failed after its strike was recorded.
    pub fn reapply_escalation(
        &self,
        account_id: &str,
        moderator: &ModeratorContext,
    ) -> VerdictResult<BlockOutcome> {
        let moderator_id = authorize(moderator)?;
        let count = self.ledger.windowed_count(account_id)?;
        self.enforcer.block_if_needed(account_id, count, moderator_id)
    }

    pub fn ledger(&self) -> &StrikeLedger {
        &self.ledger
    }

    fn rejected_report(&self, report_id: &str) -> VerdictResult<ContentReport> {
        let report = self
            .reports
            .get_report(report_id)?
            .ok_or_else(|| VerdictError::ReportNotFound {
                id: report_id.to_string(),
            })?;
        if report.status != ReportStatus::Rejected {
            return Err(VerdictError::InvalidState {
                report_id: report.id,
                status: report.status,
            });
        }
        Ok(report)
    }

    fn deactivate(&self, report: &ContentReport, moderator_id: &str, result: &mut DecisionResult) {
        match self.content.set_content_active(
            report.content_type,
            &report.content_id,
            false,
            moderator_id,
        ) {
            Ok(()) => result.content_deactivated = true,
            Err(e) => {
                warn!(content_id = %report.content_id, error = %e, "content deactivation failed");
                result.failures.push(PartialFailure::ContentDeactivation {
                    content_type: report.content_type,
                    content_id: report.content_id.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    /// Resolve the current owner, append a strike, and escalate.
    fn apply_strike(&self, report: &ContentReport, moderator_id: &str, result: &mut DecisionResult) {
        let owner = match self.resolve_owner(report) {
            Ok(owner) => owner,
            Err(e) => {
                warn!(error = %e, "could not resolve content owner; no strike recorded");
                result.failures.push(PartialFailure::OwnerResolution {
                    content_type: report.content_type,
                    content_id: report.content_id.clone(),
                    error: e.to_string(),
                });
                return;
            }
        };

        let (strike, count) = match self.ledger.record_strike(&owner, report, moderator_id) {
            Ok(recorded) => recorded,
            Err(e) => {
                warn!(account_id = %owner, error = %e, "strike recording failed");
                result.failures.push(PartialFailure::StrikeRecording {
                    account_id: owner,
                    error: e.to_string(),
                });
                return;
            }
        };
        result.strike_recorded = true;
        result.strike_count = Some(count);
        result.strike = Some(strike);

        match self.enforcer.block_if_needed(&owner, count, moderator_id) {
            Ok(outcome) => result.account_blocked = outcome.is_newly_blocked(),
            Err(e) => {
                warn!(account_id = %owner, error = %e, "account block failed");
                result.failures.push(PartialFailure::AccountBlock {
                    account_id: owner,
                    error: e.to_string(),
                });
            }
        }
    }

    fn resolve_owner(&self, report: &ContentReport) -> VerdictResult<String> {
        self.accounts
            .owner_of(report.content_type, &report.content_id)?
            .ok_or_else(|| VerdictError::ContentNotFound {
                content_type: report.content_type,
                id: report.content_id.clone(),
            })
    }
}

fn authorize(moderator: &ModeratorContext) -> VerdictResult<&str> {
    let id = moderator.account_id.trim();
    if id.is_empty() {
        return Err(VerdictError::validation("moderatorId", "is required"));
    }
    if !moderator.is_moderator {
        return Err(VerdictError::Unauthorized {
            actor: id.to_string(),
        });
    }
    Ok(id)
}
