//! Failures after the status commit: surfaced on the result, repairable later.

use std::sync::Arc;

use test_fixtures::*;
use verdict_core::config::VerdictConfig;
use verdict_core::models::*;
use verdict_core::traits::IAccountStore;
use verdict_core::ErrorKind;
use verdict_engine::{Collaborators, ModerationService};
use verdict_storage::StorageEngine;

struct Harness {
    service: ModerationService,
    storage: Arc<StorageEngine>,
    content: Arc<FlakyContentGateway>,
    accounts: Arc<FlakyAccountStore>,
    notifier: Arc<RecordingNotifier>,
}

/// Both flaky collaborators start healthy; tests switch them off.
fn harness() -> Harness {
    let storage = seeded_storage();
    let content = Arc::new(FlakyContentGateway::new(storage.clone()));
    let accounts = Arc::new(FlakyAccountStore::new(storage.clone()));
    content.set_failing(false);
    accounts.set_failing(false);
    let notifier = Arc::new(RecordingNotifier::default());

    let collaborators = Collaborators {
        reports: storage.clone(),
        ledger: storage.clone(),
        content: content.clone(),
        accounts: accounts.clone(),
        notifier: notifier.clone(),
    };
    let service =
        ModerationService::with_collaborators(collaborators, VerdictConfig::default()).unwrap();
    Harness {
        service,
        storage,
        content,
        accounts,
        notifier,
    }
}

fn reject_with_strike(h: &Harness, content_id: &str) -> (ContentReport, DecisionResult) {
    let report = h
        .service
        .create_report(new_report(ContentType::Melody, content_id))
        .unwrap();
    let result = h
        .service
        .decide(&DecisionRequest {
            report_id: report.id.clone(),
            moderator: ModeratorContext::moderator(MODERATOR),
            action: ModerationAction::Reject,
            apply_strike: true,
            notes: None,
        })
        .unwrap();
    (report, result)
}

#[test]
fn deactivation_failure_keeps_status_and_strike() {
    let h = harness();
    h.content.set_failing(true);

    let (report, result) = reject_with_strike(&h, "mel-1");
    assert_eq!(result.status, ReportStatus::Rejected);
    assert!(!result.content_deactivated);
    assert!(result.strike_recorded);
    assert!(result.is_partial());
    assert!(matches!(
        &result.failures[..],
        [PartialFailure::ContentDeactivation { content_id, .. }] if content_id == "mel-1"
    ));

    let stored = h.service.get_report(&report.id).unwrap().unwrap();
    assert_eq!(stored.status, ReportStatus::Rejected);
    assert!(h.storage.get_content(ContentType::Melody, "mel-1").unwrap().unwrap().active);
}

#[test]
fn reapply_deactivation_repairs_the_content() {
    let h = harness();
    h.content.set_failing(true);
    let (report, _) = reject_with_strike(&h, "mel-1");

    h.content.set_failing(false);
    h.service
        .reapply_deactivation(&report.id, &ModeratorContext::moderator(MODERATOR))
        .unwrap();
    assert!(!h.storage.get_content(ContentType::Melody, "mel-1").unwrap().unwrap().active);
    assert_eq!(h.service.strikes_for_account(PRODUCER).unwrap().len(), 1);
}

#[test]
fn reapply_deactivation_requires_a_rejected_report() {
    let h = harness();
    let report = h
        .service
        .create_report(new_report(ContentType::Melody, "mel-1"))
        .unwrap();

    let err = h
        .service
        .reapply_deactivation(&report.id, &ModeratorContext::moderator(MODERATOR))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);

    let err = h
        .service
        .reapply_deactivation("missing", &ModeratorContext::moderator(MODERATOR))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn block_failure_keeps_the_strike_and_escalation_can_be_replayed() {
    let h = harness();
    let now = timestamp_now();
    backdated_strike(h.storage.as_ref(), PRODUCER, now, 5);
    backdated_strike(h.storage.as_ref(), PRODUCER, now, 6);
    h.accounts.set_failing(true);

    let (_, result) = reject_with_strike(&h, "mel-2");
    assert!(result.strike_recorded);
    assert_eq!(result.strike_count, Some(3));
    assert!(!result.account_blocked);
    assert!(matches!(
        &result.failures[..],
        [PartialFailure::AccountBlock { account_id, .. }] if account_id == PRODUCER
    ));
    assert!(!h.storage.is_blocked(PRODUCER).unwrap());

    h.accounts.set_failing(false);
    let outcome = h
        .service
        .reapply_escalation(PRODUCER, &ModeratorContext::moderator(MODERATOR))
        .unwrap();
    assert!(outcome.is_newly_blocked());
    assert!(h.storage.is_blocked(PRODUCER).unwrap());

    h.service.flush_notifications();
    assert_eq!(h.notifier.sent().len(), 1);
}

#[test]
fn reapply_strike_is_refused_once_a_strike_exists() {
    let h = harness();
    let (report, _) = reject_with_strike(&h, "mel-1");

    let err = h
        .service
        .reapply_strike(&report.id, &ModeratorContext::moderator(MODERATOR))
        .unwrap_err();
    assert!(matches!(err, verdict_core::VerdictError::StrikeAlreadyRecorded { .. }));
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert_eq!(h.service.strikes_for_account(PRODUCER).unwrap().len(), 1);
}

#[test]
fn reapply_strike_records_a_missing_strike() {
    let h = harness();
    let report = h
        .service
        .create_report(new_report(ContentType::Melody, "mel-4"))
        .unwrap();
    h.service
        .decide(&DecisionRequest {
            report_id: report.id.clone(),
            moderator: ModeratorContext::moderator(MODERATOR),
            action: ModerationAction::Reject,
            apply_strike: false,
            notes: None,
        })
        .unwrap();

    let result = h
        .service
        .reapply_strike(&report.id, &ModeratorContext::moderator(MODERATOR))
        .unwrap();
    assert!(result.strike_recorded);
    assert_eq!(result.strike_count, Some(1));
    assert_eq!(result.strike.unwrap().report_id, report.id);
}

#[test]
fn remediation_requires_a_moderator() {
    let h = harness();
    let caller = ModeratorContext {
        account_id: REPORTER.to_string(),
        is_moderator: false,
    };
    let err = h.service.reapply_escalation(PRODUCER, &caller).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}
