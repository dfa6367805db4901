//! Account blocking: idempotency, missing contact address, notifier failures.

use std::sync::Arc;

use test_fixtures::*;
use verdict_core::models::*;
use verdict_core::traits::IAccountStore;
use verdict_core::ErrorKind;
use verdict_engine::{AccountEnforcer, EscalationPolicy, NotificationDispatcher};
use verdict_storage::StorageEngine;

fn enforcer_with(
    storage: &Arc<StorageEngine>,
    notifier: Arc<dyn verdict_core::traits::INotifier>,
) -> (AccountEnforcer, Arc<NotificationDispatcher>) {
    let dispatcher = Arc::new(NotificationDispatcher::new(notifier));
    let enforcer = AccountEnforcer::new(
        storage.clone(),
        EscalationPolicy::default(),
        Arc::clone(&dispatcher),
    );
    (enforcer, dispatcher)
}

#[test]
fn below_threshold_writes_nothing() {
    let storage = seeded_storage();
    let notifier = Arc::new(RecordingNotifier::default());
    let (enforcer, dispatcher) = enforcer_with(&storage, notifier.clone());

    let outcome = enforcer.block_if_needed(PRODUCER, 2, MODERATOR).unwrap();
    assert_eq!(outcome, BlockOutcome::NotBlocked);
    assert!(!storage.is_blocked(PRODUCER).unwrap());
    assert_eq!(dispatcher.flush(), 0);
    assert!(notifier.sent().is_empty());
}

#[test]
fn repeated_enforcement_keeps_the_original_block() {
    let storage = seeded_storage();
    let notifier = Arc::new(RecordingNotifier::default());
    let (enforcer, dispatcher) = enforcer_with(&storage, notifier.clone());

    let first = enforcer.block_if_needed(PRODUCER, 3, MODERATOR).unwrap();
    assert!(first.is_newly_blocked());
    let blocked = storage.get_account(PRODUCER).unwrap().unwrap();

    let second = enforcer.block_if_needed(PRODUCER, 4, "mod-2").unwrap();
    assert_eq!(second, BlockOutcome::AlreadyBlocked);

    let after = storage.get_account(PRODUCER).unwrap().unwrap();
    assert_eq!(after, blocked);
    assert_eq!(after.blocked_by.as_deref(), Some(MODERATOR));

    dispatcher.flush();
    assert_eq!(notifier.sent().len(), 1);
}

#[test]
fn account_without_email_is_blocked_silently() {
    let storage = seeded_storage();
    let notifier = Arc::new(RecordingNotifier::default());
    let (enforcer, dispatcher) = enforcer_with(&storage, notifier.clone());

    let outcome = enforcer.block_if_needed(SILENT_PRODUCER, 3, MODERATOR).unwrap();
    assert!(outcome.is_newly_blocked());
    assert!(storage.is_blocked(SILENT_PRODUCER).unwrap());

    dispatcher.flush();
    assert!(notifier.sent().is_empty());
}

#[test]
fn notifier_failure_does_not_undo_the_block() {
    let storage = seeded_storage();
    let notifier = Arc::new(FailingNotifier::default());
    let (enforcer, dispatcher) = enforcer_with(&storage, notifier.clone());

    let outcome = enforcer.block_if_needed(PRODUCER, 3, MODERATOR).unwrap();
    assert!(outcome.is_newly_blocked());

    assert_eq!(dispatcher.flush(), 1);
    assert_eq!(notifier.attempts(), 1);
    assert!(storage.is_blocked(PRODUCER).unwrap());
}

#[test]
fn unknown_account_is_not_found() {
    let storage = seeded_storage();
    let (enforcer, _) = enforcer_with(&storage, Arc::new(RecordingNotifier::default()));

    let err = enforcer.block_if_needed("ghost", 3, MODERATOR).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn block_is_audited() {
    let storage = seeded_storage();
    let (enforcer, dispatcher) = enforcer_with(&storage, Arc::new(RecordingNotifier::default()));

    enforcer.block_if_needed(PRODUCER, 3, MODERATOR).unwrap();
    dispatcher.flush();

    let trail = storage.audit_trail(PRODUCER).unwrap();
    assert!(trail
        .iter()
        .any(|e| e.operation == AuditOperation::AccountBlocked && e.actor == MODERATOR));
}
