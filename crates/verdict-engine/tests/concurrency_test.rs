//! Racing decisions through the full service against a file-backed store.

use std::sync::{Arc, Barrier};

use test_fixtures::*;
use verdict_core::config::VerdictConfig;
use verdict_core::models::*;
use verdict_core::traits::IAccountStore;
use verdict_core::ErrorKind;
use verdict_engine::{Collaborators, ModerationService};
use verdict_storage::StorageEngine;

fn file_service(
    dir: &tempfile::TempDir,
) -> (Arc<ModerationService>, Arc<StorageEngine>, Arc<RecordingNotifier>) {
    let config = VerdictConfig::default();
    let storage = Arc::new(
        StorageEngine::open(&dir.path().join("verdict.db"), &config.storage).unwrap(),
    );
    seed_catalogue(&storage);
    let notifier = Arc::new(RecordingNotifier::default());
    let service = ModerationService::with_collaborators(
        Collaborators::from_storage(storage.clone(), notifier.clone()),
        config,
    )
    .unwrap();
    (Arc::new(service), storage, notifier)
}

fn reject(report_id: &str, moderator: &str) -> DecisionRequest {
    DecisionRequest {
        report_id: report_id.to_string(),
        moderator: ModeratorContext::moderator(moderator),
        action: ModerationAction::Reject,
        apply_strike: true,
        notes: None,
    }
}

#[test]
fn racing_decisions_on_one_report_apply_once() {
    let dir = tempfile::tempdir().unwrap();
    let (service, _, _) = file_service(&dir);
    let report = service
        .create_report(new_report(ContentType::Melody, "mel-1"))
        .unwrap();

    let threads = 6;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            let request = reject(&report.id, &format!("mod-{t}"));
            std::thread::spawn(move || {
                barrier.wait();
                service.decide(&request)
            })
        })
        .collect();

    let outcomes: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("decision thread should not panic"))
        .collect();

    let applied = outcomes.iter().filter(|o| o.is_ok()).count();
    assert_eq!(applied, 1);
    assert!(outcomes
        .iter()
        .filter_map(|o| o.as_ref().err())
        .all(|e| e.kind() == ErrorKind::InvalidState));
    assert_eq!(service.strikes_for_account(PRODUCER).unwrap().len(), 1);
}

#[test]
fn racing_strikes_block_and_notify_exactly_once() {
    let dir = tempfile::tempdir().unwrap();
    let (service, storage, notifier) = file_service(&dir);
    let reports: Vec<ContentReport> = (1..=5)
        .map(|n| {
            service
                .create_report(new_report(ContentType::Melody, &format!("mel-{n}")))
                .unwrap()
        })
        .collect();

    let barrier = Arc::new(Barrier::new(reports.len()));
    let handles: Vec<_> = reports
        .iter()
        .map(|report| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            let request = reject(&report.id, MODERATOR);
            std::thread::spawn(move || {
                barrier.wait();
                service.decide(&request).unwrap()
            })
        })
        .collect();

    let results: Vec<DecisionResult> = handles
        .into_iter()
        .map(|h| h.join().expect("decision thread should not panic"))
        .collect();

    assert!(results.iter().all(|r| r.strike_recorded && r.failures.is_empty()));
    assert_eq!(results.iter().filter(|r| r.account_blocked).count(), 1);
    assert_eq!(service.windowed_count(PRODUCER).unwrap(), 5);
    assert!(storage.is_blocked(PRODUCER).unwrap());

    service.flush_notifications();
    assert_eq!(notifier.sent().len(), 1);
}
