//! Strike ledger: append-only rows and the windowed count.

use chrono::Duration;
use verdict_core::models::*;
use verdict_core::traits::IStrikeLedger;
use verdict_storage::StorageEngine;

fn strike_at(account: &str, report: &str, days_ago: i64) -> Strike {
    let created_at = timestamp_now() - Duration::days(days_ago);
    Strike::at(
        account,
        Strike::reason_for(ContentType::Pack, "pk-1", report),
        report,
        "mod-1",
        created_at,
    )
}

#[test]
fn count_includes_only_strikes_inside_the_window() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.append_strike(&strike_at("acct-1", "r1", 1)).unwrap();
    engine.append_strike(&strike_at("acct-1", "r2", 45)).unwrap();
    engine.append_strike(&strike_at("acct-1", "r3", 91)).unwrap();
    engine.append_strike(&strike_at("acct-1", "r4", 400)).unwrap();

    let since = timestamp_now() - Duration::days(90);
    assert_eq!(engine.count_strikes_since("acct-1", since).unwrap(), 2);
}

#[test]
fn count_is_scoped_to_the_account() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.append_strike(&strike_at("acct-1", "r1", 0)).unwrap();
    engine.append_strike(&strike_at("acct-2", "r2", 0)).unwrap();
    engine.append_strike(&strike_at("acct-2", "r3", 0)).unwrap();

    let since = timestamp_now() - Duration::days(90);
    assert_eq!(engine.count_strikes_since("acct-1", since).unwrap(), 1);
    assert_eq!(engine.count_strikes_since("acct-2", since).unwrap(), 2);
    assert_eq!(engine.count_strikes_since("acct-3", since).unwrap(), 0);
}

#[test]
fn window_lower_bound_is_inclusive() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let since = timestamp_now() - Duration::days(90);
    let edge = Strike::at("acct-1", "edge".into(), "r1", "mod-1", since);
    engine.append_strike(&edge).unwrap();

    assert_eq!(engine.count_strikes_since("acct-1", since).unwrap(), 1);
}

#[test]
fn ledger_does_not_dedupe_by_report() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.append_strike(&strike_at("acct-1", "r1", 0)).unwrap();
    engine.append_strike(&strike_at("acct-1", "r1", 0)).unwrap();

    assert_eq!(engine.strikes_for_report("r1").unwrap().len(), 2);
}

#[test]
fn history_is_ordered_oldest_first() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.append_strike(&strike_at("acct-1", "new", 2)).unwrap();
    engine.append_strike(&strike_at("acct-1", "old", 30)).unwrap();

    let history = engine.strikes_for_account("acct-1").unwrap();
    let reports: Vec<&str> = history.iter().map(|s| s.report_id.as_str()).collect();
    assert_eq!(reports, vec!["old", "new"]);
}

#[test]
fn strikes_cannot_be_updated_or_deleted() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let strike = strike_at("acct-1", "r1", 0);
    engine.append_strike(&strike).unwrap();

    engine
        .pool()
        .writer
        .with_conn_sync(|conn| {
            let update = conn.execute(
                "UPDATE strikes SET account_id = 'someone-else' WHERE id = ?1",
                [&strike.id],
            );
            assert!(update.is_err(), "update must be rejected");

            let delete = conn.execute("DELETE FROM strikes WHERE id = ?1", [&strike.id]);
            assert!(delete.is_err(), "delete must be rejected");
            Ok(())
        })
        .unwrap();

    let history = engine.strikes_for_account("acct-1").unwrap();
    assert_eq!(history, vec![strike]);
}

#[test]
fn strike_append_is_audited_against_the_account() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.append_strike(&strike_at("acct-9", "r1", 0)).unwrap();

    let trail = engine.audit_trail("acct-9").unwrap();
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].operation, AuditOperation::StrikeRecorded);
    assert_eq!(trail[0].details["report_id"], "r1");
}
