use proptest::prelude::*;
use verdict_core::models::*;

fn new_report() -> NewReport {
    NewReport {
        content_type: ContentType::Melody,
        content_id: "mel-1".into(),
        reporter_id: "user-1".into(),
        reason: "copyright".into(),
        description: None,
    }
}

#[test]
fn pending_report_starts_unmoderated() {
    let report = ContentReport::pending(new_report());
    assert_eq!(report.status, ReportStatus::Pending);
    assert!(report.moderated_by.is_none());
    assert!(report.moderated_at.is_none());
    assert!(!report.id.is_empty());
}

#[test]
fn content_type_parses_case_insensitively() {
    assert_eq!("Melody".parse::<ContentType>().unwrap(), ContentType::Melody);
    assert_eq!(" pack ".parse::<ContentType>().unwrap(), ContentType::Pack);
    assert!("video".parse::<ContentType>().is_err());
}

#[test]
fn action_maps_to_terminal_status() {
    assert_eq!(ModerationAction::Approve.target_status(), ReportStatus::Approved);
    assert_eq!(ModerationAction::Reject.target_status(), ReportStatus::Rejected);
    assert!("ban".parse::<ModerationAction>().is_err());
}

#[test]
fn strike_reason_names_content_and_report() {
    let reason = Strike::reason_for(ContentType::Pack, "pk-7", "rep-3");
    assert!(reason.contains("pack"));
    assert!(reason.contains("pk-7"));
    assert!(reason.contains("rep-3"));
}

#[test]
fn decision_result_serializes_camel_case() {
    let result = DecisionResult::closed(ContentReport::pending(new_report()));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["contentDeactivated"], false);
    assert_eq!(json["status"], "pending");
    assert!(json["failures"].as_array().unwrap().is_empty());
    assert!(!result.is_partial());
}

#[test]
fn timestamps_are_truncated_to_micros() {
    let ts = timestamp_now();
    assert_eq!(ts.timestamp_subsec_nanos() % 1_000, 0);
}

fn arb_status() -> impl Strategy<Value = ReportStatus> {
    prop_oneof![
        Just(ReportStatus::Pending),
        Just(ReportStatus::Approved),
        Just(ReportStatus::Rejected),
    ]
}

proptest! {
    #[test]
    fn only_pending_to_terminal_is_legal(from in arb_status(), to in arb_status()) {
        let legal = from.can_transition_to(to);
        prop_assert_eq!(legal, from == ReportStatus::Pending && to != ReportStatus::Pending);
    }

    #[test]
    fn status_round_trips_through_str(status in arb_status()) {
        prop_assert_eq!(status.as_str().parse::<ReportStatus>().unwrap(), status);
    }
}
