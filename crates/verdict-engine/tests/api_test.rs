//! JSON request handlers and the error-to-status mapping.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use test_fixtures::*;
use verdict_core::config::VerdictConfig;
use verdict_core::errors::{VerdictError, VerdictResult};
use verdict_core::models::*;
use verdict_core::traits::IReportStore;
use verdict_core::ErrorKind;
use verdict_engine::api::{patch_decision, post_report, status_for};
use verdict_engine::{Collaborators, ModerationService};

fn service() -> ModerationService {
    let storage = seeded_storage();
    ModerationService::with_collaborators(
        Collaborators::from_storage(storage, Arc::new(RecordingNotifier::default())),
        VerdictConfig::default(),
    )
    .unwrap()
}

fn report_body(content_type: &str, content_id: &str) -> String {
    json!({
        "contentType": content_type,
        "contentId": content_id,
        "reporterId": REPORTER,
        "reason": "spam",
    })
    .to_string()
}

fn create(service: &ModerationService, content_id: &str) -> String {
    let response = post_report(service, &report_body("melody", content_id));
    assert_eq!(response.status, 201, "{}", response.body);
    response.body["id"].as_str().unwrap().to_string()
}

fn moderator() -> ModeratorContext {
    ModeratorContext::moderator(MODERATOR)
}

fn error_kind(body: &Value) -> &str {
    body["error"]["kind"].as_str().unwrap()
}

#[test]
fn post_report_returns_the_pending_report() {
    let service = service();
    let response = post_report(&service, &report_body("Melody", "mel-1"));
    assert_eq!(response.status, 201);
    assert_eq!(response.body["status"], "pending");
    assert_eq!(response.body["contentType"], "melody");
    assert_eq!(response.body["contentId"], "mel-1");
    assert!(response.body["moderatedBy"].is_null());
}

#[test]
fn post_report_validation_errors_are_400() {
    let service = service();

    let response = post_report(&service, &report_body("video", "mel-1"));
    assert_eq!(response.status, 400);
    assert_eq!(error_kind(&response.body), "Validation");

    let response = post_report(&service, r#"{"contentType":"melody","contentId":"mel-1"}"#);
    assert_eq!(response.status, 400);

    let response = post_report(&service, "not json");
    assert_eq!(response.status, 400);
}

#[test]
fn post_report_for_missing_content_is_404() {
    let service = service();
    let response = post_report(&service, &report_body("pack", "pack-404"));
    assert_eq!(response.status, 404);
    assert_eq!(error_kind(&response.body), "NotFound");
}

#[test]
fn patch_decision_reports_effects() {
    let service = service();
    let id = create(&service, "mel-1");

    let body = json!({"reportId": id, "action": "reject", "applyStrike": true}).to_string();
    let response = patch_decision(&service, &moderator(), &body);
    assert_eq!(response.status, 200, "{}", response.body);
    assert_eq!(response.body["status"], "rejected");
    assert_eq!(response.body["contentDeactivated"], true);
    assert_eq!(response.body["strikeRecorded"], true);
    assert_eq!(response.body["strikeCount"], 1);
    assert_eq!(response.body["partial"], false);
    assert_eq!(response.body["failures"], json!([]));
}

#[test]
fn patch_decision_maps_errors_to_statuses() {
    let service = service();
    let id = create(&service, "mel-1");
    let body = json!({"reportId": id, "action": "approve"}).to_string();

    let outsider = ModeratorContext {
        account_id: REPORTER.to_string(),
        is_moderator: false,
    };
    assert_eq!(patch_decision(&service, &outsider, &body).status, 403);

    assert_eq!(patch_decision(&service, &moderator(), &body).status, 200);
    let replay = patch_decision(&service, &moderator(), &body);
    assert_eq!(replay.status, 409);
    assert_eq!(error_kind(&replay.body), "InvalidState");

    let missing = json!({"reportId": "nope", "action": "approve"}).to_string();
    assert_eq!(patch_decision(&service, &moderator(), &missing).status, 404);

    let bad_action = json!({"reportId": id, "action": "escalate"}).to_string();
    assert_eq!(patch_decision(&service, &moderator(), &bad_action).status, 400);
}

#[test]
fn moderator_id_must_match_the_caller() {
    let service = service();
    let id = create(&service, "mel-1");
    let body = json!({"reportId": id, "moderatorId": "mod-2", "action": "reject"}).to_string();

    let response = patch_decision(&service, &moderator(), &body);
    assert_eq!(response.status, 400);
    assert_eq!(
        service.get_report(&id).unwrap().unwrap().status,
        ReportStatus::Pending
    );
}

#[test]
fn partial_success_is_200_with_failures() {
    let storage = seeded_storage();
    let content = Arc::new(FlakyContentGateway::new(storage.clone()));
    let service = ModerationService::with_collaborators(
        Collaborators {
            reports: storage.clone(),
            ledger: storage.clone(),
            content,
            accounts: storage,
            notifier: Arc::new(RecordingNotifier::default()),
        },
        VerdictConfig::default(),
    )
    .unwrap();
    let id = create(&service, "mel-1");

    let body = json!({"reportId": id, "action": "reject"}).to_string();
    let response = patch_decision(&service, &moderator(), &body);
    assert_eq!(response.status, 200);
    assert_eq!(response.body["partial"], true);
    assert_eq!(response.body["failures"][0]["step"], "content_deactivation");
    assert_eq!(response.body["status"], "rejected");
}

/// Report store that is always down.
struct UnavailableReports;

impl IReportStore for UnavailableReports {
    fn insert_report(&self, _report: &ContentReport) -> VerdictResult<()> {
        Err(VerdictError::dependency("reports", "connection refused"))
    }

    fn get_report(&self, _id: &str) -> VerdictResult<Option<ContentReport>> {
        Err(VerdictError::dependency("reports", "connection refused"))
    }

    fn transition_report(
        &self,
        _id: &str,
        _status: ReportStatus,
        _moderated_by: &str,
        _moderated_at: DateTime<Utc>,
        _notes: Option<&str>,
    ) -> VerdictResult<ReportTransition> {
        Err(VerdictError::dependency("reports", "connection refused"))
    }

    fn list_reports(
        &self,
        _status: ReportStatus,
        _limit: usize,
    ) -> VerdictResult<Vec<ContentReport>> {
        Err(VerdictError::dependency("reports", "connection refused"))
    }
}

#[test]
fn dependency_failures_are_503_and_retryable() {
    let storage = seeded_storage();
    let service = ModerationService::with_collaborators(
        Collaborators {
            reports: Arc::new(UnavailableReports),
            ledger: storage.clone(),
            content: storage.clone(),
            accounts: storage,
            notifier: Arc::new(RecordingNotifier::default()),
        },
        VerdictConfig::default(),
    )
    .unwrap();

    let response = post_report(&service, &report_body("melody", "mel-1"));
    assert_eq!(response.status, 503);
    assert_eq!(response.body["error"]["retryable"], true);

    let body = json!({"reportId": "r-1", "action": "approve"}).to_string();
    assert_eq!(patch_decision(&service, &moderator(), &body).status, 503);
}

#[test]
fn every_kind_has_a_status() {
    assert_eq!(status_for(ErrorKind::Validation), 400);
    assert_eq!(status_for(ErrorKind::Unauthorized), 403);
    assert_eq!(status_for(ErrorKind::NotFound), 404);
    assert_eq!(status_for(ErrorKind::InvalidState), 409);
    assert_eq!(status_for(ErrorKind::Dependency), 503);
}
