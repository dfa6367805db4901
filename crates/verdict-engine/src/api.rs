//! Transport-agnostic request handlers: camelCase JSON in, status + JSON out.
//!
//! Status mapping: validation 400, unauthorized 403, not found 404,
//! invalid state 409, dependency 503. A decision that committed with
//! partial failures is still 200, with `partial: true`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use verdict_core::errors::{ErrorKind, VerdictError, VerdictResult};
use verdict_core::models::{
    ContentType, DecisionRequest, ModerationAction, ModeratorContext, NewReport,
};

use crate::service::ModerationService;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

/// `POST report` body. Missing strings default to empty so they surface
/// as validation errors naming the field.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateReportBody {
    pub content_type: String,
    pub content_id: String,
    pub reporter_id: String,
    pub reason: String,
    pub description: Option<String>,
}

/// `PATCH decision` body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecisionBody {
    pub report_id: String,
    /// Must match the authenticated caller when present.
    pub moderator_id: Option<String>,
    pub action: String,
    pub apply_strike: bool,
    pub notes: Option<String>,
}

pub fn post_report(service: &ModerationService, body: &str) -> ApiResponse {
    let outcome = parse::<CreateReportBody>(body).and_then(|body| {
        let new = NewReport {
            content_type: body.content_type.parse::<ContentType>()?,
            content_id: body.content_id,
            reporter_id: body.reporter_id,
            reason: body.reason,
            description: body.description,
        };
        service.create_report(new)
    });
    match outcome.and_then(|report| Ok(serde_json::to_value(report)?)) {
        Ok(report) => ApiResponse {
            status: 201,
            body: report,
        },
        Err(e) => error_response(&e),
    }
}

/// `caller` comes from the identity layer; the engine trusts its `is_moderator`.
pub fn patch_decision(
    service: &ModerationService,
    caller: &ModeratorContext,
    body: &str,
) -> ApiResponse {
    let outcome = parse::<DecisionBody>(body).and_then(|body| {
        if let Some(claimed) = body.moderator_id.as_deref() {
            if claimed != caller.account_id {
                return Err(VerdictError::validation(
                    "moderatorId",
                    "does not match the authenticated caller",
                ));
            }
        }
        let request = DecisionRequest {
            report_id: body.report_id,
            moderator: caller.clone(),
            action: body.action.parse::<ModerationAction>()?,
            apply_strike: body.apply_strike,
            notes: body.notes,
        };
        service.decide(&request)
    });

    let outcome = outcome.and_then(|result| {
        let partial = result.is_partial();
        let mut body = serde_json::to_value(result)?;
        if let Value::Object(map) = &mut body {
            map.insert("partial".to_string(), Value::Bool(partial));
        }
        Ok(body)
    });
    match outcome {
        Ok(body) => ApiResponse { status: 200, body },
        Err(e) => error_response(&e),
    }
}

pub fn status_for(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::Validation => 400,
        ErrorKind::Unauthorized => 403,
        ErrorKind::NotFound => 404,
        ErrorKind::InvalidState => 409,
        ErrorKind::Dependency => 503,
    }
}

fn error_response(err: &VerdictError) -> ApiResponse {
    let kind = err.kind();
    if kind == ErrorKind::Dependency {
        warn!(error = %err, "request failed on a dependency");
    }
    ApiResponse {
        status: status_for(kind),
        body: json!({
            "error": {
                "kind": format!("{kind:?}"),
                "message": err.to_string(),
                "retryable": err.is_retryable(),
            }
        }),
    }
}

fn parse<T: for<'de> Deserialize<'de>>(body: &str) -> VerdictResult<T> {
    Ok(serde_json::from_str(body)?)
}
