//! ReportIntake: validates a new report and persists it as pending.

use std::sync::Arc;

use tracing::info;

use verdict_core::config::IntakeConfig;
use verdict_core::errors::{VerdictError, VerdictResult};
use verdict_core::models::{ContentReport, NewReport};
use verdict_core::traits::{IContentGateway, IReportStore};

pub struct ReportIntake {
    reports: Arc<dyn IReportStore>,
    content: Arc<dyn IContentGateway>,
    limits: IntakeConfig,
}

impl ReportIntake {
    pub fn new(
        reports: Arc<dyn IReportStore>,
        content: Arc<dyn IContentGateway>,
        limits: IntakeConfig,
    ) -> Self {
        Self {
            reports,
            content,
            limits,
        }
    }

    /// Create a pending report. Touches nothing but the report store.
    pub fn create_report(&self, new: NewReport) -> VerdictResult<ContentReport> {
        let _span = crate::intake_span!(new.content_type, new.content_id).entered();

        let new = self.normalize(new)?;
        if !self.content.content_exists(new.content_type, &new.content_id)? {
            return Err(VerdictError::ContentNotFound {
                content_type: new.content_type,
                id: new.content_id,
            });
        }

        let report = ContentReport::pending(new);
        self.reports.insert_report(&report)?;
        info!(report_id = %report.id, reporter_id = %report.reporter_id, "report created");
        Ok(report)
    }

    /// Trim inputs, reject missing or oversized fields, and drop blank descriptions.
    fn normalize(&self, new: NewReport) -> VerdictResult<NewReport> {
        let content_id = required("contentId", &new.content_id)?;
        let reporter_id = required("reporterId", &new.reporter_id)?;
        let reason = required("reason", &new.reason)?;
        check_len("reason", &reason, self.limits.max_reason_len)?;

        let description = new
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        if let Some(description) = &description {
            check_len("description", description, self.limits.max_description_len)?;
        }

        Ok(NewReport {
            content_type: new.content_type,
            content_id,
            reporter_id,
            reason,
            description,
        })
    }
}

fn required(field: &str, value: &str) -> VerdictResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(VerdictError::validation(field, "is required"));
    }
    Ok(trimmed.to_string())
}

fn check_len(field: &str, value: &str, max: usize) -> VerdictResult<()> {
    let len = value.chars().count();
    if len > max {
        return Err(VerdictError::validation(
            field,
            format!("is {len} characters, limit is {max}"),
        ));
    }
    Ok(())
}
