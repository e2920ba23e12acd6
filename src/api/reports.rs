//! Report access module

use serde_json::json;
use tracing::info;

use crate::client::{query_string, ApiClient};
use crate::error::{ApiError, ApiResult};
use crate::models::{NewReport, Report, ReportPatch, ReportStatus};

pub struct ReportsApi<'a> {
    api: &'a ApiClient,
}

impl<'a> ReportsApi<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Reports submitted by the signed-in hacker.
    pub async fn mine(&self) -> ApiResult<Vec<Report>> {
        self.api.get("/reports/my-reports").await
    }

    /// All reports visible to the caller, optionally filtered by status.
    pub async fn list(&self, status: Option<ReportStatus>) -> ApiResult<Vec<Report>> {
        let query = query_string(&[("status", status.map(|s| s.to_string()))]);
        self.api.get(&format!("/reports{}", query)).await
    }

    pub async fn by_program(&self, program_id: &str) -> ApiResult<Vec<Report>> {
        self.api
            .get(&format!("/reports/program/{}", program_id))
            .await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Report> {
        self.api.get(&format!("/reports/{}", id)).await
    }

    pub async fn create(&self, report: &NewReport) -> ApiResult<Report> {
        let created: Report = self.api.post("/reports", report).await?;
        info!("Submitted report {} ({})", created.id, created.title);
        Ok(created)
    }

    pub async fn update(&self, id: &str, patch: &ReportPatch) -> ApiResult<Report> {
        self.api.patch(&format!("/reports/{}", id), patch).await
    }

    /// Triage a report, with optional review notes. The transition is
    /// checked locally against the report state machine before the call,
    /// mirroring the testing module's guard; the server enforces ownership.
    pub async fn update_status(
        &self,
        id: &str,
        from: ReportStatus,
        to: ReportStatus,
        review_notes: Option<&str>,
    ) -> ApiResult<Report> {
        if !from.can_transition_to(to) {
            return Err(ApiError::validation(format!(
                "Illegal report status transition {} -> {}",
                from, to
            )));
        }

        let body = match review_notes {
            Some(notes) => json!({ "status": to, "reviewNotes": notes }),
            None => json!({ "status": to }),
        };
        self.api
            .patch(&format!("/reports/{}/status", id), &body)
            .await
    }

    /// The reporter may delete a submission only while PENDING; the server
    /// enforces that, this call just issues the request.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.api.delete(&format!("/reports/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn terminal_report_cannot_be_retriaged() {
        let client = ApiClient::new("http://127.0.0.1:0", Arc::new(MemoryTokenStore::new()));
        let reports = ReportsApi::new(&client);

        let err = reports
            .update_status("rep-1", ReportStatus::Rejected, ReportStatus::Accepted, None)
            .await
            .unwrap_err();

        assert!(err.is_local());
        assert!(err.to_string().contains("REJECTED -> ACCEPTED"));
    }
}
