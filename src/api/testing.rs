//! Testing/scan access module
//!
//! `update_status` keeps the one guard the original dashboard performed
//! before a network call: the supplied status string must be a member of
//! the testing status whitelist, otherwise the call fails locally with a
//! message listing the legal values.

use serde_json::json;
use tracing::info;

use crate::client::{query_string, ApiClient};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    Severity, TestingDetails, TestingPatch, TestingResult, TestingStatistics, TestingStatus,
    TestingSubmission, TestingSummary,
};
use crate::validate::require_non_empty;

pub struct TestingApi<'a> {
    api: &'a ApiClient,
}

impl<'a> TestingApi<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn submit(&self, submission: &TestingSubmission) -> ApiResult<TestingResult> {
        require_non_empty(&submission.title, "Title")?;
        require_non_empty(&submission.target_url, "Target URL")?;

        let created: TestingResult = self.api.post("/testing", submission).await?;
        info!(
            "Submitted test {} against {}",
            created.id, created.target_url
        );
        Ok(created)
    }

    /// List submissions with optional tester/status/severity filters.
    pub async fn list(
        &self,
        tester_id: Option<&str>,
        status: Option<TestingStatus>,
        severity: Option<Severity>,
    ) -> ApiResult<Vec<TestingResult>> {
        let query = query_string(&[
            ("testerId", tester_id.map(|s| s.to_string())),
            ("status", status.map(|s| s.to_string())),
            ("severity", severity.map(|s| s.to_string())),
        ]);
        self.api.get(&format!("/testing{}", query)).await
    }

    /// Submissions created by the signed-in user.
    pub async fn my_submissions(&self) -> ApiResult<Vec<TestingResult>> {
        self.api.get("/testing/my-submissions").await
    }

    /// Tests where the signed-in user is the assigned tester.
    pub async fn my_tests(&self) -> ApiResult<Vec<TestingResult>> {
        self.api.get("/testing/my-tests").await
    }

    pub async fn get(&self, id: &str) -> ApiResult<TestingResult> {
        self.api.get(&format!("/testing/{}", id)).await
    }

    /// Structured scan output for a completed submission.
    pub async fn details(&self, id: &str) -> ApiResult<TestingDetails> {
        self.api.get(&format!("/testing/{}/details", id)).await
    }

    /// Metadata-only update; status changes go through [`Self::update_status`].
    pub async fn update(&self, id: &str, patch: &TestingPatch) -> ApiResult<TestingResult> {
        self.api.patch(&format!("/testing/{}", id), patch).await
    }

    /// Advance a submission's status. An unknown status string is rejected
    /// locally, with no network round-trip, listing the four valid values.
    pub async fn update_status(&self, id: &str, status: &str) -> ApiResult<TestingResult> {
        let status = TestingStatus::parse(status).map_err(ApiError::Validation)?;
        self.api
            .patch(
                &format!("/testing/{}/status", id),
                &json!({ "status": status }),
            )
            .await
    }

    /// Mark a completed submission as verified. Verification never reverts.
    pub async fn verify(&self, id: &str) -> ApiResult<TestingResult> {
        self.api
            .patch(&format!("/testing/{}/verify", id), &json!({}))
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.api.delete(&format!("/testing/{}", id)).await
    }

    /// Global severity counts and the verified/unverified split.
    pub async fn statistics(&self) -> ApiResult<TestingStatistics> {
        self.api.get("/testing/statistics").await
    }

    /// Per-user counts by status and severity, plus recent submissions.
    pub async fn summary(&self) -> ApiResult<TestingSummary> {
        self.api.get("/testing/summary").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;
    use std::sync::Arc;

    fn offline_client() -> ApiClient {
        // Unroutable base URL; a request that reaches the network would fail
        // with a transport error, not a validation error
        ApiClient::new("http://127.0.0.1:0", Arc::new(MemoryTokenStore::new()))
    }

    #[tokio::test]
    async fn invalid_status_fails_locally_listing_valid_values() {
        let client = offline_client();
        let testing = TestingApi::new(&client);

        let err = testing.update_status("test-1", "DONE").await.unwrap_err();
        assert!(err.is_local(), "expected local rejection, got: {}", err);

        let message = err.to_string();
        for valid in ["PENDING", "IN_PROGRESS", "COMPLETED", "FAILED"] {
            assert!(message.contains(valid), "message should list {}", valid);
        }
    }

    #[tokio::test]
    async fn empty_submission_title_fails_locally() {
        let client = offline_client();
        let testing = TestingApi::new(&client);

        let submission = TestingSubmission {
            title: "".to_string(),
            target_url: "https://target.example.com".to_string(),
            vulnerability_type: "XSS".to_string(),
            severity: Severity::High,
            test_types: vec![],
            cvss_score: None,
            description: None,
            attachments: vec![],
        };

        let err = testing.submit(&submission).await.unwrap_err();
        assert!(err.is_local());
    }
}
