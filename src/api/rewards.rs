//! Reward access module

use serde_json::json;
use tracing::info;

use crate::client::{query_string, ApiClient};
use crate::error::ApiResult;
use crate::models::{NewReward, Reward, RewardPatch, RewardStatus};
use crate::validate::require_non_empty;

pub struct RewardsApi<'a> {
    api: &'a ApiClient,
}

impl<'a> RewardsApi<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Rewards granted to the signed-in hacker.
    pub async fn mine(&self) -> ApiResult<Vec<Reward>> {
        self.api.get("/rewards/my-rewards").await
    }

    /// All rewards visible to the caller, with optional status and program filters.
    pub async fn list(
        &self,
        status: Option<RewardStatus>,
        program_id: Option<&str>,
    ) -> ApiResult<Vec<Reward>> {
        let query = query_string(&[
            ("status", status.map(|s| s.to_string())),
            ("programId", program_id.map(|s| s.to_string())),
        ]);
        self.api.get(&format!("/rewards{}", query)).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Reward> {
        self.api.get(&format!("/rewards/{}", id)).await
    }

    pub async fn create(&self, reward: &NewReward) -> ApiResult<Reward> {
        let created: Reward = self.api.post("/rewards", reward).await?;
        info!(
            "Created reward {} for report {} ({} USD)",
            created.id, created.report_id, created.amount
        );
        Ok(created)
    }

    pub async fn update(&self, id: &str, patch: &RewardPatch) -> ApiResult<Reward> {
        self.api.patch(&format!("/rewards/{}", id), patch).await
    }

    /// Approve a PENDING reward. The approval note is required and checked
    /// locally before the network call.
    pub async fn approve(&self, id: &str, approval_note: &str) -> ApiResult<Reward> {
        require_non_empty(approval_note, "Approval note")?;
        self.api
            .patch(
                &format!("/rewards/{}/approve", id),
                &json!({ "approvalNote": approval_note }),
            )
            .await
    }

    /// Reject a PENDING reward. The rejection reason is required and checked
    /// locally before the network call.
    pub async fn reject(&self, id: &str, rejection_reason: &str) -> ApiResult<Reward> {
        require_non_empty(rejection_reason, "Rejection reason")?;
        self.api
            .patch(
                &format!("/rewards/{}/reject", id),
                &json!({ "rejectionReason": rejection_reason }),
            )
            .await
    }

    /// Mark an APPROVED reward as paid. The server rejects the call unless
    /// the reward is currently APPROVED.
    pub async fn mark_as_paid(&self, id: &str) -> ApiResult<Reward> {
        self.api
            .patch(&format!("/rewards/{}/mark-as-paid", id), &json!({}))
            .await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.api.delete(&format!("/rewards/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;
    use std::sync::Arc;

    fn offline_client() -> ApiClient {
        ApiClient::new("http://127.0.0.1:0", Arc::new(MemoryTokenStore::new()))
    }

    #[tokio::test]
    async fn approve_requires_a_note() {
        let client = offline_client();
        let rewards = RewardsApi::new(&client);

        let err = rewards.approve("rew-1", "   ").await.unwrap_err();
        assert!(err.is_local());
        assert_eq!(err.to_string(), "Approval note must not be empty");
    }

    #[tokio::test]
    async fn reject_requires_a_reason() {
        let client = offline_client();
        let rewards = RewardsApi::new(&client);

        let err = rewards.reject("rew-1", "").await.unwrap_err();
        assert!(err.is_local());
        assert_eq!(err.to_string(), "Rejection reason must not be empty");
    }
}
