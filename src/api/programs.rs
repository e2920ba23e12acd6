//! Program access module

use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::client::{query_string, ApiClient};
use crate::error::{ApiError, ApiResult};
use crate::models::{NewProgram, Program, ProgramPatch, ProgramStatus};

pub struct ProgramsApi<'a> {
    api: &'a ApiClient,
}

impl<'a> ProgramsApi<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// List programs, optionally filtered by status.
    pub async fn list(&self, status: Option<ProgramStatus>) -> ApiResult<Vec<Program>> {
        let query = query_string(&[("status", status.map(|s| s.to_string()))]);
        self.api.get(&format!("/programs{}", query)).await
    }

    /// Programs currently open for participation.
    pub async fn active(&self) -> ApiResult<Vec<Program>> {
        self.api.get("/programs/active").await
    }

    /// Programs owned by the signed-in startup.
    pub async fn mine(&self) -> ApiResult<Vec<Program>> {
        self.api.get("/programs/my-programs").await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Program> {
        self.api.get(&format!("/programs/{}", id)).await
    }

    pub async fn create(&self, program: &NewProgram) -> ApiResult<Program> {
        let created: Program = self.api.post("/programs", program).await?;
        info!("Created program {} ({})", created.id, created.title);
        Ok(created)
    }

    pub async fn update(&self, id: &str, patch: &ProgramPatch) -> ApiResult<Program> {
        self.api.patch(&format!("/programs/{}", id), patch).await
    }

    /// Change a program's status, validated locally against the program
    /// state machine before any network attempt. The caller supplies the
    /// status it is holding; the server remains the source of truth.
    pub async fn update_status(
        &self,
        id: &str,
        from: ProgramStatus,
        to: ProgramStatus,
    ) -> ApiResult<Program> {
        if !from.can_transition_to(to) {
            return Err(ApiError::validation(format!(
                "Illegal program status transition {} -> {}",
                from, to
            )));
        }
        self.api
            .patch(
                &format!("/programs/{}/status", id),
                &json!({ "status": to }),
            )
            .await
    }

    /// Hard delete. The server only honors this for DRAFT programs;
    /// published programs are archived instead.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.api.delete(&format!("/programs/{}", id)).await
    }

    /// Opt the signed-in hacker into a program.
    pub async fn join(&self, id: &str) -> ApiResult<Participation> {
        self.api
            .post(&format!("/programs/{}/join", id), &json!({}))
            .await
    }

    /// Whether the signed-in hacker already participates.
    pub async fn check_participation(&self, id: &str) -> ApiResult<bool> {
        let participation: Participation =
            self.api.get(&format!("/programs/{}/join", id)).await?;
        Ok(participation.joined)
    }
}

/// Participation record for the signed-in hacker.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    #[serde(default)]
    pub joined: bool,
    #[serde(default)]
    pub program_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;
    use std::sync::Arc;

    fn offline_client() -> ApiClient {
        // Unroutable base URL; only locally-rejected calls terminate fast
        ApiClient::new("http://127.0.0.1:0", Arc::new(MemoryTokenStore::new()))
    }

    #[tokio::test]
    async fn illegal_transition_is_rejected_before_any_network_attempt() {
        let client = offline_client();
        let programs = ProgramsApi::new(&client);

        let err = programs
            .update_status("prog-1", ProgramStatus::Archived, ProgramStatus::Active)
            .await
            .unwrap_err();

        assert!(err.is_local(), "expected a local validation error: {}", err);
        assert!(err.to_string().contains("ARCHIVED -> ACTIVE"));
    }
}
