//! Startup-profile access module
//!
//! Shape validation is deferred entirely to the server.

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{HackerProfile, StartupProfile, StartupProfilePatch};

pub struct ProfileApi<'a> {
    api: &'a ApiClient,
}

impl<'a> ProfileApi<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Profile of the signed-in startup.
    pub async fn startup(&self) -> ApiResult<StartupProfile> {
        self.api.get("/user/startup/profile").await
    }

    pub async fn create_startup(&self, profile: &StartupProfile) -> ApiResult<StartupProfile> {
        self.api.post("/user/startup/profile", profile).await
    }

    pub async fn update_startup(&self, patch: &StartupProfilePatch) -> ApiResult<StartupProfile> {
        self.api.patch("/user/startup/profile", patch).await
    }

    /// Profile of the signed-in hacker, as shown in the engagement directory.
    pub async fn hacker(&self) -> ApiResult<HackerProfile> {
        self.api.get("/user/hacker/profile").await
    }
}
