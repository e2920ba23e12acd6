//! Startup and hacker profile shapes
//!
//! Profiles have no status machine: create once, update many, owned by the
//! account they describe. Shape validation is the server's job.

use serde::{Deserialize, Serialize};

/// One-to-one with a startup account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupProfile {
    #[serde(default)]
    pub id: Option<String>,
    pub company_name: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub team_size: Option<u32>,
    #[serde(default)]
    pub security_needs: Vec<String>,
    #[serde(default)]
    pub yearly_revenue: Option<f64>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Partial update; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_needs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yearly_revenue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Researcher profile as shown in the engagement directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HackerProfile {
    #[serde(default)]
    pub id: Option<String>,
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub reputation: Option<f64>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}
