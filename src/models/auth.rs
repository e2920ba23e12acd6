//! Authentication shapes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform user role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Hacker,
    Startup,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserRole::Hacker => "HACKER",
            UserRole::Startup => "STARTUP",
            UserRole::Admin => "ADMIN",
        };
        f.write_str(s)
    }
}

/// Signed-in user as returned by the signin endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub username: Option<String>,
}

/// Successful signin payload: session token plus the user it belongs to.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    pub token: String,
    pub user: SessionUser,
}
