//! Bounty program resource and its status machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Program lifecycle status.
///
/// DRAFT programs are invisible to researchers and are the only ones that
/// may be deleted. Once active, a program moves between ACTIVE and PAUSED,
/// forward into COMPLETED, and finally into the terminal ARCHIVED state,
/// which stands in for deletion of published programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgramStatus {
    Draft,
    // Older payloads used PUBLISHED for open programs
    #[serde(alias = "PUBLISHED")]
    Active,
    Paused,
    Completed,
    Archived,
}

impl ProgramStatus {
    pub const ALL: [ProgramStatus; 5] = [
        ProgramStatus::Draft,
        ProgramStatus::Active,
        ProgramStatus::Paused,
        ProgramStatus::Completed,
        ProgramStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramStatus::Draft => "DRAFT",
            ProgramStatus::Active => "ACTIVE",
            ProgramStatus::Paused => "PAUSED",
            ProgramStatus::Completed => "COMPLETED",
            ProgramStatus::Archived => "ARCHIVED",
        }
    }

    /// Legal status transitions. ARCHIVED is terminal.
    pub fn can_transition_to(self, next: ProgramStatus) -> bool {
        use ProgramStatus::*;
        matches!(
            (self, next),
            (Draft, Active)
                | (Active, Paused)
                | (Paused, Active)
                | (Active, Completed)
                | (Paused, Completed)
                | (Completed, Archived)
        )
    }

    pub fn is_terminal(self) -> bool {
        self == ProgramStatus::Archived
    }

    /// Only unpublished programs may be deleted by their owner.
    pub fn is_deletable(self) -> bool {
        self == ProgramStatus::Draft
    }
}

impl fmt::Display for ProgramStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProgramStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DRAFT" => Ok(ProgramStatus::Draft),
            // The API uses ACTIVE; older payloads say PUBLISHED
            "ACTIVE" | "PUBLISHED" => Ok(ProgramStatus::Active),
            "PAUSED" => Ok(ProgramStatus::Paused),
            "COMPLETED" => Ok(ProgramStatus::Completed),
            "ARCHIVED" => Ok(ProgramStatus::Archived),
            other => Err(format!(
                "Invalid program status '{}'. Valid values: DRAFT, ACTIVE, PAUSED, COMPLETED, ARCHIVED",
                other
            )),
        }
    }
}

/// Reward policy tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RewardType {
    Cash,
    Swag,
    Both,
    Kudos,
}

impl fmt::Display for RewardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RewardType::Cash => "CASH",
            RewardType::Swag => "SWAG",
            RewardType::Both => "BOTH",
            RewardType::Kudos => "KUDOS",
        };
        f.write_str(s)
    }
}

/// A bounty program owned by one startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub out_of_scope: Option<String>,
    pub min_reward: f64,
    pub max_reward: f64,
    pub reward_type: RewardType,
    pub status: ProgramStatus,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub vulnerability_types: Vec<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create payload. New programs always start in DRAFT on the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProgram {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_of_scope: Option<String>,
    pub min_reward: f64,
    pub max_reward: f64,
    pub reward_type: RewardType,
    pub start_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub vulnerability_types: Vec<String>,
}

/// Partial field patch; unset fields are left untouched by the server.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_of_scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_reward: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_reward: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward_type: Option<RewardType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vulnerability_types: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ProgramStatus::*;

    const LEGAL: [(ProgramStatus, ProgramStatus); 6] = [
        (Draft, Active),
        (Active, Paused),
        (Paused, Active),
        (Active, Completed),
        (Paused, Completed),
        (Completed, Archived),
    ];

    #[test]
    fn exactly_the_legal_transitions_are_accepted() {
        for from in ProgramStatus::ALL {
            for to in ProgramStatus::ALL {
                let expected = LEGAL.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "{} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn archived_is_terminal() {
        for to in ProgramStatus::ALL {
            assert!(!Archived.can_transition_to(to), "ARCHIVED -> {}", to);
        }
        assert!(Archived.is_terminal());
    }

    #[test]
    fn only_draft_is_deletable() {
        assert!(Draft.is_deletable());
        for status in [Active, Paused, Completed, Archived] {
            assert!(!status.is_deletable(), "{} should not be deletable", status);
        }
    }

    #[test]
    fn parses_published_as_active() {
        assert_eq!("PUBLISHED".parse::<ProgramStatus>().unwrap(), Active);
        assert_eq!("active".parse::<ProgramStatus>().unwrap(), Active);
        assert!("LIVE".parse::<ProgramStatus>().is_err());
    }

    #[test]
    fn status_wire_format_is_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&ProgramStatus::Completed).unwrap(),
            "\"COMPLETED\""
        );
        let status: ProgramStatus = serde_json::from_str("\"PAUSED\"").unwrap();
        assert_eq!(status, Paused);
    }
}
