//! Monetary reward resource and its status machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reward approval status.
///
/// Created PENDING once a report is accepted, then either APPROVED (with a
/// note) or REJECTED (with a reason). APPROVED rewards are eventually PAID.
/// PAID and REJECTED never regress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RewardStatus {
    Pending,
    Approved,
    Rejected,
    Paid,
}

impl RewardStatus {
    pub const ALL: [RewardStatus; 4] = [
        RewardStatus::Pending,
        RewardStatus::Approved,
        RewardStatus::Rejected,
        RewardStatus::Paid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RewardStatus::Pending => "PENDING",
            RewardStatus::Approved => "APPROVED",
            RewardStatus::Rejected => "REJECTED",
            RewardStatus::Paid => "PAID",
        }
    }

    pub fn can_transition_to(self, next: RewardStatus) -> bool {
        use RewardStatus::*;
        matches!(
            (self, next),
            (Pending, Approved) | (Pending, Rejected) | (Approved, Paid)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RewardStatus::Rejected | RewardStatus::Paid)
    }
}

impl fmt::Display for RewardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RewardStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(RewardStatus::Pending),
            "APPROVED" => Ok(RewardStatus::Approved),
            "REJECTED" => Ok(RewardStatus::Rejected),
            "PAID" => Ok(RewardStatus::Paid),
            other => Err(format!(
                "Invalid reward status '{}'. Valid values: PENDING, APPROVED, REJECTED, PAID",
                other
            )),
        }
    }
}

/// A monetary award tied to an accepted report/program pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: String,
    pub report_id: String,
    pub program_id: String,
    pub amount: f64,
    pub status: RewardStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub approval_note: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub hacker_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
}

/// Create payload for an accepted report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReward {
    pub report_id: String,
    pub program_id: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial field patch.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use RewardStatus::*;

    const LEGAL: [(RewardStatus, RewardStatus); 3] =
        [(Pending, Approved), (Pending, Rejected), (Approved, Paid)];

    #[test]
    fn exactly_the_legal_transitions_are_accepted() {
        for from in RewardStatus::ALL {
            for to in RewardStatus::ALL {
                let expected = LEGAL.contains(&(from, to));
                assert_eq!(from.can_transition_to(to), expected, "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn paid_and_rejected_never_regress() {
        for from in [Paid, Rejected] {
            assert!(from.is_terminal());
            for to in RewardStatus::ALL {
                assert!(!from.can_transition_to(to), "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn paid_requires_approved_first() {
        assert!(!Pending.can_transition_to(Paid));
        assert!(Approved.can_transition_to(Paid));
    }
}
