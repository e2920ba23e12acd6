//! Vulnerability report resource and its status machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity assigned during triage. Optional on a report until reviewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOW" => Ok(Severity::Low),
            "MEDIUM" => Ok(Severity::Medium),
            "HIGH" => Ok(Severity::High),
            "CRITICAL" => Ok(Severity::Critical),
            other => Err(format!(
                "Invalid severity '{}'. Valid values: LOW, MEDIUM, HIGH, CRITICAL",
                other
            )),
        }
    }
}

/// Report triage status.
///
/// A report waits in PENDING until the owning startup triages it into one of
/// ACCEPTED, REJECTED, DUPLICATE or INFORMATIVE. ACCEPTED reports may later
/// be marked FIXED; every other outcome is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Pending,
    Accepted,
    Rejected,
    Duplicate,
    Informative,
    Fixed,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 6] = [
        ReportStatus::Pending,
        ReportStatus::Accepted,
        ReportStatus::Rejected,
        ReportStatus::Duplicate,
        ReportStatus::Informative,
        ReportStatus::Fixed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "PENDING",
            ReportStatus::Accepted => "ACCEPTED",
            ReportStatus::Rejected => "REJECTED",
            ReportStatus::Duplicate => "DUPLICATE",
            ReportStatus::Informative => "INFORMATIVE",
            ReportStatus::Fixed => "FIXED",
        }
    }

    pub fn can_transition_to(self, next: ReportStatus) -> bool {
        use ReportStatus::*;
        matches!(
            (self, next),
            (Pending, Accepted)
                | (Pending, Rejected)
                | (Pending, Duplicate)
                | (Pending, Informative)
                | (Accepted, Fixed)
        )
    }

    pub fn is_terminal(self) -> bool {
        use ReportStatus::*;
        matches!(self, Rejected | Duplicate | Informative | Fixed)
    }

    /// The reporter may delete a submission only while it awaits triage.
    pub fn is_deletable_by_reporter(self) -> bool {
        self == ReportStatus::Pending
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(ReportStatus::Pending),
            "ACCEPTED" => Ok(ReportStatus::Accepted),
            "REJECTED" => Ok(ReportStatus::Rejected),
            "DUPLICATE" => Ok(ReportStatus::Duplicate),
            "INFORMATIVE" => Ok(ReportStatus::Informative),
            "FIXED" => Ok(ReportStatus::Fixed),
            other => Err(format!(
                "Invalid report status '{}'. Valid values: PENDING, ACCEPTED, REJECTED, DUPLICATE, INFORMATIVE, FIXED",
                other
            )),
        }
    }
}

/// A vulnerability submission by a hacker against a program.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub program_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub severity: Option<Severity>,
    pub status: ReportStatus,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub steps_to_reproduce: Option<String>,
    #[serde(default)]
    pub fix_recommendation: Option<String>,
    #[serde(default)]
    pub proof_urls: Vec<String>,
    #[serde(default)]
    pub reporter_id: Option<String>,
    #[serde(default)]
    pub reviewed_by: Option<String>,
    #[serde(default)]
    pub review_notes: Option<String>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fixed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Create payload; targets an existing, ACTIVE program.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub program_id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps_to_reproduce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_recommendation: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub proof_urls: Vec<String>,
}

/// Partial field patch.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps_to_reproduce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_urls: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReportStatus::*;

    const LEGAL: [(ReportStatus, ReportStatus); 5] = [
        (Pending, Accepted),
        (Pending, Rejected),
        (Pending, Duplicate),
        (Pending, Informative),
        (Accepted, Fixed),
    ];

    #[test]
    fn exactly_the_legal_transitions_are_accepted() {
        for from in ReportStatus::ALL {
            for to in ReportStatus::ALL {
                let expected = LEGAL.contains(&(from, to));
                assert_eq!(from.can_transition_to(to), expected, "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn triage_outcomes_are_terminal() {
        for from in [Rejected, Duplicate, Informative, Fixed] {
            assert!(from.is_terminal());
            for to in ReportStatus::ALL {
                assert!(!from.can_transition_to(to), "{} -> {}", from, to);
            }
        }
        assert!(!Pending.is_terminal());
        assert!(!Accepted.is_terminal());
    }

    #[test]
    fn only_pending_reports_are_deletable_by_reporter() {
        assert!(Pending.is_deletable_by_reporter());
        for status in [Accepted, Rejected, Duplicate, Informative, Fixed] {
            assert!(!status.is_deletable_by_reporter());
        }
    }

    #[test]
    fn severity_ordering_matches_triage_priority() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }
}
