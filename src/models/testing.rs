//! Vulnerability test submissions (scans) and their statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::report::Severity;

/// Scan lifecycle status, advanced by the scanning backend.
///
/// PENDING -> IN_PROGRESS -> COMPLETED | FAILED. Both outcomes are terminal
/// for the scan itself; the independent `is_verified` flag may be set after
/// COMPLETED and never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestingStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl TestingStatus {
    pub const ALL: [TestingStatus; 4] = [
        TestingStatus::Pending,
        TestingStatus::InProgress,
        TestingStatus::Completed,
        TestingStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TestingStatus::Pending => "PENDING",
            TestingStatus::InProgress => "IN_PROGRESS",
            TestingStatus::Completed => "COMPLETED",
            TestingStatus::Failed => "FAILED",
        }
    }

    /// Parse a caller-supplied status string against the enum whitelist.
    /// The error message enumerates every legal value.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.to_uppercase().as_str() {
            "PENDING" => Ok(TestingStatus::Pending),
            "IN_PROGRESS" => Ok(TestingStatus::InProgress),
            "COMPLETED" => Ok(TestingStatus::Completed),
            "FAILED" => Ok(TestingStatus::Failed),
            other => Err(format!(
                "Invalid testing status '{}'. Valid values: PENDING, IN_PROGRESS, COMPLETED, FAILED",
                other
            )),
        }
    }

    pub fn can_transition_to(self, next: TestingStatus) -> bool {
        use TestingStatus::*;
        matches!(
            (self, next),
            (Pending, InProgress) | (InProgress, Completed) | (InProgress, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TestingStatus::Completed | TestingStatus::Failed)
    }
}

impl fmt::Display for TestingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TestingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TestingStatus::parse(s)
    }
}

/// A hacker-submitted test of a target URL for one vulnerability type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestingResult {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub target_url: String,
    pub vulnerability_type: String,
    pub status: TestingStatus,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub tester_id: Option<String>,
    #[serde(default)]
    pub submitter_id: Option<String>,
    #[serde(default)]
    pub cvss_score: Option<f64>,
    #[serde(default)]
    pub test_types: Vec<String>,
    #[serde(default)]
    pub results: Option<TestingDetails>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Structured scan output attached to a COMPLETED submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestingDetails {
    #[serde(default)]
    pub summary: SeverityCounts,
    #[serde(default)]
    pub vulnerabilities: Vec<VulnerabilityFinding>,
    #[serde(default)]
    pub security_score: Option<f64>,
    #[serde(default)]
    pub analysis: Option<String>,
}

/// Counts keyed by severity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityCounts {
    #[serde(default)]
    pub critical: u32,
    #[serde(default)]
    pub high: u32,
    #[serde(default)]
    pub medium: u32,
    #[serde(default)]
    pub low: u32,
}

impl SeverityCounts {
    pub fn total(&self) -> u32 {
        self.critical + self.high + self.medium + self.low
    }
}

/// One finding inside a scan result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityFinding {
    pub title: String,
    pub severity: Severity,
    #[serde(default)]
    pub description: Option<String>,
}

/// Submission payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestingSubmission {
    pub title: String,
    pub target_url: String,
    pub vulnerability_type: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub test_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvss_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attachments: Vec<String>,
}

/// Metadata-only patch; status changes go through the status endpoint.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvss_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_types: Option<Vec<String>>,
}

/// Global statistics: severity counts plus the verified/unverified split.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestingStatistics {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub by_severity: SeverityCounts,
    #[serde(default)]
    pub verified: u32,
    #[serde(default)]
    pub unverified: u32,
}

/// Per-user statistics: counts by status and severity, recent submissions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestingSummary {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub pending: u32,
    #[serde(default)]
    pub in_progress: u32,
    #[serde(default)]
    pub completed: u32,
    #[serde(default)]
    pub failed: u32,
    #[serde(default)]
    pub by_severity: SeverityCounts,
    #[serde(default)]
    pub recent: Vec<TestingResult>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use TestingStatus::*;

    #[test]
    fn parse_accepts_the_four_members() {
        assert_eq!(TestingStatus::parse("COMPLETED").unwrap(), Completed);
        assert_eq!(TestingStatus::parse("in_progress").unwrap(), InProgress);
        assert_eq!(TestingStatus::parse("PENDING").unwrap(), Pending);
        assert_eq!(TestingStatus::parse("FAILED").unwrap(), Failed);
    }

    #[test]
    fn parse_rejects_unknown_status_listing_valid_values() {
        let err = TestingStatus::parse("DONE").unwrap_err();
        assert!(err.contains("DONE"));
        for valid in ["PENDING", "IN_PROGRESS", "COMPLETED", "FAILED"] {
            assert!(err.contains(valid), "message should list {}", valid);
        }
    }

    #[test]
    fn scan_outcomes_are_terminal() {
        assert!(Pending.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Failed));
        for from in [Completed, Failed] {
            assert!(from.is_terminal());
            for to in TestingStatus::ALL {
                assert!(!from.can_transition_to(to), "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn severity_counts_total() {
        let counts = SeverityCounts {
            critical: 1,
            high: 2,
            medium: 3,
            low: 4,
        };
        assert_eq!(counts.total(), 10);
    }

    #[test]
    fn statistics_tolerate_sparse_payloads() {
        let stats: TestingStatistics =
            serde_json::from_str(r#"{ "total": 5, "verified": 2 }"#).unwrap();
        assert_eq!(stats.total, 5);
        assert_eq!(stats.verified, 2);
        assert_eq!(stats.by_severity.total(), 0);
    }
}
