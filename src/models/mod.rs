//! Resource shapes exchanged with the platform API
//!
//! Status enums carry the legal-transition contract the UI must respect when
//! enabling action controls; the server remains the source of truth.

pub mod auth;
pub mod profile;
pub mod program;
pub mod report;
pub mod reward;
pub mod testing;

pub use auth::{SessionUser, SigninResponse, UserRole};
pub use profile::{HackerProfile, StartupProfile, StartupProfilePatch};
pub use program::{NewProgram, Program, ProgramPatch, ProgramStatus, RewardType};
pub use report::{NewReport, Report, ReportPatch, ReportStatus, Severity};
pub use reward::{NewReward, Reward, RewardPatch, RewardStatus};
pub use testing::{
    SeverityCounts, TestingDetails, TestingPatch, TestingResult, TestingStatistics,
    TestingStatus, TestingSubmission, TestingSummary, VulnerabilityFinding,
};
