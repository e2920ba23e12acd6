//! Bounty Board - client library for the bounty platform
//!
//! Connects the two platform roles over the REST API:
//! hackers (security researchers) submit reports and vulnerability tests,
//! startups own programs, triage reports and approve rewards.
//!
//! # How it works
//!
//! 1. A startup creates a program (DRAFT) and publishes it (ACTIVE)
//! 2. Hackers join the program and submit vulnerability reports
//! 3. The startup triages reports into ACCEPTED, REJECTED, DUPLICATE or INFORMATIVE
//! 4. Accepted reports earn rewards: PENDING -> APPROVED -> PAID
//! 5. Independent scan submissions track their own PENDING -> IN_PROGRESS -> COMPLETED/FAILED lifecycle
//!
//! # Design rules
//!
//! - Exactly one network attempt per call, no retries, no local cache
//! - Status transitions are validated locally where the caller holds the
//!   current status; the server stays the source of truth
//! - The session token lives behind an injected [`session::TokenStore`],
//!   never a module-level singleton

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod validate;

pub use api::{AuthApi, ProfileApi, ProgramsApi, ReportsApi, RewardsApi, TestingApi};
pub use client::ApiClient;
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use session::{FileTokenStore, MemoryTokenStore, TokenStore};
