//! Access modules, one per remote resource collection
//!
//! Each module is a thin wrapper over the shared [`ApiClient`](crate::client::ApiClient):
//! one network attempt per call, errors normalized by the client, no local
//! cache. The only logic they add is the local guard checks documented on
//! each method.

pub mod auth;
pub mod profile;
pub mod programs;
pub mod reports;
pub mod rewards;
pub mod testing;

pub use auth::AuthApi;
pub use profile::ProfileApi;
pub use programs::ProgramsApi;
pub use reports::ReportsApi;
pub use rewards::RewardsApi;
pub use testing::TestingApi;
