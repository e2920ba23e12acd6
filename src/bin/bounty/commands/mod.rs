pub mod auth;
pub mod config;
pub mod profile;
pub mod programs;
pub mod reports;
pub mod rewards;
pub mod testing;
