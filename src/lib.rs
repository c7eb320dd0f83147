//! Carebridge health API
//!
//! Accounts with bearer-token auth, a personal metrics dashboard, a doctor
//! directory with appointment booking, and a keyword symptom checker. All
//! state lives in memory.

pub mod api;
pub mod auth;
pub mod config;
pub mod doctors;
pub mod middleware;
pub mod models;
pub mod store;
pub mod symptoms;

pub use api::{create_router, AppState};
pub use config::Config;
