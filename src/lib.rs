//! # Clearance Agent Library
//!
//! Maintains a short-lived browser-challenge credential ("clearance") used to
//! authenticate outbound requests to a protected target. Acquisition is
//! delegated to a remote challenge-solving service; this crate caches the
//! result, coalesces concurrent refreshes, and exposes admin/metrics routes.
//!
//! Modules:
//! - `cache` — single-entry clearance cache with the in-flight marker
//! - `coordinator` — acquisition orchestration (cache hit / wait / fetch)
//! - `config` — YAML service configuration
//! - `outbound` — cookie assembly, fallback, and the 403 hook
//! - `api` / `server` — admin endpoints and server wiring

pub mod api;
pub mod cache;
pub mod config;
pub mod coordinator;
pub mod helpers;
pub mod observability;
pub mod outbound;
pub mod server;
pub mod tests;
pub mod utils;

pub use crate::cache::{ClearanceCache, ClearanceContext, ClearanceEntry};
pub use crate::config::settings::ServiceConfig;
pub use crate::coordinator::{AcquisitionError, ClearanceCoordinator};
