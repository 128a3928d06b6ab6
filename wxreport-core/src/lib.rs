//! Core library for the `wxreport` CLI.
//!
//! This crate defines:
//! - Configuration handling (API key, endpoint URLs, file locations)
//! - The HTTP fetch chokepoint and its substitutable `Fetch` trait
//! - The local account store gating access to the report engine
//! - The report engine: geocoding, current conditions, past-days summary,
//!   forecast aggregation, and report composition
//!
//! It is used by `wxreport-cli`, but can also be reused by other binaries or services.

pub mod account;
pub mod config;
pub mod fetch;
pub mod model;
pub mod report;

pub use account::AccountStore;
pub use config::{Config, Endpoints};
pub use fetch::{Endpoint, Fetch, FetchError, HttpFetch};
pub use model::{Coordinate, DaySummary, ForecastEntry};
pub use report::ReportComposer;
