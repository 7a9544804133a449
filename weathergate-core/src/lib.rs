//! Core library for the `weathergate` CLI.
//!
//! This crate defines:
//! - Configuration & API key handling
//! - The weatherstack HTTP client
//! - Field extraction over raw response text
//! - UV / wind-direction classification
//! - The file-backed credential store
//!
//! It is used by `weathergate-cli`, but can also be reused by other binaries or services.

pub mod classify;
pub mod client;
pub mod config;
pub mod extract;
pub mod report;
pub mod users;

pub use classify::{CompassDirection, UvLevel, classify_uv, classify_wind_direction};
pub use client::{WeatherFetcher, WeatherstackClient};
pub use config::Config;
pub use extract::{ExtractedValue, FieldSpec, extract};
pub use report::CurrentConditions;
pub use users::{Credential, StoreError, UserStore};
