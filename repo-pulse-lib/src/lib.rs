#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for repo-pulse
//!
//! repo-pulse gathers repository statistics from GitHub and download counts from
//! npm, shapes them into a single JSON payload, and serves it from a short-lived
//! cache that falls back to the last good payload when the providers misbehave.
//!
//! # Module Organization
//!
//! - [`providers`]: HTTP clients for the hosting and package registries, plus the fan-out helper
//! - [`collector`]: Concurrent assembly of one payload from every provider
//! - [`shaping`]: Conversion of raw provider responses into the payload
//! - [`cache`]: Single-slot TTL cache with stale fallback
//! - [`server`]: The HTTP endpoint
//! - [`commands`]: Command-line interface and configuration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod cache;
pub mod collector;
pub mod commands;
pub mod providers;
pub mod server;
pub mod shaping;

pub use crate::commands::{Host, run};
