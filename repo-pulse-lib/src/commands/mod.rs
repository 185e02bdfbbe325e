//! Command-line interface for repo-pulse
//!
//! - **serve**: run the HTTP server that answers `GET /api/stats` from the cache
//! - **fetch**: assemble the payload once and print it as JSON
//! - **init**: generate a default configuration file
//! - **validate**: check a configuration file
//!
//! Every command accepts `--config`, `--github-token` and `--log-level`. The
//! configuration is a TOML file, `repo-pulse.toml` in the current directory by
//! default; missing keys take built-in defaults.

mod common;
mod config;
mod fetch;
mod host;
mod init;
mod run;
mod serve;
mod validate;

pub use config::{Config, DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_TOML};
pub use fetch::{FetchArgs, fetch_stats};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use serve::{ServeArgs, serve_stats};
pub use validate::{ValidateArgs, validate_config};
