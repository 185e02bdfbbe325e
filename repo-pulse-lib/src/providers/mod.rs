//! Upstream metric providers
//!
//! Thin fetch wrappers for the source-hosting API ([`HostingClient`]) and the
//! package-registry API ([`RegistryClient`]). Each call resolves to parsed JSON,
//! to `None` when the provider answers with a non-success status, or to an error
//! when the transport fails. [`fan_out!`] runs several calls at once and turns
//! each result into a [`ProviderOutcome`].

mod client;
mod fan_out;
mod hosting;
mod provider_outcome;
mod registry;
mod repo_slug;

pub use client::{Client, USER_AGENT};
pub(crate) use fan_out::fan_out;
pub use fan_out::isolate;
pub use hosting::{GITHUB_BASE_URL, HostingClient};
pub use provider_outcome::ProviderOutcome;
pub use registry::{NPM_BASE_URL, RegistryClient};
pub use repo_slug::RepoSlug;
